use egui::Color32;

use crate::error::{PaintError, PaintResult};

/// Basic palette offered by the toolbar
pub const COLOR_PALETTE: [(&str, &str); 8] = [
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Red", "#EF4444"),
    ("Blue", "#3B82F6"),
    ("Green", "#22C55E"),
    ("Yellow", "#EAB308"),
    ("Purple", "#A855F7"),
    ("Orange", "#F97316"),
];

/// Parse a `#RRGGBB` string (the leading `#` is optional) into an opaque color
pub fn parse_hex(hex: &str) -> PaintResult<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(PaintError::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| PaintError::InvalidColor(hex.to_string()))
    };

    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format a color as uppercase `#RRGGBB`, dropping alpha
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Serde adapter storing a `Color32` as its `#RRGGBB` string
pub mod hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
