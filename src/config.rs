use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::command::DEFAULT_HISTORY_DEPTH;
use crate::error::ConfigError;
use crate::fill::FillOptions;

/// Tunable engine policy. Every field falls back to its default when absent
/// from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Maximum entries on each of the undo and redo stacks
    pub history_depth: usize,
    /// Per-channel tolerance (inclusive) for a pixel to join a fill region
    pub fill_tolerance: u8,
    /// Seed colors closer than this to the fill color skip the fill
    pub fill_noop_tolerance: u8,
    /// Color used by clear, resize and the eraser
    #[serde(with = "color::hex")]
    pub background: Color32,
    /// Smallest surface edge the host will request
    pub min_surface_size: u32,
    pub export_file_name: String,
}

impl Default for PaintConfig {
    fn default() -> Self {
        let fill = FillOptions::default();
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            fill_tolerance: fill.tolerance,
            fill_noop_tolerance: fill.noop_tolerance,
            background: Color32::WHITE,
            min_surface_size: 100,
            export_file_name: "drawing.svg".to_owned(),
        }
    }
}

impl PaintConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load `path` if given, falling back to defaults when it is missing or
    /// malformed
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config, {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn fill_options(&self) -> FillOptions {
        FillOptions {
            tolerance: self.fill_tolerance,
            noop_tolerance: self.fill_noop_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_policy() {
        let config = PaintConfig::default();
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.fill_tolerance, 32);
        assert_eq!(config.fill_noop_tolerance, 5);
        assert_eq!(config.background, Color32::WHITE);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = PaintConfig::from_json_str(r##"{"fill_tolerance": 0, "background": "#000000"}"##).unwrap();
        assert_eq!(config.fill_tolerance, 0);
        assert_eq!(config.background, Color32::BLACK);
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.export_file_name, "drawing.svg");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            PaintConfig::from_json_str("{\"history_depth\": -1}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = PaintConfig::load_or_default(Some(Path::new("/nonexistent/pixel_paint.json")));
        assert_eq!(config, PaintConfig::default());
    }
}
