use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::PaintResult;

/// Brush size options offered by the toolbar, in pixels
pub const BRUSH_SIZES: [(&str, u32); 5] = [
    ("Extra Small", 2),
    ("Small", 4),
    ("Medium", 8),
    ("Large", 16),
    ("Extra Large", 24),
];

/// Enum representing all available tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Line,
    Rectangle,
    Circle,
    Eraser,
    Fill,
    /// Picks overlay objects; never touches the surface
    Select,
    /// Places a 3D shape overlay; never touches the surface
    Shape3d,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Pencil,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Eraser,
        Tool::Fill,
        Tool::Select,
        Tool::Shape3d,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
            Tool::Select => "select",
            Tool::Shape3d => "shape3d",
        }
    }

    /// Tools that paint continuously along the pointer path
    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }

    /// Tools defined by two endpoints and previewed live before commit
    pub fn is_shape(&self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }

    /// Tools handled by the overlay layer rather than the pixel engine
    pub fn is_overlay(&self) -> bool {
        matches!(self, Tool::Select | Tool::Shape3d)
    }

    /// Single-key shortcut letter, uppercase
    pub fn shortcut(&self) -> Option<char> {
        match self {
            Tool::Pencil => Some('P'),
            Tool::Line => Some('L'),
            Tool::Rectangle => Some('R'),
            Tool::Circle => Some('C'),
            Tool::Eraser => Some('E'),
            Tool::Fill => Some('F'),
            Tool::Select | Tool::Shape3d => None,
        }
    }

    /// Tool bound to a shortcut key, case-insensitive
    pub fn from_shortcut(key: char) -> Option<Tool> {
        let key = key.to_ascii_uppercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == Some(key))
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether rectangle and circle paint their interior or only their border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    Fill,
    #[default]
    Outline,
}

/// Style parameters passed explicitly into every drawing operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolStyle {
    pub tool: Tool,
    #[serde(with = "color::hex")]
    pub color: Color32,
    /// Brush width in pixels
    pub brush_size: u32,
    pub shape_mode: ShapeMode,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: Color32::BLACK,
            brush_size: 8,
            shape_mode: ShapeMode::Outline,
        }
    }
}

impl ToolStyle {
    /// Build a style from a `#RRGGBB` color string
    pub fn new(tool: Tool, color_hex: &str, brush_size: u32, shape_mode: ShapeMode) -> PaintResult<Self> {
        Ok(Self {
            tool,
            color: color::parse_hex(color_hex)?,
            brush_size,
            shape_mode,
        })
    }

    pub fn with_tool(self, tool: Tool) -> Self {
        Self { tool, ..self }
    }

    pub fn with_color(self, color: Color32) -> Self {
        Self { color, ..self }
    }

    pub fn with_shape_mode(self, shape_mode: ShapeMode) -> Self {
        Self { shape_mode, ..self }
    }

    pub fn with_brush_size(self, brush_size: u32) -> Self {
        Self { brush_size, ..self }
    }
}
