use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::tools::{ShapeMode, Tool, ToolStyle};

/// Immutable record of one committed gesture or instantaneous fill
#[derive(Debug, Clone, PartialEq)]
pub struct DrawAction {
    id: Uuid,
    tool: Tool,
    color: Color32,
    brush_size: u32,
    shape_mode: ShapeMode,
    points: Vec<Pos2>,
    start: Pos2,
    end: Pos2,
}

impl DrawAction {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn shape_mode(&self) -> ShapeMode {
        self.shape_mode
    }

    /// Sampled pointer positions: dense for freehand tools, anchor and
    /// release point for shapes, the seed alone for fills
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Anchor of the gesture
    pub fn start(&self) -> Pos2 {
        self.start
    }

    /// Release point of the gesture
    pub fn end(&self) -> Pos2 {
        self.end
    }
}

/// Accumulates the points of a gesture until it is committed
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    style: ToolStyle,
    start: Pos2,
    points: Vec<Pos2>,
}

impl ActionBuilder {
    pub fn new(style: ToolStyle, start: Pos2) -> Self {
        Self {
            style,
            start,
            points: vec![start],
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Most recently sampled point
    pub fn last_point(&self) -> Pos2 {
        self.points.last().copied().unwrap_or(self.start)
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn style(&self) -> &ToolStyle {
        &self.style
    }

    /// Convert to an immutable action ending at `end`
    pub fn finish(self, end: Pos2) -> DrawAction {
        DrawAction {
            id: Uuid::new_v4(),
            tool: self.style.tool,
            color: self.style.color,
            brush_size: self.style.brush_size,
            shape_mode: self.style.shape_mode,
            points: self.points,
            start: self.start,
            end,
        }
    }
}
