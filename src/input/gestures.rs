use egui::Pos2;

use crate::stroke::ActionBuilder;
use crate::surface::Snapshot;
use crate::tools::ToolStyle;

/// Transient state of one pointer-down to pointer-up interaction
#[derive(Debug, Clone)]
pub struct GestureSession {
    builder: ActionBuilder,
    /// Surface as it was at pointer-down, used to wipe the previous preview
    /// frame of a shape tool. Separate from the history snapshot.
    preview_baseline: Option<Snapshot>,
}

impl GestureSession {
    pub fn new(style: ToolStyle, anchor: Pos2, preview_baseline: Option<Snapshot>) -> Self {
        Self {
            builder: ActionBuilder::new(style, anchor),
            preview_baseline,
        }
    }

    pub fn style(&self) -> &ToolStyle {
        self.builder.style()
    }

    pub fn anchor(&self) -> Pos2 {
        self.builder.start()
    }

    pub fn last_point(&self) -> Pos2 {
        self.builder.last_point()
    }

    pub fn points(&self) -> &[Pos2] {
        self.builder.points()
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.builder.add_point(point);
    }

    pub fn preview_baseline(&self) -> Option<&Snapshot> {
        self.preview_baseline.as_ref()
    }

    /// Discard the preview baseline and hand back the action accumulator
    pub fn into_builder(self) -> ActionBuilder {
        self.builder
    }
}

/// Gesture state machine: Idle until a pointer-down starts a gesture
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active(GestureSession),
}

impl GestureState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active(_) => "Active",
        }
    }

    /// Leave the Active state, returning the session that was live
    pub fn take(&mut self) -> Option<GestureSession> {
        match std::mem::take(self) {
            Self::Active(session) => Some(session),
            Self::Idle => None,
        }
    }
}
