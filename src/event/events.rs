use egui::Pos2;

use crate::stroke::DrawAction;
use crate::tools::Tool;

#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// A gesture or fill was committed; emitted exactly once per operation
    ActionCommitted(DrawAction),
    /// The pointer left the surface mid-gesture; nothing was committed
    GestureAborted {
        tool: Tool,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    SurfaceResized {
        width: u32,
        height: u32,
    },
    SurfaceCleared,
    /// An overlay tool was used; the overlay layer decides what to do
    OverlayRequested {
        tool: Tool,
        point: Pos2,
    },
    Exported {
        bytes: usize,
    },
}
