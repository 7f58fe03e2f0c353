mod history;

pub use history::{DEFAULT_HISTORY_DEPTH, SnapshotHistory};

/// Triggers the host layer sends to the drawing session, outside of
/// pointer gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Restore the previous surface state
    Undo,
    /// Re-apply the most recently undone state
    Redo,
    /// Reset the surface to its background (undoable)
    Clear,
    /// The container changed size
    Resize { width: u32, height: u32 },
    /// Produce the SVG export of the current surface
    Export,
}

impl Command {
    /// Returns true if executing the command can change the pixels
    pub fn mutates_surface(&self) -> bool {
        match self {
            Command::Undo | Command::Redo | Command::Clear | Command::Resize { .. } => true,
            Command::Export => false,
        }
    }
}
