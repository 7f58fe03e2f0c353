use std::collections::VecDeque;

use egui::Color32;
use log::debug;

use crate::error::PaintResult;
use crate::surface::{PixelSurface, Snapshot};

/// Default bound on both the undo and the redo stack
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Snapshot-based undo/redo over a [`PixelSurface`].
///
/// Both stacks keep the most recent entry at the back and hold at most
/// `max_depth` snapshots; pushing past the bound drops the oldest one.
#[derive(Debug)]
pub struct SnapshotHistory {
    /// Surface states that can be restored by undo
    undo_stack: VecDeque<Snapshot>,
    /// Surface states that can be restored by redo
    redo_stack: VecDeque<Snapshot>,
    max_depth: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SnapshotHistory {
    /// Creates a new empty history
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
        }
    }

    /// Capture the surface before a new mutating operation. A new edit makes
    /// any pending redo states unreachable, so the redo stack is emptied.
    pub fn snapshot_before_mutation(&mut self, surface: &PixelSurface) {
        if !surface.is_initialized() {
            return;
        }
        push_bounded(&mut self.undo_stack, surface.read(), self.max_depth);
        self.invalidate_redo();
    }

    /// Drop pending redo states. Used directly by committed operations that
    /// changed no pixels and so need no snapshot.
    pub fn invalidate_redo(&mut self) {
        if !self.redo_stack.is_empty() {
            debug!("Discarding {} redo states after new edit", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Restore the most recent undo state. Returns false when there was
    /// nothing to undo.
    pub fn undo(&mut self, surface: &mut PixelSurface) -> PaintResult<bool> {
        Self::swap(&mut self.undo_stack, &mut self.redo_stack, surface, self.max_depth)
    }

    /// Restore the most recent redo state. Returns false when there was
    /// nothing to redo.
    pub fn redo(&mut self, surface: &mut PixelSurface) -> PaintResult<bool> {
        Self::swap(&mut self.redo_stack, &mut self.undo_stack, surface, self.max_depth)
    }

    /// Snapshot, then reset the surface to its background
    pub fn clear(&mut self, surface: &mut PixelSurface) {
        if !surface.is_initialized() {
            return;
        }
        self.snapshot_before_mutation(surface);
        surface.clear();
    }

    /// Re-lay every stored state onto new surface dimensions
    pub fn conform(&mut self, width: u32, height: u32, background: Color32) {
        for snapshot in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            if snapshot.dimensions() != (width, height) {
                *snapshot = snapshot.conformed(width, height, background);
            }
        }
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }


    // Pop `from`, push the current surface onto `to`, write the popped state.
    // The surface is written before any stack changes, so a failed write
    // leaves both stacks and the surface as they were.
    fn swap(
        from: &mut VecDeque<Snapshot>,
        to: &mut VecDeque<Snapshot>,
        surface: &mut PixelSurface,
        max_depth: usize,
    ) -> PaintResult<bool> {
        if !surface.is_initialized() {
            return Ok(false);
        }
        let Some(target) = from.back() else {
            return Ok(false);
        };

        let current = surface.read();
        surface.write(target)?;
        from.pop_back();
        push_bounded(to, current, max_depth);
        Ok(true)
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_depth: usize) {
    stack.push_back(snapshot);
    while stack.len() > max_depth {
        stack.pop_front();
        debug!("History bound {} reached, evicted oldest state", max_depth);
    }
}
