use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::event::{EditorEvent, EventHandler};
use crate::stroke::DrawAction;

/// Records every committed action. Clones share the same log, so the host
/// can keep one handle while the bus owns another.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Arc<Mutex<Vec<DrawAction>>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded actions, oldest first
    pub fn actions(&self) -> Vec<DrawAction> {
        self.actions.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.actions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.lock().is_empty()
    }

    pub fn last(&self) -> Option<DrawAction> {
        self.actions.lock().last().cloned()
    }
}

impl EventHandler for ActionLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        if let EditorEvent::ActionCommitted(action) = event {
            debug!("Action {} committed with {} points", action.tool(), action.points().len());
            self.actions.lock().push(action.clone());
        }
    }
}

/// Forwards every event to a closure
pub struct FnHandler<F>(pub F);

impl<F> EventHandler for FnHandler<F>
where
    F: FnMut(&EditorEvent) + Send,
{
    fn handle_event(&mut self, event: &EditorEvent) {
        (self.0)(event)
    }
}
