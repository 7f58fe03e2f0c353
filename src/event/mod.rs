use std::cell::RefCell;

mod events;
mod handlers;

pub use events::EditorEvent;
pub use handlers::{ActionLog, FnHandler};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

/// Broadcasts editor events to every subscribed handler, in subscription
/// order. Owned by a single drawing session.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn emit(&self, event: EditorEvent) {
        log::trace!("Emitting {:?}", event);
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }
}
