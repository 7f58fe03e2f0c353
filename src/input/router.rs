use crate::session::DrawingSession;
use crate::stroke::DrawAction;
use crate::tools::ToolStyle;

use super::InputEvent;

/// Routes an input event to the matching gesture operation of the session.
/// Returns the action if the event committed one.
pub fn route_event(event: &InputEvent, session: &mut DrawingSession, style: &ToolStyle) -> Option<DrawAction> {
    match *event {
        InputEvent::PointerDown { position } => session.pointer_down(position, style),
        InputEvent::PointerMove { position } => {
            session.pointer_move(position);
            None
        }
        InputEvent::PointerUp { position } => session.pointer_up(position),
        InputEvent::PointerLeave => {
            session.pointer_leave();
            None
        }
    }
}
