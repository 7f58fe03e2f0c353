use egui::Pos2;
use log::{debug, info, warn};

use crate::command::{Command, SnapshotHistory};
use crate::config::PaintConfig;
use crate::error::PaintResult;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::export;
use crate::fill::{self, FillOptions};
use crate::geometry::{self, LineCap};
use crate::input::{GestureSession, GestureState};
use crate::stroke::{ActionBuilder, DrawAction};
use crate::surface::PixelSurface;
use crate::tools::{Tool, ToolStyle};

/// One drawing canvas: the pixel surface, its undo/redo history and the
/// gesture state machine. All mutation of the surface goes through here.
#[derive(Debug)]
pub struct DrawingSession {
    surface: PixelSurface,
    history: SnapshotHistory,
    gesture: GestureState,
    events: EventBus,
    fill_options: FillOptions,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(&PaintConfig::default())
    }
}

impl DrawingSession {
    /// A session whose surface waits for its first resize
    pub fn new(config: &PaintConfig) -> Self {
        Self {
            surface: PixelSurface::new(config.background),
            history: SnapshotHistory::new(config.history_depth),
            gesture: GestureState::Idle,
            events: EventBus::new(),
            fill_options: config.fill_options(),
        }
    }

    pub fn with_size(width: u32, height: u32, config: &PaintConfig) -> Self {
        let mut session = Self::new(config);
        session.surface.resize(width, height);
        session
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Begin a gesture at `point`. Fill and overlay tools complete
    /// immediately; fill returns its action here.
    pub fn pointer_down(&mut self, point: Pos2, style: &ToolStyle) -> Option<DrawAction> {
        if !self.surface.is_initialized() {
            debug!("Pointer down ignored, surface is not initialized");
            return None;
        }
        if self.gesture.is_active() {
            warn!("Pointer down at {:?} ignored, a {} gesture is already active", point, self.gesture.name());
            return None;
        }

        match style.tool {
            Tool::Fill => Some(self.apply_fill(point, style)),
            tool if tool.is_overlay() => {
                debug!("Overlay tool {} requested at {:?}", tool, point);
                self.events.emit(EditorEvent::OverlayRequested { tool, point });
                None
            }
            tool => {
                self.snapshot_before_mutation();
                let baseline = tool.is_shape().then(|| self.surface.read());
                self.gesture = GestureState::Active(GestureSession::new(*style, point, baseline));
                debug!("Began {} gesture at {:?}", tool, point);
                None
            }
        }
    }

    pub fn pointer_move(&mut self, point: Pos2) {
        let GestureState::Active(session) = &mut self.gesture else {
            return;
        };
        let style = *session.style();

        if style.tool.is_freehand() {
            let color = match style.tool {
                Tool::Eraser => self.surface.background(),
                _ => style.color,
            };
            geometry::stroke_segment(
                &mut self.surface,
                session.last_point(),
                point,
                color,
                style.brush_size as f32,
                LineCap::Round,
            );
            session.add_point(point);
        } else if style.tool.is_shape() {
            if let Err(err) = redraw_preview(&mut self.surface, session, point) {
                warn!("Aborting {} gesture, preview restore failed: {}", style.tool, err);
                self.abort_gesture();
            }
        }
    }

    /// Finish the active gesture at `point` and emit its action
    pub fn pointer_up(&mut self, point: Pos2) -> Option<DrawAction> {
        let mut session = self.gesture.take()?;
        let tool = session.style().tool;

        if tool.is_shape() {
            if let Err(err) = redraw_preview(&mut self.surface, &session, point) {
                warn!("Dropping {} gesture, final restore failed: {}", tool, err);
                self.events.emit(EditorEvent::GestureAborted { tool });
                return None;
            }
            session.add_point(point);
        }

        let action = session.into_builder().finish(point);
        info!("Committed {} action with {} points", tool, action.points().len());
        self.commit(action.clone());
        Some(action)
    }

    /// Abandon the active gesture. Pixels already drawn stay on the surface
    /// and the pointer-down snapshot stays on the history stack.
    pub fn pointer_leave(&mut self) {
        if self.gesture.is_active() {
            self.abort_gesture();
        }
    }

    pub fn undo(&mut self) -> PaintResult<bool> {
        self.finish_gesture_for_command();
        let changed = self.history.undo(&mut self.surface)?;
        if changed {
            debug!("Undo, {} states left", self.history.undo_len());
            self.emit_history();
        }
        Ok(changed)
    }

    pub fn redo(&mut self) -> PaintResult<bool> {
        self.finish_gesture_for_command();
        let changed = self.history.redo(&mut self.surface)?;
        if changed {
            debug!("Redo, {} states left", self.history.redo_len());
            self.emit_history();
        }
        Ok(changed)
    }

    /// Reset the surface to its background, undoably
    pub fn clear(&mut self) {
        if !self.surface.is_initialized() {
            return;
        }
        self.finish_gesture_for_command();
        self.history.clear(&mut self.surface);
        info!("Cleared {}x{} surface", self.surface.width(), self.surface.height());
        self.events.emit(EditorEvent::SurfaceCleared);
        self.emit_history();
    }

    /// React to a container size change. Stored history states are laid onto
    /// the new dimensions so undo keeps working afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to {}x{}", width, height);
            return;
        }
        if self.surface.is_initialized() && (self.surface.width(), self.surface.height()) == (width, height) {
            return;
        }
        self.finish_gesture_for_command();
        self.surface.resize(width, height);
        self.history.conform(width, height, self.surface.background());
        self.events.emit(EditorEvent::SurfaceResized { width, height });
    }

    /// SVG document for the current surface, `None` when there is nothing to
    /// export yet
    pub fn export_svg(&self) -> PaintResult<Option<String>> {
        let svg = export::export_svg(&self.surface)?;
        if let Some(svg) = &svg {
            info!("Exported {}x{} surface", self.surface.width(), self.surface.height());
            self.events.emit(EditorEvent::Exported { bytes: svg.len() });
        }
        Ok(svg)
    }

    /// Run a host trigger. Only [`Command::Export`] produces output.
    pub fn execute(&mut self, command: Command) -> PaintResult<Option<String>> {
        debug!("Executing {:?}", command);
        match command {
            Command::Undo => self.undo().map(|_| None),
            Command::Redo => self.redo().map(|_| None),
            Command::Clear => {
                self.clear();
                Ok(None)
            }
            Command::Resize { width, height } => {
                self.resize(width, height);
                Ok(None)
            }
            Command::Export => self.export_svg(),
        }
    }

    fn apply_fill(&mut self, point: Pos2, style: &ToolStyle) -> DrawAction {
        if fill::needs_fill(&self.surface, point, style.color, self.fill_options) {
            self.snapshot_before_mutation();
            fill::flood_fill(&mut self.surface, point, style.color, self.fill_options);
        } else {
            debug!("Fill at {:?} changes nothing, no snapshot taken", point);
            self.history.invalidate_redo();
            self.emit_history();
        }

        let action = ActionBuilder::new(*style, point).finish(point);
        self.commit(action.clone());
        action
    }

    fn snapshot_before_mutation(&mut self) {
        self.history.snapshot_before_mutation(&self.surface);
        self.emit_history();
    }

    fn commit(&self, action: DrawAction) {
        self.events.emit(EditorEvent::ActionCommitted(action));
    }

    fn abort_gesture(&mut self) {
        if let Some(session) = self.gesture.take() {
            let tool = session.style().tool;
            info!("Aborted {} gesture after {} points", tool, session.points().len());
            self.events.emit(EditorEvent::GestureAborted { tool });
        }
    }

    /// Commands arrive from the host between gestures; one arriving mid-gesture
    /// abandons the gesture first so its preview baseline can not be replayed
    /// over the command's result.
    fn finish_gesture_for_command(&mut self) {
        if self.gesture.is_active() {
            self.abort_gesture();
        }
    }

    fn emit_history(&self) {
        self.events.emit(EditorEvent::HistoryChanged {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}

fn redraw_preview(surface: &mut PixelSurface, session: &GestureSession, point: Pos2) -> PaintResult<()> {
    if let Some(baseline) = session.preview_baseline() {
        surface.write(baseline)?;
    }
    geometry::draw_shape(surface, session.style(), session.anchor(), point);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ActionLog;
    use crate::tools::ShapeMode;
    use egui::{Color32, pos2};

    fn session() -> DrawingSession {
        DrawingSession::with_size(60, 60, &PaintConfig::default())
    }

    fn pencil() -> ToolStyle {
        ToolStyle::default().with_tool(Tool::Pencil).with_brush_size(2)
    }

    #[test]
    fn test_uninitialized_session_ignores_everything() {
        let mut session = DrawingSession::default();
        assert!(session.pointer_down(pos2(1.0, 1.0), &pencil()).is_none());
        assert!(!session.is_drawing());
        assert!(!session.can_undo());
        assert!(session.export_svg().unwrap().is_none());
        session.clear();
        assert!(!session.can_undo());
    }

    #[test]
    fn test_pencil_gesture_commits_one_action() {
        let mut session = session();
        let log = ActionLog::new();
        session.subscribe(Box::new(log.clone()));

        assert!(session.pointer_down(pos2(5.0, 5.0), &pencil()).is_none());
        assert!(session.is_drawing());
        session.pointer_move(pos2(20.0, 5.0));
        session.pointer_move(pos2(20.0, 20.0));
        let action = session.pointer_up(pos2(20.0, 20.0)).unwrap();

        assert!(!session.is_drawing());
        assert_eq!(action.tool(), Tool::Pencil);
        assert_eq!(action.start(), pos2(5.0, 5.0));
        assert_eq!(action.end(), pos2(20.0, 20.0));
        assert_eq!(action.points(), &[pos2(5.0, 5.0), pos2(20.0, 5.0), pos2(20.0, 20.0)]);
        assert_eq!(log.len(), 1);
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.surface().pixel(12, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_pointer_up_while_idle_is_ignored() {
        let mut session = session();
        assert!(session.pointer_up(pos2(3.0, 3.0)).is_none());
        session.pointer_move(pos2(4.0, 4.0));
        assert_eq!(session.surface().pixel(4, 4), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_overlay_tool_does_not_touch_surface() {
        let mut session = session();
        let before = session.surface().read();
        let style = ToolStyle::default().with_tool(Tool::Shape3d);

        assert!(session.pointer_down(pos2(10.0, 10.0), &style).is_none());
        assert!(!session.is_drawing());
        assert!(!session.can_undo());
        assert_eq!(session.surface().read(), before);
    }

    #[test]
    fn test_command_mid_gesture_aborts_it() {
        let mut session = session();
        let rect = ToolStyle::default()
            .with_tool(Tool::Rectangle)
            .with_shape_mode(ShapeMode::Fill);
        session.pointer_down(pos2(5.0, 5.0), &rect);
        session.pointer_move(pos2(30.0, 30.0));

        session.execute(Command::Clear).unwrap();
        assert!(!session.is_drawing());
        assert!(session.pointer_up(pos2(40.0, 40.0)).is_none());
        assert_eq!(session.surface().pixel(20, 20), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_resize_keeps_history_usable() {
        let mut session = session();
        let fill = ToolStyle::default().with_tool(Tool::Fill).with_color(Color32::RED);
        session.pointer_down(pos2(1.0, 1.0), &fill);

        session.resize(80, 40);
        assert_eq!(session.surface().width(), 80);
        assert_eq!(session.surface().pixel(70, 10), Some([255, 255, 255, 255]));
        assert_eq!(session.surface().pixel(10, 10), Some([255, 0, 0, 255]));

        assert!(session.undo().unwrap());
        assert_eq!(session.surface().pixel(10, 10), Some([255, 255, 255, 255]));
        assert!(session.redo().unwrap());
        assert_eq!(session.surface().pixel(10, 10), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_execute_export_returns_document() {
        let mut session = session();
        let svg = session.execute(Command::Export).unwrap().unwrap();
        assert!(svg.contains(r#"width="60""#));
        assert!(session.execute(Command::Undo).unwrap().is_none());
    }
}
