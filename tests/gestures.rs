use std::sync::Arc;

use egui::{Color32, Pos2, pos2};
use parking_lot::Mutex;
use pixel_paint::event::FnHandler;
use pixel_paint::{ActionLog, DrawingSession, EditorEvent, PaintConfig, ShapeMode, Tool, ToolStyle};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn session() -> DrawingSession {
    DrawingSession::with_size(80, 80, &PaintConfig::default())
}

fn record_events(session: &DrawingSession) -> Arc<Mutex<Vec<EditorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    session.subscribe(Box::new(FnHandler(move |event: &EditorEvent| sink.lock().push(event.clone()))));
    events
}

fn background_stroke(session: &mut DrawingSession) {
    let pencil = ToolStyle::default().with_color(Color32::BLUE).with_brush_size(4);
    session.pointer_down(pos2(0.0, 40.0), &pencil);
    session.pointer_move(pos2(80.0, 40.0));
    session.pointer_up(pos2(80.0, 40.0));
}

fn drag(session: &mut DrawingSession, style: &ToolStyle, anchor: Pos2, path: &[Pos2]) {
    session.pointer_down(anchor, style);
    for point in path {
        session.pointer_move(*point);
    }
    if let Some(last) = path.last() {
        session.pointer_up(*last);
    }
}

#[test]
fn test_shape_preview_leaves_no_trace() {
    for tool in [Tool::Rectangle, Tool::Circle, Tool::Line] {
        for mode in [ShapeMode::Outline, ShapeMode::Fill] {
            let style = ToolStyle::default().with_tool(tool).with_shape_mode(mode).with_brush_size(3);

            let mut previewed = session();
            background_stroke(&mut previewed);
            drag(
                &mut previewed,
                &style,
                pos2(10.0, 10.0),
                &[pos2(70.0, 70.0), pos2(5.0, 60.0), pos2(60.0, 2.0), pos2(30.0, 50.0)],
            );

            let mut direct = session();
            background_stroke(&mut direct);
            drag(&mut direct, &style, pos2(10.0, 10.0), &[pos2(30.0, 50.0)]);

            assert_eq!(previewed.surface().read(), direct.surface().read(), "{tool} {mode:?}");
        }
    }
}

#[test]
fn test_shape_action_summarizes_gesture() {
    let mut session = session();
    let log = ActionLog::new();
    session.subscribe(Box::new(log.clone()));
    let style = ToolStyle::new(Tool::Circle, "#FF0000", 4, ShapeMode::Fill).unwrap();

    session.pointer_down(pos2(10.0, 10.0), &style);
    session.pointer_move(pos2(20.0, 20.0));
    let action = session.pointer_up(pos2(50.0, 30.0)).unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(log.last(), Some(action.clone()));
    assert_eq!(action.tool(), Tool::Circle);
    assert_eq!(action.color(), Color32::RED);
    assert_eq!(action.brush_size(), 4);
    assert_eq!(action.shape_mode(), ShapeMode::Fill);
    assert_eq!(action.start(), pos2(10.0, 10.0));
    assert_eq!(action.end(), pos2(50.0, 30.0));
    assert_eq!(action.points(), &[pos2(10.0, 10.0), pos2(50.0, 30.0)]);
    assert_eq!(session.surface().pixel(30, 20), Some([255, 0, 0, 255]));
}

#[test]
fn test_shape_points_are_anchor_and_release() {
    let mut session = session();
    let rect = ToolStyle::default().with_tool(Tool::Rectangle);

    session.pointer_down(pos2(10.0, 10.0), &rect);
    session.pointer_move(pos2(20.0, 20.0));
    session.pointer_move(pos2(30.0, 25.0));
    let action = session.pointer_up(pos2(40.0, 40.0)).unwrap();

    assert_eq!(action.points(), &[pos2(10.0, 10.0), pos2(40.0, 40.0)]);

    let fill = ToolStyle::default().with_tool(Tool::Fill).with_color(Color32::RED);
    let action = session.pointer_down(pos2(60.0, 5.0), &fill).unwrap();
    assert_eq!(action.points(), &[pos2(60.0, 5.0)]);
}

#[test]
fn test_noop_fill_reports_history_change() {
    let mut session = session();
    let fill = ToolStyle::default().with_tool(Tool::Fill).with_color(Color32::BLUE);
    session.pointer_down(pos2(5.0, 5.0), &fill);
    session.undo().unwrap();

    let events = record_events(&session);
    let white = fill.with_color(Color32::WHITE);
    session.pointer_down(pos2(5.0, 5.0), &white);

    let events = events.lock();
    assert!(matches!(
        events.as_slice(),
        [
            EditorEvent::HistoryChanged { can_undo: false, can_redo: false },
            EditorEvent::ActionCommitted(_)
        ]
    ));
}

#[test]
fn test_pointer_leave_aborts_without_action() {
    let mut session = session();
    let events = record_events(&session);
    let pencil = ToolStyle::default().with_brush_size(2);

    session.pointer_down(pos2(5.0, 5.0), &pencil);
    session.pointer_move(pos2(40.0, 5.0));
    session.pointer_leave();

    assert!(!session.is_drawing());
    assert!(session.pointer_up(pos2(40.0, 5.0)).is_none());
    assert_eq!(session.surface().pixel(20, 5), Some(BLACK));

    let events = events.lock();
    assert!(!events.iter().any(|e| matches!(e, EditorEvent::ActionCommitted(_))));
    assert!(events.iter().any(|e| matches!(e, EditorEvent::GestureAborted { tool: Tool::Pencil })));
    drop(events);

    // The pointer-down snapshot still reverts the partial stroke
    assert!(session.undo().unwrap());
    assert_eq!(session.surface().pixel(20, 5), Some(WHITE));
}

#[test]
fn test_second_pointer_down_is_ignored() {
    let mut session = session();
    let pencil = ToolStyle::default().with_brush_size(2);
    session.pointer_down(pos2(5.0, 5.0), &pencil);

    let fill = ToolStyle::default().with_tool(Tool::Fill).with_color(Color32::RED);
    assert!(session.pointer_down(pos2(60.0, 60.0), &fill).is_none());
    assert_eq!(session.surface().pixel(60, 60), Some(WHITE));
    assert_eq!(session.history_len(), 1);

    session.pointer_move(pos2(5.0, 30.0));
    let action = session.pointer_up(pos2(5.0, 30.0)).unwrap();
    assert_eq!(action.tool(), Tool::Pencil);
}

#[test]
fn test_eraser_paints_background() {
    let mut session = session();
    background_stroke(&mut session);
    assert_ne!(session.surface().pixel(40, 40), Some(WHITE));

    let eraser = ToolStyle::default()
        .with_tool(Tool::Eraser)
        .with_color(Color32::RED)
        .with_brush_size(16);
    session.pointer_down(pos2(40.0, 20.0), &eraser);
    session.pointer_move(pos2(40.0, 60.0));
    session.pointer_up(pos2(40.0, 60.0));

    assert_eq!(session.surface().pixel(40, 40), Some(WHITE));
    assert_eq!(session.surface().pixel(10, 40), Some([0, 0, 255, 255]));
}

#[test]
fn test_overlay_tool_emits_request() {
    let mut session = session();
    let events = record_events(&session);

    let select = ToolStyle::default().with_tool(Tool::Select);
    assert!(session.pointer_down(pos2(12.0, 34.0), &select).is_none());

    let events = events.lock();
    assert!(matches!(
        events.as_slice(),
        [EditorEvent::OverlayRequested { tool: Tool::Select, point }] if *point == pos2(12.0, 34.0)
    ));
}

#[test]
fn test_history_events_track_availability() {
    let mut session = session();
    let events = record_events(&session);
    background_stroke(&mut session);
    session.undo().unwrap();

    let history: Vec<(bool, bool)> = events
        .lock()
        .iter()
        .filter_map(|e| match e {
            EditorEvent::HistoryChanged { can_undo, can_redo } => Some((*can_undo, *can_redo)),
            _ => None,
        })
        .collect();
    assert_eq!(history, vec![(true, false), (false, true)]);
}
