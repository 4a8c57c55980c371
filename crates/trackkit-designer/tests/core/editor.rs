use trackkit_core::TrackError;
use trackkit_designer::{
    EditorMode, Point, Pose, SegmentRequest, TrackBuilder, TrackEditor, TurnDirection, Viewport,
};

const EPS: f64 = 1e-9;

fn editor() -> TrackEditor {
    TrackEditor::new(
        TrackBuilder::new(Pose::new(Point::new(600.0, 400.0), -90.0)),
        Viewport::new(1200.0, 800.0),
    )
}

#[test]
fn test_new_editor_is_idle_and_clean() {
    let editor = editor();
    assert_eq!(editor.mode(), EditorMode::Idle);
    assert!(!editor.is_modified);
    assert_eq!(editor.display_name(), "Untitled");
    assert_eq!(editor.start_heading(), -90.0);
}

#[test]
fn test_start_point_selection_clears_track() {
    let mut editor = editor();
    editor.append_straight(50.0).unwrap();
    editor.append_arc(TurnDirection::Left, 90.0, 30.0).unwrap();

    editor.begin_start_point_selection();
    assert_eq!(editor.mode(), EditorMode::AwaitingStartPoint);
    assert!(editor.segments().is_empty());
    assert!(!editor.builder().can_undo());
}

#[test]
fn test_appends_rejected_while_awaiting_start_point() {
    let mut editor = editor();
    editor.begin_start_point_selection();

    let err = editor.append_straight(10.0).unwrap_err();
    assert!(matches!(err, TrackError::InvalidMode { .. }));
    assert!(editor
        .append_arc(TurnDirection::Right, 90.0, 10.0)
        .is_err());
    assert!(editor.apply(&SegmentRequest::straight(10.0)).is_err());
    assert!(editor.segments().is_empty());
}

#[test]
fn test_pointer_places_start_point_through_viewport() {
    let mut editor = editor();
    editor.viewport.set_zoom(2.0);
    editor.viewport.set_offset(100.0, 50.0);

    editor.begin_start_point_selection();
    assert!(editor.pointer_pressed(300.0, 250.0));

    let pose = editor.current_pose();
    assert_eq!(pose.position, Point::new(100.0, 100.0));
    assert_eq!(pose.heading, -90.0);
    assert_eq!(editor.mode(), EditorMode::Idle);

    editor.append_straight(20.0).unwrap();
    assert_eq!(editor.segments()[0].start(), Point::new(100.0, 100.0));

    // Undoing the first segment returns to the placed start point.
    editor.undo();
    assert_eq!(editor.current_pose().position, Point::new(100.0, 100.0));
}

#[test]
fn test_non_finite_pointer_keeps_waiting_for_start_point() {
    let mut editor = editor();
    editor.begin_start_point_selection();

    assert!(!editor.pointer_pressed(f64::NAN, 10.0));
    assert_eq!(editor.mode(), EditorMode::AwaitingStartPoint);
    assert_eq!(editor.current_pose(), Pose::new(Point::new(600.0, 400.0), -90.0));

    assert!(editor.pointer_pressed(10.0, 10.0));
    assert_eq!(editor.current_pose().position, Point::new(10.0, 10.0));
}

#[test]
fn test_pointer_aims_heading() {
    let mut editor = editor();
    editor.begin_heading_selection();
    assert_eq!(editor.mode(), EditorMode::AwaitingAngleHeading);

    // Straight down the screen from (600, 400).
    assert!(editor.pointer_pressed(600.0, 500.0));
    assert!((editor.current_pose().heading - 90.0).abs() < EPS);
    assert_eq!(editor.current_pose().position, Point::new(600.0, 400.0));
    assert_eq!(editor.mode(), EditorMode::Idle);

    editor.begin_heading_selection();
    assert!(editor.pointer_pressed(500.0, 400.0));
    assert!((editor.current_pose().heading - 180.0).abs() < EPS);
}

#[test]
fn test_pointer_in_idle_does_nothing() {
    let mut editor = editor();
    let before = editor.current_pose();
    assert!(!editor.pointer_pressed(10.0, 10.0));
    assert_eq!(editor.current_pose(), before);
    assert!(!editor.is_modified);
}

#[test]
fn test_cancel_selection() {
    let mut editor = editor();
    editor.begin_heading_selection();
    editor.cancel_selection();
    assert_eq!(editor.mode(), EditorMode::Idle);
    assert!(!editor.pointer_pressed(0.0, 0.0));
}

#[test]
fn test_heading_from_text() {
    let mut editor = editor();
    assert_eq!(editor.set_heading_from_text(" -45.5 ").unwrap(), -45.5);
    assert_eq!(editor.current_pose().heading, -45.5);

    let before = editor.current_pose();
    let err = editor.set_heading_from_text("north").unwrap_err();
    assert!(matches!(err, TrackError::InvalidParameter { ref param, .. } if param == "heading"));
    assert!(editor.set_heading_from_text("inf").is_err());
    assert_eq!(editor.current_pose(), before);
}

#[test]
fn test_modified_flag_and_display_name() {
    let mut editor = editor();
    editor.track_name = "Oval".to_string();
    assert_eq!(editor.display_name(), "Oval");

    editor.append_straight(10.0).unwrap();
    assert_eq!(editor.display_name(), "Oval*");

    editor.current_file_path = Some("/tmp/tracks/oval.json".into());
    assert_eq!(editor.display_name(), "oval.json*");
}

#[test]
fn test_undo_on_empty_editor_keeps_clean_state() {
    let mut editor = editor();
    assert!(editor.undo().is_none());
    assert!(!editor.is_modified);
}

#[test]
fn test_new_track_resets_session() {
    let mut editor = editor();
    editor.append_straight(10.0).unwrap();
    editor.description = "practice loop".to_string();
    editor.current_file_path = Some("loop.json".into());
    editor.viewport.set_zoom(3.0);
    editor.begin_heading_selection();

    editor.new_track();

    assert!(editor.segments().is_empty());
    assert_eq!(editor.mode(), EditorMode::Idle);
    assert!(editor.description.is_empty());
    assert!(editor.current_file_path.is_none());
    assert!(!editor.is_modified);
    assert_eq!(editor.viewport.zoom(), 1.0);
    assert_eq!(editor.display_name(), "Untitled");
}

#[test]
fn test_fit_to_track() {
    let mut editor = editor();
    assert!(!editor.fit_to_track(20));

    editor.append_straight(200.0).unwrap();
    editor.append_arc(TurnDirection::Right, 180.0, 100.0).unwrap();
    assert!(editor.fit_to_track(20));

    let bounds = editor.builder().bounds(20).unwrap();
    let (left, top) = editor
        .viewport
        .world_to_screen(&Point::new(bounds.min_x, bounds.min_y));
    let (right, bottom) = editor
        .viewport
        .world_to_screen(&Point::new(bounds.max_x, bounds.max_y));
    assert!(left >= 60.0 - 1e-6 && right <= 1140.0 + 1e-6);
    assert!(top >= 40.0 - 1e-6 && bottom <= 760.0 + 1e-6);
}
