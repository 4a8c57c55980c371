use tempfile::tempdir;
use trackkit_designer::serialization::{TrackFile, ViewportState};
use trackkit_designer::{
    Point, Pose, Segment, TrackBuilder, TrackEditor, TurnDirection, Viewport,
};

const EPS: f64 = 1e-9;

fn sample_track() -> TrackBuilder {
    let mut track = TrackBuilder::new(Pose::new(Point::new(600.0, 400.0), -90.0));
    track.append_straight(100.0).unwrap();
    track.append_arc(TurnDirection::Right, 90.0, 50.0).unwrap();
    track.append_arc(TurnDirection::Left, 45.0, 30.0).unwrap();
    track
}

#[test]
fn test_create_new_track_file() {
    let file = TrackFile::new("Test Track", Pose::new(Point::new(0.0, 0.0), 0.0));
    assert_eq!(file.version, "1.0");
    assert_eq!(file.metadata.name, "Test Track");
    assert!(file.segments.is_empty());
    assert_eq!(file.metadata.created, file.metadata.modified);
}

#[test]
fn test_segments_carry_type_discriminator() {
    let file = TrackFile::from_builder("Tagged", &sample_track());
    let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
    let segments = value["segments"].as_array().unwrap();

    assert_eq!(segments[0]["type"], "straight");
    assert!(segments[0].get("end").is_some());
    assert_eq!(segments[1]["type"], "curve");
    assert_eq!(segments[1]["direction"], "right");
    assert_eq!(segments[1]["radius"], 50.0);
    assert!(segments[1].get("center").is_some());
    assert!(segments[1].get("start_angle").is_some());
    assert!(segments[1].get("end_angle").is_some());
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.json");

    let track = sample_track();
    let mut file = TrackFile::from_builder("Loop", &track);
    file.metadata.description = "two turns".to_string();
    file.viewport = ViewportState {
        zoom: 1.5,
        offset_x: -20.0,
        offset_y: 10.0,
    };
    file.save_to_file(&path).unwrap();

    let loaded = TrackFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.metadata.id, file.metadata.id);
    assert_eq!(loaded.metadata.name, "Loop");
    assert_eq!(loaded.metadata.description, "two turns");
    assert_eq!(loaded.segments, track.segments().to_vec());
    assert_eq!(loaded.viewport.zoom, 1.5);
    assert!(loaded.metadata.modified >= file.metadata.modified);
}

#[test]
fn test_to_builder_restores_pose_and_length() {
    let track = sample_track();
    let file = TrackFile::from_builder("Loop", &track);
    let rebuilt = file.to_builder().unwrap();

    assert_eq!(rebuilt.len(), 3);
    assert_eq!(rebuilt.initial_pose(), track.initial_pose());
    assert_eq!(rebuilt.current_pose(), track.current_pose());
    assert!((rebuilt.total_length() - track.total_length()).abs() < EPS);
}

#[test]
fn test_to_builder_keeps_pose_set_after_last_segment() {
    let mut track = sample_track();
    track.set_pose(Point::new(10.0, 20.0), 33.0).unwrap();
    let rebuilt = TrackFile::from_builder("Moved", &track).to_builder().unwrap();
    assert_eq!(rebuilt.current_pose(), Pose::new(Point::new(10.0, 20.0), 33.0));
}

#[test]
fn test_invalid_segment_geometry_is_rejected() {
    let mut file = TrackFile::from_builder("Broken", &sample_track());
    if let Segment::Arc(arc) = &mut file.segments[1] {
        arc.radius = -4.0;
    }
    assert!(file.to_builder().is_err());
}

#[test]
fn test_version_mismatch_still_loads() {
    let mut file = TrackFile::from_builder("Old", &sample_track());
    file.version = "0.9".to_string();
    let json = file.to_json().unwrap();
    let parsed = TrackFile::from_json(&json).unwrap();
    assert_eq!(parsed.version, "0.9");
    assert_eq!(parsed.segments.len(), 3);
}

#[test]
fn test_minimal_file_uses_defaults() {
    let json = r#"{
        "version": "1.0",
        "metadata": {
            "name": "Hand written",
            "created": "2024-05-01T10:00:00Z",
            "modified": "2024-05-01T10:00:00Z"
        },
        "initial_pose": {"position": {"x": 0.0, "y": 0.0}, "heading": 0.0},
        "pose": {"position": {"x": 50.0, "y": 0.0}, "heading": 0.0},
        "segments": [
            {"type": "straight", "start": {"x": 0.0, "y": 0.0}, "end": {"x": 50.0, "y": 0.0}}
        ]
    }"#;
    let file = TrackFile::from_json(json).unwrap();
    assert_eq!(file.viewport.zoom, 1.0);
    assert!(file.metadata.background_image.is_none());

    let builder = file.to_builder().unwrap();
    assert!((builder.total_length() - 50.0).abs() < EPS);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(TrackFile::load_from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_editor_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut editor = TrackEditor::new(sample_track(), Viewport::new(1200.0, 800.0));
    editor.track_name = "Session".to_string();
    editor.description = "editor round trip".to_string();
    editor.background_image = Some("aerial.png".into());
    editor.viewport.set_zoom(2.0);
    editor.mark_modified();

    editor.save_to_file(&path).unwrap();
    assert!(!editor.is_modified);
    assert_eq!(editor.display_name(), "session.json");

    let mut other = TrackEditor::default();
    other.load_from_file(&path).unwrap();
    assert_eq!(other.segments(), editor.segments());
    assert_eq!(other.current_pose(), editor.current_pose());
    assert_eq!(other.track_name, "Session");
    assert_eq!(other.description, "editor round trip");
    assert_eq!(other.background_image, Some("aerial.png".into()));
    assert_eq!(other.viewport.zoom(), 2.0);
    assert!(!other.is_modified);
}

#[test]
fn test_editor_load_failure_keeps_session() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut editor = TrackEditor::new(sample_track(), Viewport::default());
    assert!(editor.load_from_file(&path).is_err());
    assert_eq!(editor.segments().len(), 3);
    assert!(editor.current_file_path.is_none());
}
