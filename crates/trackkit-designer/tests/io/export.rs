use chrono::{TimeZone, Utc};
use tempfile::tempdir;
use trackkit_core::LengthUnit;
use trackkit_designer::{CoordinateExporter, GpxExporter, Point, Pose, TrackBuilder};

fn l_shaped_track() -> TrackBuilder {
    let mut track = TrackBuilder::new(Pose::new(Point::new(0.0, 0.0), 0.0));
    track.append_straight(80.0).unwrap();
    track.set_heading(90.0).unwrap();
    track.append_straight(40.0).unwrap();
    track
}

#[test]
fn test_csv_in_pixels() {
    let track = l_shaped_track();
    let csv = CoordinateExporter::new(LengthUnit::Pixels, 8.0).to_csv(track.sample_points(20));
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "x,y");
    assert_eq!(lines.len(), 1 + 4);
    assert_eq!(lines[1], "0.000000,0.000000");
    assert_eq!(lines[2], "80.000000,0.000000");
    assert_eq!(lines[4], "80.000000,40.000000");
}

#[test]
fn test_csv_in_meters() {
    let track = l_shaped_track();
    let csv = CoordinateExporter::new(LengthUnit::Meters, 8.0).to_csv(track.sample_points(20));
    let last = csv.lines().last().unwrap();
    assert_eq!(last, "10.000000,5.000000");
}

#[test]
fn test_json_pairs() {
    let track = l_shaped_track();
    let json = CoordinateExporter::default()
        .to_json(track.sample_points(20))
        .unwrap();
    let pairs: Vec<[f64; 2]> = serde_json::from_str(&json).unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs[0], [0.0, 0.0]);
    assert!((pairs[3][0] - 80.0).abs() < 1e-9);
    assert!((pairs[3][1] - 40.0).abs() < 1e-9);
}

#[test]
fn test_write_csv_and_json_files() {
    let dir = tempdir().unwrap();
    let track = l_shaped_track();
    let exporter = CoordinateExporter::default();

    let csv_path = dir.path().join("points.csv");
    exporter.write_csv(&csv_path, track.sample_points(20)).unwrap();
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("x,y\n"));

    let json_path = dir.path().join("points.json");
    exporter.write_json(&json_path, track.sample_points(20)).unwrap();
    assert!(std::fs::read_to_string(&json_path).unwrap().starts_with("[["));
}

#[test]
fn test_write_to_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("points.csv");
    let err = CoordinateExporter::default()
        .write_csv(&path, l_shaped_track().sample_points(20))
        .unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_lat_lon_orientation() {
    let gpx = GpxExporter::new(52.0, 13.0, 8.0);

    let (lat, lon) = gpx.to_lat_lon(Point::new(0.0, 0.0));
    assert_eq!((lat, lon), (52.0, 13.0));

    // +x is east
    let (lat, lon) = gpx.to_lat_lon(Point::new(800.0, 0.0));
    assert_eq!(lat, 52.0);
    assert!(lon > 13.0);

    // +y (down the screen) is south; 100 m is roughly 0.0009 degrees of latitude
    let (lat, lon) = gpx.to_lat_lon(Point::new(0.0, 800.0));
    assert_eq!(lon, 13.0);
    assert!(lat < 52.0);
    assert!((52.0 - lat - 100.0 / 111_319.49).abs() < 1e-6);
}

#[test]
fn test_gpx_document() {
    let track = l_shaped_track();
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let gpx = GpxExporter::default()
        .with_track_name("Skid <pad> & loop")
        .to_gpx(track.sample_points(20), time);

    assert!(gpx.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(gpx.contains("<gpx version=\"1.1\""));
    assert!(gpx.contains("<time>2024-03-01T12:00:00Z</time>"));
    assert!(gpx.contains("<name>Skid &lt;pad&gt; &amp; loop</name>"));
    assert_eq!(gpx.matches("<trk>").count(), 1);
    assert_eq!(gpx.matches("<trkseg>").count(), 1);
    assert_eq!(gpx.matches("<trkpt ").count(), 4);
    assert!(gpx.contains("<trkpt lat=\"0.00000000\" lon=\"0.00000000\"></trkpt>"));
}

#[test]
fn test_write_gpx_rejects_polar_origin() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("track.gpx");
    let gpx = GpxExporter::new(90.0, 0.0, 8.0);
    assert!(gpx
        .write_gpx(&path, l_shaped_track().sample_points(20))
        .is_err());
    assert!(!path.exists());

    GpxExporter::default()
        .write_gpx(&path, l_shaped_track().sample_points(20))
        .unwrap();
    assert!(path.exists());
}
