use trackkit_core::TrackError;
use trackkit_designer::geometry::{compute_arc, compute_straight, point_on_circle};
use trackkit_designer::{Point, Pose, Segment, TurnDirection};

const EPS: f64 = 1e-6;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

#[test]
fn test_straight_from_canvas_centre_goes_up() {
    let pose = Pose::new(Point::new(500.0, 400.0), -90.0);
    let geom = compute_straight(&pose, 100.0).unwrap();

    assert!(close(geom.exit.position.x, 500.0));
    assert!(close(geom.exit.position.y, 300.0));
    assert_eq!(geom.exit.heading, -90.0);

    let straight = geom.segment.as_straight().unwrap();
    assert_eq!(straight.start, pose.position);
    assert!(close(straight.length(), 100.0));
}

#[test]
fn test_right_arc_after_straight() {
    let pose = Pose::new(Point::new(500.0, 300.0), -90.0);
    let geom = compute_arc(&pose, TurnDirection::Right, 90.0, 50.0).unwrap();
    let arc = geom.segment.as_arc().unwrap();

    assert!(close(arc.center.x, 550.0));
    assert!(close(arc.center.y, 300.0));
    assert!(close(arc.start_angle, -180.0));
    assert!(close(arc.end_angle, -270.0));
    assert!(close(geom.exit.heading, 180.0));
    assert!(close(geom.exit.position.x, 550.0));
    assert!(close(geom.exit.position.y, 350.0));
}

#[test]
fn test_left_arc_from_origin() {
    let pose = Pose::new(Point::new(0.0, 0.0), 0.0);
    let geom = compute_arc(&pose, TurnDirection::Left, 90.0, 10.0).unwrap();
    let arc = geom.segment.as_arc().unwrap();

    assert!(close(arc.center.x, 0.0));
    assert!(close(arc.center.y, -10.0));
    assert!(close(arc.start_angle, 90.0));
    assert!(close(arc.end_angle, 180.0));
    assert!(close(geom.exit.heading, 90.0));
    assert!(close(geom.exit.position.x, -10.0));
    assert!(close(geom.exit.position.y, -10.0));
}

#[test]
fn test_exit_heading_rule() {
    let headings = [-90.0, 0.0, 37.5, 180.0, 359.0];
    let sweeps = [1.0, 45.0, 90.0, 180.0, 270.0];
    for &h in &headings {
        for &theta in &sweeps {
            let pose = Pose::new(Point::new(0.0, 0.0), h);
            let right = compute_arc(&pose, TurnDirection::Right, theta, 20.0).unwrap();
            let left = compute_arc(&pose, TurnDirection::Left, theta, 20.0).unwrap();
            assert!(close(right.exit.heading, (h - theta).rem_euclid(360.0)));
            assert!(close(left.exit.heading, (h + theta).rem_euclid(360.0)));
        }
    }
}

#[test]
fn test_exit_position_lies_on_circle_at_end_angle() {
    let pose = Pose::new(Point::new(120.0, -40.0), 212.0);
    let geom = compute_arc(&pose, TurnDirection::Right, 133.0, 42.0).unwrap();
    let arc = geom.segment.as_arc().unwrap();

    let expected = point_on_circle(arc.center, arc.radius, arc.end_angle);
    assert_eq!(geom.exit.position, expected);
    assert!(close(arc.center.distance_to(&geom.exit.position), 42.0));
}

#[test]
fn test_full_circle_closes_the_loop() {
    let pose = Pose::new(Point::new(100.0, 100.0), 30.0);
    for direction in [TurnDirection::Left, TurnDirection::Right] {
        let geom = compute_arc(&pose, direction, 360.0, 25.0).unwrap();
        assert!(geom.exit.position.distance_to(&pose.position) < EPS);
        assert!(close(geom.exit.heading, 30.0));
        assert!(close(geom.segment.length(), 2.0 * std::f64::consts::PI * 25.0));
    }
}

#[test]
fn test_arc_length_uses_sweep_in_radians() {
    let pose = Pose::new(Point::new(0.0, 0.0), 0.0);
    let geom = compute_arc(&pose, TurnDirection::Left, 90.0, 20.0).unwrap();
    assert!(close(geom.segment.length(), 20.0 * std::f64::consts::FRAC_PI_2));
    assert!(close(geom.segment.sweep_degrees(), 90.0));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let pose = Pose::new(Point::new(0.0, 0.0), 0.0);

    for length in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = compute_straight(&pose, length).unwrap_err();
        assert!(matches!(err, TrackError::InvalidParameter { ref param, .. } if param == "length"));
    }

    let err = compute_arc(&pose, TurnDirection::Left, 90.0, 0.0).unwrap_err();
    assert!(matches!(err, TrackError::InvalidParameter { ref param, .. } if param == "radius"));

    let err = compute_arc(&pose, TurnDirection::Right, -90.0, 10.0).unwrap_err();
    assert!(
        matches!(err, TrackError::InvalidParameter { ref param, .. } if param == "sweep_angle")
    );
}

#[test]
fn test_exit_pose_from_stored_geometry_matches_computed_exit() {
    let pose = Pose::new(Point::new(10.0, 10.0), 75.0);
    let geom = compute_arc(&pose, TurnDirection::Right, 60.0, 35.0).unwrap();
    let derived = geom.segment.exit_pose();
    assert!(derived.position.distance_to(&geom.exit.position) < EPS);
    assert!(close(derived.heading, geom.exit.heading));

    let geom = compute_straight(&pose, 40.0).unwrap();
    assert!(matches!(geom.segment, Segment::Straight(_)));
    assert!(close(geom.segment.exit_pose().heading, 75.0));
}
