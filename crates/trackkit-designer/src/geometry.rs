//! Segment geometry calculator.
//!
//! Pure functions mapping the current pose and a segment request to the new
//! segment's geometry and the pose the next segment starts from. Nothing here
//! holds state; the track builder commits the results.
//!
//! Conventions (plane coordinates, +y down the screen):
//!
//! ```text
//! direction  d = (cos h, sin h)
//! normal     n = (-sin h, cos h)          d rotated by +90°
//! right turn center = p + R·n   start_angle = h - 90   end_angle = start_angle - θ   exit = h - θ
//! left turn  center = p - R·n   start_angle = h + 90   end_angle = start_angle + θ   exit = h + θ
//! ```
//!
//! The exit position is evaluated on the circle at `end_angle`, so drawing
//! angles and the next segment's start always agree.

use trackkit_core::{normalize_degrees, TrackError};

use crate::model::{ArcSegment, Point, Pose, Segment, StraightSegment, TurnDirection};

/// Result of a geometry computation: the segment plus the pose after it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub segment: Segment,
    pub exit: Pose,
}

/// Computes a straight of `length` from `pose`. Heading is unchanged.
pub fn compute_straight(pose: &Pose, length: f64) -> Result<SegmentGeometry, TrackError> {
    pose.validate()?;
    TrackError::require_positive("length", length)?;

    let (dx, dy) = pose.direction();
    let start = pose.position;
    let end = start.offset(dx, dy, length);

    tracing::debug!(%start, %end, heading = pose.heading, "computed straight");

    Ok(SegmentGeometry {
        segment: Segment::Straight(StraightSegment::new(start, end)),
        exit: Pose::new(end, pose.heading),
    })
}

/// Computes an arc of `sweep_angle` degrees and `radius` turning `direction`.
///
/// `sweep_angle` is a magnitude; the sign of the turn comes from `direction`
/// only. A sweep of 360° closes the loop back onto the entry point.
pub fn compute_arc(
    pose: &Pose,
    direction: TurnDirection,
    sweep_angle: f64,
    radius: f64,
) -> Result<SegmentGeometry, TrackError> {
    pose.validate()?;
    TrackError::require_positive("radius", radius)?;
    TrackError::require_positive("sweep_angle", sweep_angle)?;

    let heading = pose.heading;
    let rad = heading.to_radians();
    let (nx, ny) = (-rad.sin(), rad.cos());
    let start = pose.position;

    let (center, start_angle, end_angle, exit_heading) = match direction {
        TurnDirection::Right => {
            let start_angle = heading - 90.0;
            (
                start.offset(nx, ny, radius),
                start_angle,
                start_angle - sweep_angle,
                normalize_degrees(heading - sweep_angle),
            )
        }
        TurnDirection::Left => {
            let start_angle = heading + 90.0;
            (
                start.offset(nx, ny, -radius),
                start_angle,
                start_angle + sweep_angle,
                normalize_degrees(heading + sweep_angle),
            )
        }
    };

    let arc = ArcSegment {
        start,
        center,
        radius,
        start_angle,
        end_angle,
        direction,
    };
    let exit_position = arc.end();

    tracing::debug!(
        %start,
        %center,
        exit = %exit_position,
        %direction,
        sweep_angle,
        radius,
        exit_heading,
        "computed arc"
    );

    Ok(SegmentGeometry {
        segment: Segment::Arc(arc),
        exit: Pose::new(exit_position, exit_heading),
    })
}

/// Point at `angle` degrees on the circle of `radius` around `center`.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    center.offset(rad.cos(), rad.sin(), radius)
}
