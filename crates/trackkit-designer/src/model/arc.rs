use serde::{Deserialize, Serialize};

use trackkit_core::normalize_degrees;

use super::{Point, TurnDirection};
use crate::geometry::point_on_circle;

/// A circular-arc segment.
///
/// `start_angle` and `end_angle` are the angular positions (degrees, measured
/// from `center` in plane coordinates) of the entry and exit points. Right
/// turns sweep towards smaller angles, left turns towards larger ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub start: Point,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub direction: TurnDirection,
}

impl ArcSegment {
    /// Signed sweep from `start_angle` to `end_angle` in degrees.
    pub fn signed_sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Sweep magnitude in degrees.
    pub fn sweep_degrees(&self) -> f64 {
        self.signed_sweep().abs()
    }

    /// Arc length: radius times the sweep in radians.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep_degrees().to_radians()
    }

    /// Point on the supporting circle at `angle` degrees.
    pub fn point_at_angle(&self, angle: f64) -> Point {
        point_on_circle(self.center, self.radius, angle)
    }

    /// Exit point, evaluated on the circle at `end_angle`.
    pub fn end(&self) -> Point {
        self.point_at_angle(self.end_angle)
    }

    /// Heading at the exit point, recovered from `end_angle`.
    pub fn exit_heading(&self) -> f64 {
        match self.direction {
            TurnDirection::Right => normalize_degrees(self.end_angle + 90.0),
            TurnDirection::Left => normalize_degrees(self.end_angle - 90.0),
        }
    }
}
