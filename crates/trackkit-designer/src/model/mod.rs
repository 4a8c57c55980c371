//! Track data model: plane points, the construction pose, and the closed set of
//! segment variants a track is made of.
//!
//! Coordinates are canvas pixels with +y pointing down the screen. Headings are
//! degrees measured from +x, growing clockwise on screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trackkit_core::TrackError;

mod arc;
mod request;
mod straight;

pub use arc::ArcSegment;
pub use request::{SegmentDefaults, SegmentDraft, SegmentRequest};
pub use straight::StraightSegment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `self + scale * (dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64, scale: f64) -> Point {
        Point::new(self.x + scale * dx, self.y + scale * dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Where the next segment starts and which way it points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    /// Heading in degrees (0 = +x, clockwise on screen).
    pub heading: f64,
}

impl Pose {
    pub fn new(position: Point, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Unit vector pointing along the heading.
    pub fn direction(&self) -> (f64, f64) {
        let rad = self.heading.to_radians();
        (rad.cos(), rad.sin())
    }

    /// Rejects a pose with a non-finite coordinate or heading.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.position.is_finite() && self.heading.is_finite() {
            Ok(())
        } else {
            Err(TrackError::invalid_parameter(
                "pose",
                format!("{self} is not finite"),
            ))
        }
    }

    /// Pose at the centre of a `width` x `height` canvas.
    ///
    /// The centre is integer-divided so a fresh track starts on a whole pixel.
    pub fn canvas_center(width: u32, height: u32, heading: f64) -> Self {
        Self::new(
            Point::new(f64::from(width / 2), f64::from(height / 2)),
            heading,
        )
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.3}°", self.position, self.heading)
    }
}

/// Side an arc turns towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl Default for TurnDirection {
    fn default() -> Self {
        Self::Right
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for TurnDirection {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(TrackError::invalid_parameter(
                "direction",
                format!("expected 'left' or 'right', got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Straight,
    Curve,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight => write!(f, "straight"),
            Self::Curve => write!(f, "curve"),
        }
    }
}

/// A committed piece of track. Immutable once created.
///
/// Serialized as a mapping whose `type` field is `"straight"` or `"curve"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Straight(StraightSegment),
    #[serde(rename = "curve")]
    Arc(ArcSegment),
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Straight(_) => SegmentKind::Straight,
            Segment::Arc(_) => SegmentKind::Curve,
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Segment::Straight(s) => s.start,
            Segment::Arc(a) => a.start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Straight(s) => s.end,
            Segment::Arc(a) => a.end(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Segment::Straight(s) => s.length(),
            Segment::Arc(a) => a.length(),
        }
    }

    /// Turn magnitude in degrees; zero for straights.
    pub fn sweep_degrees(&self) -> f64 {
        match self {
            Segment::Straight(_) => 0.0,
            Segment::Arc(a) => a.sweep_degrees(),
        }
    }

    /// Exit pose derived from the stored geometry alone.
    ///
    /// The builder caches the exit pose it computed at append time; this is
    /// for segments that arrive without that history, such as loaded files.
    pub fn exit_pose(&self) -> Pose {
        match self {
            Segment::Straight(s) => Pose::new(s.end, s.heading()),
            Segment::Arc(a) => Pose::new(a.end(), a.exit_heading()),
        }
    }

    pub fn as_arc(&self) -> Option<&ArcSegment> {
        match self {
            Segment::Arc(a) => Some(a),
            Segment::Straight(_) => None,
        }
    }

    pub fn as_straight(&self) -> Option<&StraightSegment> {
        match self {
            Segment::Straight(s) => Some(s),
            Segment::Arc(_) => None,
        }
    }

    /// Checks the geometry read from an untrusted source.
    pub fn validate(&self) -> Result<(), TrackError> {
        match self {
            Segment::Straight(s) => {
                if !s.start.is_finite() || !s.end.is_finite() {
                    return Err(TrackError::invalid_parameter(
                        "straight",
                        "endpoints must be finite",
                    ));
                }
                Ok(())
            }
            Segment::Arc(a) => {
                TrackError::require_positive("radius", a.radius)?;
                if !a.start.is_finite()
                    || !a.center.is_finite()
                    || !a.start_angle.is_finite()
                    || !a.end_angle.is_finite()
                {
                    return Err(TrackError::invalid_parameter(
                        "curve",
                        "geometry must be finite",
                    ));
                }
                Ok(())
            }
        }
    }
}

impl From<StraightSegment> for Segment {
    fn from(s: StraightSegment) -> Self {
        Segment::Straight(s)
    }
}

impl From<ArcSegment> for Segment {
    fn from(a: ArcSegment) -> Self {
        Segment::Arc(a)
    }
}
