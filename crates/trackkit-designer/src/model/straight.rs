use serde::{Deserialize, Serialize};

use trackkit_core::heading_of;

use super::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightSegment {
    pub start: Point,
    pub end: Point,
}

impl StraightSegment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Direction from start to end in degrees.
    pub fn heading(&self) -> f64 {
        heading_of(self.end.x - self.start.x, self.end.y - self.start.y)
    }

    /// Point at parameter `t` in `[0, 1]` along the segment.
    pub fn point_at(&self, t: f64) -> Point {
        Point::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        )
    }
}
