//! Point sampling along a committed track, and the bounds derived from it.

use std::fmt;

use crate::model::{Point, Segment};

/// Lazy, restartable walk over the points approximating a track.
///
/// Straights contribute their two endpoints. Arcs contribute `resolution`
/// points at evenly spaced angles from `start_angle` to `end_angle`, both
/// ends included.
#[derive(Debug, Clone)]
pub struct TrackPoints<'a> {
    segments: &'a [Segment],
    resolution: usize,
    segment_index: usize,
    sample_index: usize,
}

impl<'a> TrackPoints<'a> {
    pub fn new(segments: &'a [Segment], resolution: usize) -> Self {
        Self {
            segments,
            resolution,
            segment_index: 0,
            sample_index: 0,
        }
    }

    fn samples_for(&self, segment: &Segment) -> usize {
        match segment {
            Segment::Straight(_) => 2,
            Segment::Arc(_) => self.resolution,
        }
    }

    fn sample(&self, segment: &Segment, index: usize) -> Point {
        match segment {
            Segment::Straight(s) => {
                if index == 0 {
                    s.start
                } else {
                    s.end
                }
            }
            Segment::Arc(a) => {
                let angle = if self.resolution <= 1 {
                    a.start_angle
                } else {
                    let t = index as f64 / (self.resolution - 1) as f64;
                    a.start_angle + (a.end_angle - a.start_angle) * t
                };
                a.point_at_angle(angle)
            }
        }
    }

    fn remaining(&self) -> usize {
        let mut count = 0;
        for (i, segment) in self.segments.iter().enumerate().skip(self.segment_index) {
            let total = self.samples_for(segment);
            count += if i == self.segment_index {
                total.saturating_sub(self.sample_index)
            } else {
                total
            };
        }
        count
    }
}

impl Iterator for TrackPoints<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while let Some(segment) = self.segments.get(self.segment_index) {
            if self.sample_index < self.samples_for(segment) {
                let point = self.sample(segment, self.sample_index);
                self.sample_index += 1;
                return Some(point);
            }
            self.segment_index += 1;
            self.sample_index = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for TrackPoints<'_> {}

/// Axis-aligned bounding box in plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing every point; `None` when there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds::new(p.x, p.y, p.x, p.y),
                Some(b) => Bounds::new(
                    b.min_x.min(p.x),
                    b.min_y.min(p.y),
                    b.max_x.max(p.x),
                    b.max_y.max(p.y),
                ),
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// True when the box lies inside a `width` x `height` canvas shrunk by
    /// `margin` on every side.
    pub fn fits_within(&self, width: f64, height: f64, margin: f64) -> bool {
        self.min_x >= margin
            && self.min_y >= margin
            && self.max_x <= width - margin
            && self.max_y <= height - margin
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x({:.1}, {:.1}), y({:.1}, {:.1})",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
