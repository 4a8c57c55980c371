//! Track builder: the ordered segment list, the current pose and the undo log.
//!
//! All structural mutation goes through here. Geometry is delegated to
//! [`crate::geometry`]; the builder commits the result, advances the pose and
//! records the append so it can be reversed exactly.

mod history;
mod sampling;

pub use history::{UndoEntry, UndoLog};
pub use sampling::{Bounds, TrackPoints};

use trackkit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_INITIAL_HEADING,
};
use trackkit_core::TrackError;

use crate::geometry::{self, SegmentGeometry};
use crate::model::{Point, Pose, Segment, SegmentRequest, TurnDirection};

#[derive(Debug, Clone)]
pub struct TrackBuilder {
    initial_pose: Pose,
    pose: Pose,
    segments: Vec<Segment>,
    history: UndoLog,
    total_length: f64,
}

impl TrackBuilder {
    /// Creates an empty track starting at `initial_pose`.
    pub fn new(initial_pose: Pose) -> Self {
        Self {
            initial_pose,
            pose: initial_pose,
            segments: Vec::new(),
            history: UndoLog::new(),
            total_length: 0.0,
        }
    }

    /// Creates an empty track starting at the centre of a canvas.
    pub fn for_canvas(width: u32, height: u32, heading: f64) -> Self {
        Self::new(Pose::canvas_center(width, height, heading))
    }

    /// Rebuilds a track from stored segments without replaying pose history.
    ///
    /// Exit poses are derived from each segment's geometry. The current pose
    /// ends up at the last segment's exit, or at `initial_pose` when empty.
    pub fn from_segments(
        initial_pose: Pose,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Result<Self, TrackError> {
        let mut builder = Self::new(initial_pose);
        for segment in segments {
            segment.validate()?;
            let exit = segment.exit_pose();
            builder.commit(SegmentGeometry { segment, exit });
        }
        tracing::debug!(
            segments = builder.len(),
            total_length = builder.total_length,
            "rebuilt track from stored segments"
        );
        Ok(builder)
    }

    /// Appends a straight of `length` along the current heading.
    pub fn append_straight(&mut self, length: f64) -> Result<Segment, TrackError> {
        let geometry = geometry::compute_straight(&self.pose, length)?;
        Ok(self.commit(geometry))
    }

    /// Appends an arc turning `direction` by `sweep_angle` degrees.
    pub fn append_arc(
        &mut self,
        direction: TurnDirection,
        sweep_angle: f64,
        radius: f64,
    ) -> Result<Segment, TrackError> {
        let geometry = geometry::compute_arc(&self.pose, direction, sweep_angle, radius)?;
        Ok(self.commit(geometry))
    }

    /// Appends the segment described by `request`.
    pub fn apply(&mut self, request: &SegmentRequest) -> Result<Segment, TrackError> {
        match *request {
            SegmentRequest::Straight { length } => self.append_straight(length),
            SegmentRequest::Curve {
                direction,
                angle,
                radius,
            } => self.append_arc(direction, angle, radius),
        }
    }

    fn commit(&mut self, geometry: SegmentGeometry) -> Segment {
        let SegmentGeometry { segment, exit } = geometry;
        self.history.record(UndoEntry {
            segment: segment.clone(),
            exit,
            length_before: self.total_length,
        });
        self.total_length += segment.length();
        self.segments.push(segment.clone());
        self.pose = exit;
        segment
    }

    /// Removes the most recent segment. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Segment> {
        let entry = self.history.pop()?;
        self.segments.pop();
        self.total_length = entry.length_before;
        self.pose = match self.history.last() {
            Some(previous) => previous.exit,
            None => self.initial_pose,
        };
        tracing::debug!(
            kind = %entry.segment.kind(),
            remaining = self.segments.len(),
            pose = %self.pose,
            "undid segment"
        );
        Some(entry.segment)
    }

    /// Removes every segment and returns to the initial pose.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.history.clear();
        self.pose = self.initial_pose;
        self.total_length = 0.0;
    }

    /// Overwrites the current pose without touching segments or history.
    ///
    /// When the track is non-empty the next segment will not start where the
    /// last one ended; that discontinuity is allowed. A non-finite pose is
    /// rejected and the current pose is kept.
    pub fn set_pose(&mut self, position: Point, heading: f64) -> Result<(), TrackError> {
        let pose = Pose::new(position, heading);
        pose.validate()?;
        self.pose = pose;
        Ok(())
    }

    /// Overwrites only the current heading.
    pub fn set_heading(&mut self, heading: f64) -> Result<(), TrackError> {
        self.set_pose(self.pose.position, heading)
    }

    /// Replaces the pose used by `clear` and by undoing the first segment.
    pub fn set_initial_pose(&mut self, pose: Pose) {
        self.initial_pose = pose;
    }

    pub fn current_pose(&self) -> Pose {
        self.pose
    }

    pub fn initial_pose(&self) -> Pose {
        self.initial_pose
    }

    /// Committed segments, oldest first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of straight lengths and arc lengths.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Points approximating the whole path, `resolution` samples per arc.
    pub fn sample_points(&self, resolution: usize) -> TrackPoints<'_> {
        TrackPoints::new(&self.segments, resolution)
    }

    /// Eagerly collected [`Self::sample_points`].
    pub fn track_points(&self, resolution: usize) -> Vec<Point> {
        self.sample_points(resolution).collect()
    }

    /// Bounding box of the sampled path, `None` for an empty track.
    pub fn bounds(&self, resolution: usize) -> Option<Bounds> {
        Bounds::from_points(self.sample_points(resolution))
    }
}

impl Default for TrackBuilder {
    fn default() -> Self {
        Self::for_canvas(
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT,
            DEFAULT_INITIAL_HEADING,
        )
    }
}
