//! Editor session state for UI integration.
//! Owns the track under construction and handles UI callbacks.
//!
//! This module is split into submodules:
//! - `file_io`: Save/load operations

mod file_io;

use std::fmt;
use std::path::PathBuf;

use trackkit_core::constants::{DEFAULT_INITIAL_HEADING, VIEW_PADDING};
use trackkit_core::{heading_of, TrackError};

use crate::model::{Point, Pose, Segment, SegmentRequest, TurnDirection};
use crate::track::TrackBuilder;
use crate::viewport::Viewport;

/// Pointer-driven selection the editor is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// Next pointer press places the start of a fresh track
    AwaitingStartPoint,
    /// Next pointer press aims the current heading
    AwaitingAngleHeading,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingStartPoint => write!(f, "awaiting start point"),
            Self::AwaitingAngleHeading => write!(f, "awaiting angle heading"),
        }
    }
}

/// Editor session for UI integration
#[derive(Debug, Clone)]
pub struct TrackEditor {
    builder: TrackBuilder,
    mode: EditorMode,
    /// Heading given to a start point placed with the pointer.
    start_heading: f64,
    pub viewport: Viewport,
    pub description: String,
    pub background_image: Option<PathBuf>,
    pub track_name: String,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
}

impl TrackEditor {
    /// Creates a new editor session around `builder`.
    pub fn new(builder: TrackBuilder, viewport: Viewport) -> Self {
        Self {
            start_heading: builder.initial_pose().heading,
            builder,
            mode: EditorMode::Idle,
            viewport,
            description: String::new(),
            background_image: None,
            track_name: "Untitled".to_string(),
            current_file_path: None,
            is_modified: false,
        }
    }

    pub fn builder(&self) -> &TrackBuilder {
        &self.builder
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn start_heading(&self) -> f64 {
        self.start_heading
    }

    /// Sets the heading used for pointer-placed start points.
    pub fn set_start_heading(&mut self, heading: f64) {
        self.start_heading = heading;
    }

    pub fn current_pose(&self) -> Pose {
        self.builder.current_pose()
    }

    pub fn segments(&self) -> &[Segment] {
        self.builder.segments()
    }

    /// Clears the track and waits for a start point.
    pub fn begin_start_point_selection(&mut self) {
        if !self.builder.is_empty() {
            self.is_modified = true;
        }
        self.builder.clear();
        self.mode = EditorMode::AwaitingStartPoint;
        tracing::debug!("awaiting start point");
    }

    /// Waits for a pointer press that aims the current heading.
    pub fn begin_heading_selection(&mut self) {
        self.mode = EditorMode::AwaitingAngleHeading;
        tracing::debug!("awaiting angle heading");
    }

    pub fn cancel_selection(&mut self) {
        self.mode = EditorMode::Idle;
    }

    /// Handles a primary-button press at screen pixel `(pixel_x, pixel_y)`.
    ///
    /// Returns true when the pose changed.
    pub fn pointer_pressed(&mut self, pixel_x: f64, pixel_y: f64) -> bool {
        let world = self.viewport.screen_to_world(pixel_x, pixel_y);
        match self.mode {
            EditorMode::Idle => false,
            EditorMode::AwaitingStartPoint => {
                let pose = Pose::new(world, self.start_heading);
                if let Err(e) = self.builder.set_pose(pose.position, pose.heading) {
                    tracing::warn!(error = %e, "start point ignored");
                    return false;
                }
                self.builder.set_initial_pose(pose);
                self.mode = EditorMode::Idle;
                self.is_modified = true;
                tracing::info!(pose = %pose, "start point set");
                true
            }
            EditorMode::AwaitingAngleHeading => {
                let position = self.builder.current_pose().position;
                self.mode = EditorMode::Idle;
                if world.distance_to(&position) == 0.0 {
                    tracing::warn!("heading target coincides with current position, ignored");
                    return false;
                }
                let heading = heading_of(world.x - position.x, world.y - position.y);
                if let Err(e) = self.builder.set_heading(heading) {
                    tracing::warn!(error = %e, "heading target ignored");
                    return false;
                }
                self.is_modified = true;
                tracing::info!(heading, "heading set");
                true
            }
        }
    }

    /// Sets the current heading from free text such as `"-45"`.
    pub fn set_heading_from_text(&mut self, text: &str) -> Result<f64, TrackError> {
        let heading: f64 = text.trim().parse().map_err(|_| {
            tracing::warn!(text, "rejected heading text");
            TrackError::invalid_parameter("heading", format!("'{text}' is not a number"))
        })?;
        if !heading.is_finite() {
            return Err(TrackError::invalid_parameter(
                "heading",
                "must be a finite number of degrees",
            ));
        }
        self.builder.set_heading(heading)?;
        self.is_modified = true;
        Ok(heading)
    }

    fn ensure_can_append(&self, operation: &str) -> Result<(), TrackError> {
        if self.mode == EditorMode::AwaitingStartPoint {
            tracing::warn!(operation, "append rejected while awaiting start point");
            return Err(TrackError::InvalidMode {
                mode: self.mode.to_string(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    pub fn append_straight(&mut self, length: f64) -> Result<Segment, TrackError> {
        self.ensure_can_append("append straight")?;
        let segment = self.builder.append_straight(length)?;
        self.mark_modified();
        Ok(segment)
    }

    pub fn append_arc(
        &mut self,
        direction: TurnDirection,
        sweep_angle: f64,
        radius: f64,
    ) -> Result<Segment, TrackError> {
        self.ensure_can_append("append curve")?;
        let segment = self.builder.append_arc(direction, sweep_angle, radius)?;
        self.mark_modified();
        Ok(segment)
    }

    pub fn apply(&mut self, request: &SegmentRequest) -> Result<Segment, TrackError> {
        self.ensure_can_append("apply segment")?;
        let segment = self.builder.apply(request)?;
        self.mark_modified();
        Ok(segment)
    }

    /// Undoes the last append. Nothing happens on an empty track.
    pub fn undo(&mut self) -> Option<Segment> {
        let undone = self.builder.undo();
        if undone.is_some() {
            self.mark_modified();
        }
        undone
    }

    pub fn clear(&mut self) {
        if !self.builder.is_empty() {
            self.mark_modified();
        }
        self.builder.clear();
    }

    /// Zooms and pans so the whole track is visible. Returns false for an
    /// empty track.
    pub fn fit_to_track(&mut self, resolution: usize) -> bool {
        match self.builder.bounds(resolution) {
            Some(bounds) => {
                self.viewport.fit_to_bounds(&bounds, VIEW_PADDING);
                true
            }
            None => false,
        }
    }

    /// Point under the screen pixel, in plane coordinates.
    pub fn screen_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        self.viewport.screen_to_world(pixel_x, pixel_y)
    }
}

impl Default for TrackEditor {
    fn default() -> Self {
        let mut editor = Self::new(TrackBuilder::default(), Viewport::default());
        editor.start_heading = DEFAULT_INITIAL_HEADING;
        editor
    }
}
