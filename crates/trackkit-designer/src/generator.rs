//! Random track generator for building labelled track datasets.
//!
//! Draws segment requests at random, checks that the resulting track stays
//! inside the canvas, and describes it in plain English.

use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use trackkit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_INITIAL_HEADING,
};
use trackkit_core::TrackError;

use crate::model::{Pose, SegmentRequest, TurnDirection};
use crate::track::TrackBuilder;

/// Straights shorter than this are described as short.
const SHORT_STRAIGHT_LENGTH: f64 = 100.0;
/// Turns with a smaller radius are described as tight.
const TIGHT_TURN_RADIUS: f64 = 50.0;
/// Upper bound on the up-front allocation for requested tracks.
const MAX_PREALLOCATED_TRACKS: usize = 1024;

/// Generation parameters. Ranges are half-open except the segment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_segments: usize,
    pub max_segments: usize,
    pub straight_probability: f64,
    pub min_straight_length: u32,
    pub max_straight_length: u32,
    pub arc_angles: Vec<u32>,
    pub min_radius: u32,
    pub max_radius: u32,
    /// Distance every sample must keep from the canvas edges.
    pub margin: f64,
    pub validation_resolution: usize,
    pub max_attempts_factor: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_segments: 3,
            max_segments: 5,
            straight_probability: 0.4,
            min_straight_length: 50,
            max_straight_length: 150,
            arc_angles: vec![45, 90],
            min_radius: 30,
            max_radius: 70,
            margin: 100.0,
            validation_resolution: 5,
            max_attempts_factor: 3,
        }
    }
}

impl GeneratorConfig {
    /// Rejects empty or inverted ranges and out-of-range probabilities.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(TrackError::invalid_parameter(
                "segments",
                format!(
                    "count range {}..={} is empty",
                    self.min_segments, self.max_segments
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.straight_probability) {
            return Err(TrackError::invalid_parameter(
                "straight_probability",
                format!("{} is not within 0..=1", self.straight_probability),
            ));
        }
        if self.min_straight_length == 0 || self.min_straight_length >= self.max_straight_length
        {
            return Err(TrackError::invalid_parameter(
                "straight_length",
                format!(
                    "range {}..{} is empty or starts at zero",
                    self.min_straight_length, self.max_straight_length
                ),
            ));
        }
        if self.min_radius == 0 || self.min_radius >= self.max_radius {
            return Err(TrackError::invalid_parameter(
                "radius",
                format!(
                    "range {}..{} is empty or starts at zero",
                    self.min_radius, self.max_radius
                ),
            ));
        }
        if self.arc_angles.is_empty() || self.arc_angles.contains(&0) {
            return Err(TrackError::invalid_parameter(
                "arc_angles",
                "must list at least one positive angle",
            ));
        }
        if self.validation_resolution < 2 {
            return Err(TrackError::invalid_parameter(
                "validation_resolution",
                "must sample at least both ends of an arc",
            ));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(TrackError::invalid_parameter(
                "margin",
                format!("{} is not a non-negative distance", self.margin),
            ));
        }
        Ok(())
    }
}

/// One randomly drawn track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackParams {
    pub num_segments: usize,
    pub segments: Vec<SegmentRequest>,
    /// Local time of generation, `%Y%m%d_%H%M%S`.
    pub timestamp: String,
}

impl TrackParams {
    pub fn straight_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_straight()).count()
    }

    pub fn turn_count(&self) -> usize {
        self.segments.len() - self.straight_count()
    }
}

#[derive(Debug, Clone)]
pub struct TrackGenerator {
    config: GeneratorConfig,
    canvas_width: u32,
    canvas_height: u32,
    initial_heading: f64,
}

impl TrackGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(Self {
            config,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            initial_heading: DEFAULT_INITIAL_HEADING,
        })
    }

    /// Builds tracks from the centre of a `width` x `height` canvas.
    pub fn with_canvas(mut self, width: u32, height: u32, initial_heading: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self.initial_heading = initial_heading;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn initial_pose(&self) -> Pose {
        Pose::canvas_center(self.canvas_width, self.canvas_height, self.initial_heading)
    }

    /// Draws a random set of segment requests.
    pub fn generate_params<R: Rng + ?Sized>(&self, rng: &mut R) -> TrackParams {
        let cfg = &self.config;
        let num_segments = rng.gen_range(cfg.min_segments..=cfg.max_segments);
        let segments = (0..num_segments)
            .map(|_| {
                if rng.gen_bool(cfg.straight_probability) {
                    SegmentRequest::straight(f64::from(
                        rng.gen_range(cfg.min_straight_length..cfg.max_straight_length),
                    ))
                } else {
                    let direction = if rng.gen_bool(0.5) {
                        TurnDirection::Left
                    } else {
                        TurnDirection::Right
                    };
                    let angle = cfg.arc_angles.choose(rng).copied().unwrap_or(90);
                    let radius = rng.gen_range(cfg.min_radius..cfg.max_radius);
                    SegmentRequest::curve(direction, f64::from(angle), f64::from(radius))
                }
            })
            .collect();

        TrackParams {
            num_segments,
            segments,
            timestamp: Local::now().format("%Y%m%d_%H%M%S").to_string(),
        }
    }

    /// Natural-language description of a track.
    pub fn describe(params: &TrackParams) -> String {
        let mut parts = vec![format!(
            "A track with {} segments, featuring {} straight sections and {} turns.",
            params.segments.len(),
            params.straight_count(),
            params.turn_count()
        )];

        for (i, segment) in params.segments.iter().enumerate() {
            let n = i + 1;
            parts.push(match *segment {
                SegmentRequest::Straight { length } => {
                    let size = if length < SHORT_STRAIGHT_LENGTH {
                        "short"
                    } else {
                        "long"
                    };
                    format!("Segment {n} is a {size} straight of {length} meters.")
                }
                SegmentRequest::Curve {
                    direction,
                    angle,
                    radius,
                } => {
                    let tightness = if radius < TIGHT_TURN_RADIUS {
                        "tight"
                    } else {
                        "wide"
                    };
                    format!("Segment {n} is a {tightness} {direction} turn of {angle} degrees.")
                }
            });
        }

        parts.join(" ")
    }

    /// Builds the track from the canvas centre.
    pub fn build(&self, params: &TrackParams) -> Result<TrackBuilder, TrackError> {
        let mut builder = TrackBuilder::new(self.initial_pose());
        for request in &params.segments {
            builder.apply(request)?;
        }
        Ok(builder)
    }

    /// True when the track builds and every sample stays inside the margins.
    pub fn validate(&self, params: &TrackParams) -> bool {
        let builder = match self.build(params) {
            Ok(builder) => builder,
            Err(e) => {
                tracing::debug!(error = %e, "generated track failed to build");
                return false;
            }
        };
        match builder.bounds(self.config.validation_resolution) {
            Some(bounds) => {
                let inside = bounds.fits_within(
                    f64::from(self.canvas_width),
                    f64::from(self.canvas_height),
                    self.config.margin,
                );
                tracing::debug!(%bounds, inside, "validated generated track");
                inside
            }
            None => false,
        }
    }

    /// Number of draws `generate_valid` may spend on `count` tracks.
    pub fn attempt_budget(&self, count: usize) -> usize {
        count.saturating_mul(self.config.max_attempts_factor)
    }

    /// Draws tracks until `count` valid ones are found or the attempt budget
    /// (`count * max_attempts_factor`) runs out.
    pub fn generate_valid<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<TrackParams> {
        let max_attempts = self.attempt_budget(count);
        let mut tracks = Vec::with_capacity(count.min(MAX_PREALLOCATED_TRACKS));
        let mut attempts = 0;

        while tracks.len() < count && attempts < max_attempts {
            let params = self.generate_params(rng);
            if self.validate(&params) {
                tracks.push(params);
                tracing::debug!(valid = tracks.len(), requested = count, "generated valid track");
            }
            attempts += 1;
        }

        if tracks.len() < count {
            tracing::warn!(
                generated = tracks.len(),
                requested = count,
                attempts,
                "Only generated part of the requested tracks"
            );
        } else {
            tracing::info!(generated = tracks.len(), attempts, "Generated tracks");
        }
        tracks
    }
}

impl Default for TrackGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            initial_heading: DEFAULT_INITIAL_HEADING,
        }
    }
}
