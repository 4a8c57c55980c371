//! # TrackKit Designer
//!
//! Incremental construction of 2D vehicle test tracks from straight and
//! circular-arc segments, plus the editor session, file format, export and
//! random generator built on top of it.
//!
//! ## Core Components
//!
//! - **Geometry**: pure computation of a segment and its exit pose
//! - **Track builder**: ordered segments, current pose, exact undo, sampling
//! - **Editor**: pointer-driven start point / heading selection, save/load
//! - **Viewport**: zoom and pan between screen pixels and plane coordinates
//! - **Export**: CSV, JSON and GPX output of sampled points
//! - **Generator**: random, bounds-checked tracks with descriptions
//!
//! ## Architecture
//!
//! ```text
//! TrackEditor (session, mode, file)
//!   ├── Viewport (screen <-> plane)
//!   └── TrackBuilder (segments, pose, undo log)
//!         └── geometry (compute_straight, compute_arc)
//!
//! TrackGenerator ──> TrackBuilder ──> TrackPoints ──> export
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trackkit_designer::{Point, Pose, TrackBuilder, TurnDirection};
//!
//! let mut track = TrackBuilder::new(Pose::new(Point::new(500.0, 400.0), -90.0));
//! track.append_straight(100.0)?;
//! track.append_arc(TurnDirection::Right, 90.0, 50.0)?;
//! assert_eq!(track.len(), 2);
//! # Ok::<(), trackkit_core::TrackError>(())
//! ```

pub mod editor_state;
pub mod export;
pub mod generator;
pub mod geometry;
pub mod model;
pub mod serialization;
pub mod track;
pub mod viewport;

pub use editor_state::{EditorMode, TrackEditor};
pub use export::{CoordinateExporter, GpxExporter};
pub use generator::{GeneratorConfig, TrackGenerator, TrackParams};
pub use geometry::{compute_arc, compute_straight, SegmentGeometry};
pub use model::{
    ArcSegment, Point, Pose, Segment, SegmentDefaults, SegmentDraft, SegmentKind, SegmentRequest,
    StraightSegment, TurnDirection,
};
pub use serialization::{TrackFile, TrackMetadata, ViewportState};
pub use track::{Bounds, TrackBuilder, TrackPoints, UndoEntry, UndoLog};
pub use viewport::Viewport;
