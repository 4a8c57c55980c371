//! # TrackKit
//!
//! An editor core for laying out 2D vehicle test tracks from straight and
//! circular-arc segments, with:
//! - Exact undo of every append
//! - Sampling, bounds checks and CSV / JSON / GPX export
//! - A JSON track file format
//! - A random track generator with plain-English descriptions
//!
//! ## Architecture
//!
//! TrackKit is organized as a workspace with multiple crates:
//!
//! 1. **trackkit-core** - Error types, units, shared constants
//! 2. **trackkit-designer** - Geometry, track builder, editor session, export, generator
//! 3. **trackkit-settings** - Configuration file handling and validation
//! 4. **trackkit** - Command-line binary that integrates all crates

pub mod commands;

pub use trackkit_designer as designer;

pub use trackkit_core::{Error, LengthUnit, Result, TrackError};

pub use trackkit_designer::{
    Bounds, CoordinateExporter, EditorMode, GpxExporter, Point, Pose, Segment, SegmentDefaults,
    SegmentDraft, SegmentRequest, TrackBuilder, TrackEditor, TrackFile, TrackGenerator,
    TrackParams, TurnDirection, Viewport,
};

pub use trackkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support (default `info`)
/// - JSON lines instead of human-readable text when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?;
    }

    Ok(())
}
