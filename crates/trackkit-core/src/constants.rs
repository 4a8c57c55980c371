//! Default values shared by the editor, the settings and the generator.

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1200;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;

/// Heading of a fresh track: pointing up the screen.
pub const DEFAULT_INITIAL_HEADING: f64 = -90.0;

/// Default length of a straight segment in pixels.
pub const DEFAULT_STRAIGHT_LENGTH: f64 = 100.0;

/// Default arc sweep in degrees.
pub const DEFAULT_ARC_ANGLE: f64 = 180.0;

/// Default arc radius in pixels.
pub const DEFAULT_ARC_RADIUS: f64 = 50.0;

/// Samples taken along each arc when sampling a track.
pub const DEFAULT_SAMPLE_RESOLUTION: usize = 20;

/// Canvas scale used for metric conversion.
pub const DEFAULT_PIXELS_PER_METER: f64 = 8.0;

/// Track width in metres.
pub const DEFAULT_TRACK_WIDTH_M: f64 = 0.75;

/// Smallest zoom factor of the editor viewport.
pub const MIN_ZOOM: f64 = 0.2;

/// Largest zoom factor of the editor viewport.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom change per mouse-wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Fraction of the viewport kept free around fitted content.
pub const VIEW_PADDING: f64 = 0.05;
