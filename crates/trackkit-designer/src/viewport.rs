//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between pixel coordinates (screen space) and plane
//! coordinates (track space). Both spaces have +Y pointing down, so the
//! mapping is a uniform scale plus an offset:
//!
//! ```text
//! screen = world * zoom + offset
//! world  = (screen - offset) / zoom
//! ```

use std::fmt;

use trackkit_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use crate::model::Point;
use crate::track::Bounds;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
}

impl Viewport {
    /// Creates a new viewport at 100% zoom with no offset.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            canvas_width,
            canvas_height,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Replaces the zoom limits and the per-notch zoom step.
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64, zoom_step: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom_step = zoom_step;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the viewport limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Gets the pan offset (X coordinate).
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Sets the pan offset.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Pans by a delta amount (screen pixels, e.g. a middle-button drag).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Converts pixel coordinates to plane coordinates.
    pub fn screen_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.offset_x) / self.zoom,
            (pixel_y - self.offset_y) / self.zoom,
        )
    }

    /// Converts plane coordinates to pixel coordinates.
    pub fn world_to_screen(&self, point: &Point) -> (f64, f64) {
        (
            point.x * self.zoom + self.offset_x,
            point.y * self.zoom + self.offset_y,
        )
    }

    /// Applies one mouse-wheel notch at the cursor.
    ///
    /// A positive `direction` zooms in by one step, anything else zooms out.
    /// The plane point under `(pixel_x, pixel_y)` stays under the cursor.
    pub fn zoom_at(&mut self, direction: i32, pixel_x: f64, pixel_y: f64) {
        let old_zoom = self.zoom;
        self.zoom = if direction > 0 {
            (self.zoom + self.zoom_step).min(self.max_zoom)
        } else {
            (self.zoom - self.zoom_step).max(self.min_zoom)
        };

        let factor = self.zoom / old_zoom;
        self.offset_x = pixel_x - (pixel_x - self.offset_x) * factor;
        self.offset_y = pixel_y - (pixel_y - self.offset_y) * factor;
    }

    /// Fits the given bounding box into the viewport with padding.
    ///
    /// `padding` is the fraction of the viewport reserved on each side
    /// (0.0 - 0.5). Degenerate boxes only recentre.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        let width = bounds.width();
        let height = bounds.height();
        if width > 0.0 && height > 0.0 {
            let padding_factor = 1.0 - (padding * 2.0);
            let zoom_x = (self.canvas_width * padding_factor) / width;
            let zoom_y = (self.canvas_height * padding_factor) / height;
            self.zoom = zoom_x.min(zoom_y).clamp(self.min_zoom, self.max_zoom);
        }
        self.center_on(&bounds.center());
    }

    /// Centers the viewport on a plane point.
    pub fn center_on(&mut self, point: &Point) {
        self.offset_x = self.canvas_width / 2.0 - point.x * self.zoom;
        self.offset_y = self.canvas_height / 2.0 - point.y * self.zoom;
    }

    /// Resets viewport to default state (1:1 zoom, no offset).
    pub fn reset(&mut self) {
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.zoom, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
