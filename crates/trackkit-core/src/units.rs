//! Unit conversion utilities
//!
//! Track geometry lives in canvas pixels. Export and display convert to metres
//! through a pixels-per-metre scale. Headings are degrees throughout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit used when presenting or exporting coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Canvas pixels (the native plane unit)
    Pixels,
    /// Metres, via the configured scale
    Meters,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Pixels
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels => write!(f, "px"),
            Self::Meters => write!(f, "m"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pixels" | "px" => Ok(Self::Pixels),
            "meters" | "metres" | "m" => Ok(Self::Meters),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Converts a canvas length to metres.
pub fn pixels_to_meters(pixels: f64, pixels_per_meter: f64) -> f64 {
    pixels / pixels_per_meter
}

/// Converts metres to a canvas length.
pub fn meters_to_pixels(meters: f64, pixels_per_meter: f64) -> f64 {
    meters * pixels_per_meter
}

/// Converts a canvas length into `unit`.
pub fn convert_length(pixels: f64, unit: LengthUnit, pixels_per_meter: f64) -> f64 {
    match unit {
        LengthUnit::Pixels => pixels,
        LengthUnit::Meters => pixels_to_meters(pixels, pixels_per_meter),
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Heading in degrees of the vector `(dx, dy)`, measured from +x.
pub fn heading_of(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Format a length for display with its unit label
pub fn format_length(pixels: f64, unit: LengthUnit, pixels_per_meter: f64) -> String {
    format!(
        "{:.2} {}",
        convert_length(pixels, unit, pixels_per_meter),
        unit
    )
}
