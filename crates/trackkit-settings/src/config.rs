//! Configuration and settings management for TrackKit
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas (size and start heading)
//! - Track defaults (segment sizes, sampling, scale)
//! - Viewport (zoom limits)
//! - Export (GPS origin, units)
//! - Generator (random track parameters)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use trackkit_core::units::LengthUnit;
use trackkit_core::constants::{
    DEFAULT_ARC_ANGLE, DEFAULT_ARC_RADIUS, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_INITIAL_HEADING, DEFAULT_PIXELS_PER_METER, DEFAULT_SAMPLE_RESOLUTION,
    DEFAULT_STRAIGHT_LENGTH, DEFAULT_TRACK_WIDTH_M, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use trackkit_core::meters_to_pixels;
use trackkit_designer::{
    CoordinateExporter, GeneratorConfig, GpxExporter, SegmentDefaults, TrackBuilder, TrackEditor,
    TrackGenerator, TurnDirection, Viewport,
};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR_NAME: &str = "trackkit";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Heading of a fresh track, degrees (-90 points up the screen)
    pub initial_heading: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            initial_heading: DEFAULT_INITIAL_HEADING,
        }
    }
}

/// Track construction defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    /// Length of a straight whose script entry omits it, pixels
    pub straight_length: f64,
    /// Sweep of a curve whose script entry omits it, degrees
    pub arc_angle: f64,
    /// Radius of a curve whose script entry omits it, pixels
    pub arc_radius: f64,
    /// Samples per arc when sampling the path
    pub sample_resolution: usize,
    pub pixels_per_meter: f64,
    /// Drawn track width in metres; half of it must stay on the canvas
    pub track_width_m: f64,
}

impl TrackSettings {
    /// Values for segment script fields that are left out.
    pub fn segment_defaults(&self) -> SegmentDefaults {
        SegmentDefaults {
            straight_length: self.straight_length,
            arc_angle: self.arc_angle,
            arc_radius: self.arc_radius,
            direction: TurnDirection::default(),
        }
    }

    /// Half the drawn track width, in pixels.
    pub fn half_width_px(&self) -> f64 {
        meters_to_pixels(self.track_width_m, self.pixels_per_meter) / 2.0
    }
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            straight_length: DEFAULT_STRAIGHT_LENGTH,
            arc_angle: DEFAULT_ARC_ANGLE,
            arc_radius: DEFAULT_ARC_RADIUS,
            sample_resolution: DEFAULT_SAMPLE_RESOLUTION,
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            track_width_m: DEFAULT_TRACK_WIDTH_M,
        }
    }
}

/// Viewport zoom limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per mouse-wheel notch
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Latitude of the plane origin, degrees
    pub origin_latitude: f64,
    /// Longitude of the plane origin, degrees
    pub origin_longitude: f64,
    pub gpx_track_name: String,
    pub csv_unit: LengthUnit,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            origin_latitude: 0.0,
            origin_longitude: 0.0,
            gpx_track_name: "Test Track".to_string(),
            csv_unit: LengthUnit::Pixels,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas settings
    pub canvas: CanvasSettings,
    /// Track defaults
    pub track: TrackSettings,
    /// Viewport limits
    pub viewport: ViewportSettings,
    /// Export settings
    pub export: ExportSettings,
    /// Random generator settings
    pub generator: GeneratorConfig,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, e.g. `~/.config/trackkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })?;
        Ok(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from `path` when it exists, defaults otherwise.
    ///
    /// A path whose existence cannot be checked is an error rather than a
    /// silent fallback.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.try_exists()? {
            Self::load_from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load config from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into())
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Validate canvas settings
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SettingsError::invalid("canvas", "dimensions must be > 0"));
        }
        if !self.canvas.initial_heading.is_finite() {
            return Err(SettingsError::invalid(
                "canvas.initial_heading",
                "must be a finite angle",
            ));
        }

        // Validate track defaults
        positive("track.straight_length", self.track.straight_length)?;
        positive("track.arc_angle", self.track.arc_angle)?;
        positive("track.arc_radius", self.track.arc_radius)?;
        positive("track.pixels_per_meter", self.track.pixels_per_meter)?;
        positive("track.track_width_m", self.track.track_width_m)?;
        if self.track.sample_resolution < 2 {
            return Err(SettingsError::invalid(
                "track.sample_resolution",
                "must be at least 2",
            ));
        }

        // Validate viewport
        positive("viewport.min_zoom", self.viewport.min_zoom)?;
        positive("viewport.zoom_step", self.viewport.zoom_step)?;
        if !self.viewport.max_zoom.is_finite() || self.viewport.max_zoom < self.viewport.min_zoom {
            return Err(ConfigError::ValueOutOfRange {
                key: "viewport.max_zoom".to_string(),
                value: self.viewport.max_zoom.to_string(),
            }
            .into());
        }

        // Validate export
        if !self.export.origin_latitude.is_finite() || self.export.origin_latitude.abs() >= 90.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "export.origin_latitude".to_string(),
                value: self.export.origin_latitude.to_string(),
            }
            .into());
        }
        if !self.export.origin_longitude.is_finite() || self.export.origin_longitude.abs() > 180.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "export.origin_longitude".to_string(),
                value: self.export.origin_longitude.to_string(),
            }
            .into());
        }

        // Validate generator
        self.generator.validate()?;

        Ok(())
    }

    /// Empty track builder starting at the canvas centre.
    pub fn track_builder(&self) -> TrackBuilder {
        TrackBuilder::for_canvas(
            self.canvas.width,
            self.canvas.height,
            self.canvas.initial_heading,
        )
    }

    /// Viewport sized to the canvas with the configured zoom limits.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.canvas.width), f64::from(self.canvas.height))
            .with_zoom_limits(
                self.viewport.min_zoom,
                self.viewport.max_zoom,
                self.viewport.zoom_step,
            )
    }

    /// Editor session wired to this configuration.
    pub fn editor(&self) -> TrackEditor {
        TrackEditor::new(self.track_builder(), self.viewport())
    }

    pub fn coordinate_exporter(&self) -> CoordinateExporter {
        CoordinateExporter::new(self.export.csv_unit, self.track.pixels_per_meter)
    }

    pub fn gpx_exporter(&self) -> GpxExporter {
        GpxExporter::new(
            self.export.origin_latitude,
            self.export.origin_longitude,
            self.track.pixels_per_meter,
        )
        .with_track_name(self.export.gpx_track_name.clone())
    }

    /// Random track generator on the configured canvas.
    pub fn track_generator(&self) -> SettingsResult<TrackGenerator> {
        Ok(TrackGenerator::new(self.generator.clone())?.with_canvas(
            self.canvas.width,
            self.canvas.height,
            self.canvas.initial_heading,
        ))
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {value}")))
    }
}
