//! TrackKit Settings Crate
//!
//! Handles application configuration: defaults, file persistence and validation.

pub mod config;
pub mod error;

pub use config::{
    CanvasSettings, Config, ExportSettings, LengthUnit, TrackSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
