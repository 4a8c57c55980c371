//! # TrackKit Core
//!
//! Core types and utilities for TrackKit.
//! Provides the shared error taxonomy, unit conversion between canvas
//! pixels and metres, angle helpers and default constants.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, Result, TrackError};
pub use units::{
    convert_length, format_length, heading_of, meters_to_pixels, normalize_degrees,
    pixels_to_meters, LengthUnit,
};
