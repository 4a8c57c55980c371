//! Export of sampled track points.
//!
//! Coordinates go out as CSV or as a JSON array of `[x, y]` pairs. GPX places
//! the track around a geographic origin with an equirectangular
//! approximation: plane +x is east, plane +y (down the screen) is south.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use trackkit_core::constants::DEFAULT_PIXELS_PER_METER;
use trackkit_core::{convert_length, pixels_to_meters, Error, LengthUnit, Result};

use crate::model::Point;

/// WGS84 equatorial radius in metres.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Writes sampled points as plain coordinates.
#[derive(Debug, Clone)]
pub struct CoordinateExporter {
    pub unit: LengthUnit,
    pub pixels_per_meter: f64,
}

impl CoordinateExporter {
    pub fn new(unit: LengthUnit, pixels_per_meter: f64) -> Self {
        Self {
            unit,
            pixels_per_meter,
        }
    }

    fn convert(&self, point: Point) -> (f64, f64) {
        (
            convert_length(point.x, self.unit, self.pixels_per_meter),
            convert_length(point.y, self.unit, self.pixels_per_meter),
        )
    }

    /// CSV with an `x,y` header, one point per line.
    pub fn to_csv(&self, points: impl IntoIterator<Item = Point>) -> String {
        let mut csv = String::from("x,y\n");
        for point in points {
            let (x, y) = self.convert(point);
            let _ = writeln!(csv, "{x:.6},{y:.6}");
        }
        csv
    }

    /// JSON array of `[x, y]` pairs.
    pub fn to_json(&self, points: impl IntoIterator<Item = Point>) -> Result<String> {
        let pairs: Vec<[f64; 2]> = points
            .into_iter()
            .map(|p| {
                let (x, y) = self.convert(p);
                [x, y]
            })
            .collect();
        Ok(serde_json::to_string(&pairs)?)
    }

    pub fn write_csv(
        &self,
        path: impl AsRef<Path>,
        points: impl IntoIterator<Item = Point>,
    ) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_csv(points))?;
        tracing::info!(path = %path.as_ref().display(), unit = %self.unit, "Exported CSV");
        Ok(())
    }

    pub fn write_json(
        &self,
        path: impl AsRef<Path>,
        points: impl IntoIterator<Item = Point>,
    ) -> Result<()> {
        let json = self.to_json(points)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), unit = %self.unit, "Exported JSON");
        Ok(())
    }
}

impl Default for CoordinateExporter {
    fn default() -> Self {
        Self::new(LengthUnit::Pixels, DEFAULT_PIXELS_PER_METER)
    }
}

/// Writes sampled points as a GPX 1.1 track.
#[derive(Debug, Clone)]
pub struct GpxExporter {
    pub origin_lat: f64,
    pub origin_lon: f64,
    pub pixels_per_meter: f64,
    pub track_name: String,
}

impl GpxExporter {
    pub fn new(origin_lat: f64, origin_lon: f64, pixels_per_meter: f64) -> Self {
        Self {
            origin_lat,
            origin_lon,
            pixels_per_meter,
            track_name: "Test Track".to_string(),
        }
    }

    pub fn with_track_name(mut self, name: impl Into<String>) -> Self {
        self.track_name = name.into();
        self
    }

    /// Latitude and longitude of a plane point, degrees.
    pub fn to_lat_lon(&self, point: Point) -> (f64, f64) {
        let east = pixels_to_meters(point.x, self.pixels_per_meter);
        let south = pixels_to_meters(point.y, self.pixels_per_meter);
        let lat = self.origin_lat - (south / EARTH_RADIUS_M).to_degrees();
        let lon = self.origin_lon
            + (east / (EARTH_RADIUS_M * self.origin_lat.to_radians().cos())).to_degrees();
        (lat, lon)
    }

    /// Renders the GPX document, stamped with `time`.
    pub fn to_gpx(&self, points: impl IntoIterator<Item = Point>, time: DateTime<Utc>) -> String {
        let name = escape_xml(&self.track_name);
        let mut gpx = String::new();
        gpx.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        gpx.push_str(
            "<gpx version=\"1.1\" creator=\"trackkit\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
        );
        let _ = writeln!(
            gpx,
            "  <metadata>\n    <name>{name}</name>\n    <time>{}</time>\n  </metadata>",
            time.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(gpx, "  <trk>\n    <name>{name}</name>\n    <trkseg>");
        for point in points {
            let (lat, lon) = self.to_lat_lon(point);
            let _ = writeln!(gpx, "      <trkpt lat=\"{lat:.8}\" lon=\"{lon:.8}\"></trkpt>");
        }
        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }

    pub fn write_gpx(
        &self,
        path: impl AsRef<Path>,
        points: impl IntoIterator<Item = Point>,
    ) -> Result<()> {
        if !self.origin_lat.is_finite() || self.origin_lat.abs() >= 90.0 {
            return Err(Error::Serialization(format!(
                "GPX origin latitude {} is outside (-90, 90)",
                self.origin_lat
            )));
        }
        std::fs::write(path.as_ref(), self.to_gpx(points, Utc::now()))?;
        tracing::info!(path = %path.as_ref().display(), "Exported GPX");
        Ok(())
    }
}

impl Default for GpxExporter {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_PIXELS_PER_METER)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
