//! Serialization and deserialization for track files.
//!
//! Implements save/load for `.track.json` files: metadata, the start and
//! current pose, the viewport, and the committed segments. Each segment is
//! stored as a mapping with a `type` discriminator (`"straight"` or
//! `"curve"`) and enough fields to rebuild its geometry without replaying the
//! pose history.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::model::{Pose, Segment};
use crate::track::TrackBuilder;
use crate::viewport::Viewport;

/// Track file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete track file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackFile {
    pub version: String,
    pub metadata: TrackMetadata,
    pub initial_pose: Pose,
    pub pose: Pose,
    #[serde(default)]
    pub viewport: ViewportState,
    pub segments: Vec<Segment>,
}

/// Track metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    /// Image traced underneath the track, stored as a reference only
    #[serde(default)]
    pub background_image: Option<PathBuf>,
}

/// Viewport state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl From<&Viewport> for ViewportState {
    fn from(viewport: &Viewport) -> Self {
        Self {
            zoom: viewport.zoom(),
            offset_x: viewport.offset_x(),
            offset_y: viewport.offset_y(),
        }
    }
}

impl ViewportState {
    /// Applies the stored zoom and offset to `viewport`.
    pub fn apply_to(&self, viewport: &mut Viewport) {
        viewport.set_zoom(self.zoom);
        viewport.set_offset(self.offset_x, self.offset_y);
    }
}

impl TrackFile {
    /// Create an empty track file
    pub fn new(name: impl Into<String>, initial_pose: Pose) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: TrackMetadata {
                id: Uuid::new_v4(),
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
                background_image: None,
            },
            initial_pose,
            pose: initial_pose,
            viewport: ViewportState::default(),
            segments: Vec::new(),
        }
    }

    /// Capture the committed state of a track builder
    pub fn from_builder(name: impl Into<String>, builder: &TrackBuilder) -> Self {
        let mut file = Self::new(name, builder.initial_pose());
        file.pose = builder.current_pose();
        file.segments = builder.segments().to_vec();
        file
    }

    /// Rebuild a track builder from the stored segments.
    ///
    /// The stored current pose is applied last, so a pose set after the
    /// final segment survives the round trip.
    pub fn to_builder(&self) -> Result<TrackBuilder> {
        let mut builder =
            TrackBuilder::from_segments(self.initial_pose, self.segments.iter().cloned())
                .context("Track file contains invalid segment geometry")?;
        builder
            .set_pose(self.pose.position, self.pose.heading)
            .context("Track file holds an invalid current pose")?;
        Ok(builder)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize track")
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let file: TrackFile = serde_json::from_str(content).context("Failed to parse track file")?;
        if file.version != FILE_FORMAT_VERSION {
            tracing::warn!(
                found = %file.version,
                expected = FILE_FORMAT_VERSION,
                "Track file version mismatch, loading anyway"
            );
        }
        Ok(file)
    }

    /// Save track to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;

        std::fs::write(path.as_ref(), json).context("Failed to write track file")?;

        tracing::info!(
            path = %path.as_ref().display(),
            segments = self.segments.len(),
            "Saved track"
        );
        Ok(())
    }

    /// Load track from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read track file")?;

        let mut file = Self::from_json(&content)?;

        // Update modified timestamp
        file.metadata.modified = Utc::now();

        tracing::info!(
            path = %path.as_ref().display(),
            segments = file.segments.len(),
            "Loaded track"
        );
        Ok(file)
    }
}
