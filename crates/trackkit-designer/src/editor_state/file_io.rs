//! File I/O operations (save, load, new) for the editor session.

use super::{EditorMode, TrackEditor};
use crate::serialization::{TrackFile, ViewportState};

impl TrackEditor {
    /// Save track to file.
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let mut file = TrackFile::from_builder(&self.track_name, &self.builder);
        file.metadata.description = self.description.clone();
        file.metadata.background_image = self.background_image.clone();
        file.viewport = ViewportState::from(&self.viewport);

        file.save_to_file(&path)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;

        Ok(())
    }

    /// Load track from file.
    ///
    /// The session is left untouched when the file cannot be read or rebuilt.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let file = TrackFile::load_from_file(&path)?;
        let builder = file.to_builder()?;

        self.builder = builder;
        file.viewport.apply_to(&mut self.viewport);
        self.mode = EditorMode::Idle;
        self.track_name = file.metadata.name.clone();
        self.description = file.metadata.description.clone();
        self.background_image = file.metadata.background_image.clone();
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;

        Ok(())
    }

    /// Create new track (clear all).
    pub fn new_track(&mut self) {
        self.builder.clear();
        self.mode = EditorMode::Idle;
        self.viewport.reset();
        self.description.clear();
        self.background_image = None;
        self.current_file_path = None;
        self.is_modified = false;
        self.track_name = "Untitled".to_string();
    }

    /// Mark track as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the track.
    pub fn display_name(&self) -> String {
        let name = if let Some(path) = &self.current_file_path {
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.track_name)
        } else {
            &self.track_name
        };

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}
