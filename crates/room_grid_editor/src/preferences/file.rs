//! Preferences file save/load operations

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::IoError(e) => write!(f, "IO error: {}", e),
            PreferencesError::ParseError(e) => write!(f, "Parse error: {}", e),
            PreferencesError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "room_grid", "room_grid_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Preferences from the platform config dir. Never fails: a missing or
    /// unreadable file gives defaults, out-of-range values are repaired.
    pub fn load() -> Self {
        match Self::preferences_path() {
            Some(path) => Self::read_or_default(&path),
            None => {
                tracing::warn!("{}. Using default preferences.", PreferencesError::NoConfigDir);
                Self::default()
            }
        }
    }

    /// Read `path`, falling back to defaults on any error
    pub fn read_or_default(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load preferences from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Read and repair a preferences file. A missing file is not an error.
    pub fn read(path: &Path) -> Result<Self, PreferencesError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(PreferencesError::IoError(e.to_string())),
        };
        let prefs: Self = serde_json::from_str(&content)
            .map_err(|e| PreferencesError::ParseError(e.to_string()))?;
        Ok(prefs.sanitized())
    }

    pub fn save(&self) -> Result<PathBuf, PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.write(&path)?;
        Ok(path)
    }

    /// Write the repaired form as pretty JSON, so the file never holds a
    /// value the editor would reject on the next launch
    pub fn write(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(&self.clone().sanitized())
            .map_err(|e| PreferencesError::SerializeError(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| PreferencesError::IoError(e.to_string()))?;

        tracing::info!("Saved preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::BrushSize;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("room_grid_prefs_{}", uuid::Uuid::new_v4()))
            .join(PREFERENCES_FILE)
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_write_and_read() {
        let path = scratch_path();
        let prefs = EditorPreferences {
            brush_size: BrushSize::Large,
            cell_size_px: 20.0,
            show_placement_labels: true,
            ..Default::default()
        };
        prefs.write(&path).unwrap();

        assert_eq!(EditorPreferences::read(&path).unwrap(), prefs);
        cleanup(&path);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = EditorPreferences::read(&scratch_path()).unwrap();
        assert_eq!(loaded, EditorPreferences::default());
    }

    #[test]
    fn test_read_repairs_hand_edited_values() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"default_grid_side": 90, "cell_size_px": 1.0, "fill_color": "teal"}"#,
        )
        .unwrap();

        let loaded = EditorPreferences::read(&path).unwrap();
        assert_eq!(loaded.default_grid_side, 40);
        assert_eq!(loaded.cell_size_px, 4.0);
        assert_eq!(loaded.fill_color, "#212121");
        assert_eq!(loaded.brush_size, BrushSize::Single);
        cleanup(&path);
    }

    #[test]
    fn test_write_stores_repaired_form() {
        let path = scratch_path();
        let prefs = EditorPreferences {
            default_grid_side: 0,
            cell_size_px: 500.0,
            ..Default::default()
        };
        prefs.write(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["default_grid_side"], 1);
        assert_eq!(raw["cell_size_px"], 64.0);
        cleanup(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            EditorPreferences::read(&path),
            Err(PreferencesError::ParseError(_))
        ));
        assert_eq!(
            EditorPreferences::read_or_default(&path),
            EditorPreferences::default()
        );
        cleanup(&path);
    }
}
