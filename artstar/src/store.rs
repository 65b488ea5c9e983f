//! Parameter document persistence
//!
//! The whole parameter set lives in one JSON document, an array of
//! per-image objects. Loading is forgiving: a missing or unparsable
//! document falls back to the default collection so the tool always
//! starts. Saving rewrites the full document atomically.

use std::fs;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::params::TransformParameters;

/// Default persistence location, next to the working directory
pub const DEFAULT_STORE_PATH: &str = "image_data.json";

const DEFAULT_SOURCES: [&str; 3] = [
    "data/watertower01.jpg",
    "data/watertower02.jpg",
    "data/watertower03.jpg",
];

/// Errors that can occur while saving the parameter document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The default collection: three watertower images, identity parameters.
pub fn default_parameters() -> Vec<TransformParameters> {
    DEFAULT_SOURCES
        .iter()
        .map(|path| TransformParameters::new(*path))
        .collect()
}

/// Load the parameter document at `path`.
///
/// Never fails: a missing file, unreadable file, or malformed document
/// logs the reason and yields [`default_parameters`]. An empty array in
/// the document also falls back, since a session needs at least one image.
pub fn load_parameters(path: impl AsRef<Path>) -> Vec<TransformParameters> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            info!(path = %path.display(), %err, "no parameter document, using defaults");
            return default_parameters();
        }
    };
    match serde_json::from_str::<Vec<TransformParameters>>(&text) {
        Ok(params) if !params.is_empty() => {
            info!(path = %path.display(), count = params.len(), "loaded parameter document");
            params
        }
        Ok(_) => {
            warn!(path = %path.display(), "parameter document is empty, using defaults");
            default_parameters()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed parameter document, using defaults");
            default_parameters()
        }
    }
}

/// Save the full parameter document to `path`.
///
/// Writes to a sibling temp file and renames it into place, so a crash
/// mid-write never leaves a truncated document behind.
pub fn save_parameters(path: impl AsRef<Path>, params: &[TransformParameters]) -> StoreResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(params)?;

    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    info!(path = %path.display(), count = params.len(), "saved parameter document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let params = load_parameters(dir.path().join("nope.json"));
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].source_path(), "data/watertower01.jpg");
        assert!(params.iter().all(|p| p.is_identity()));
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_parameters(&path), default_parameters());
    }

    #[test]
    fn test_empty_array_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "[]").unwrap();
        assert_eq!(load_parameters(&path), default_parameters());
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_data.json");

        let mut params = default_parameters();
        params[0].nudge_translation_x(-3);
        params[1].nudge_rotation(45);
        params[2].nudge_skew(-12);
        params[2].nudge_zoom(7);

        save_parameters(&path, &params).unwrap();
        assert_eq!(load_parameters(&path), params);
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_data.json");

        save_parameters(&path, &default_parameters()).unwrap();
        let mut params = default_parameters();
        params[1].nudge_zoom(2);
        save_parameters(&path, &params).unwrap();

        assert_eq!(load_parameters(&path), params);
    }

    #[test]
    fn test_wire_format_is_readable_by_field_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_data.json");
        fs::write(
            &path,
            r#"[{"filepath": "data/tower.jpg", "translationX": 40,
                 "translationY": -20, "rotation": 3.0, "skew": -1.0,
                 "zoom": 0.25}]"#,
        )
        .unwrap();
        let params = load_parameters(&path);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].source_path(), "data/tower.jpg");
        assert_eq!(params[0].translation_x, 40);
        assert_eq!(params[0].translation_y, -20);
        assert_eq!(params[0].rotation_degrees, 3.0);
        assert_eq!(params[0].skew_degrees, -1.0);
        assert_eq!(params[0].zoom, 0.25);
    }
}
