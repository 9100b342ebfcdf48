//! JSON serialization for scenes.
//!
//! The layout engine lives outside this crate; a host either builds a
//! [`Scene`] in memory or dumps one to JSON for the CLI to pick up.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::Scene;
use crate::error::CorpusError;

/// Reads a scene from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_scene_json(path: &Path) -> Result<Scene, CorpusError> {
    let file = File::open(path).map_err(CorpusError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| CorpusError::SceneJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a scene to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_scene_json(path: &Path, scene: &Scene) -> Result<(), CorpusError> {
    let file = File::create(path).map_err(CorpusError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, scene).map_err(|source| CorpusError::SceneJsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a scene from a JSON string.
pub fn from_json_str(json: &str) -> Result<Scene, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a scene to a JSON string.
pub fn to_json_string(scene: &Scene) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(scene)
}
