//! Binary corpus reader and writer.
//!
//! A corpus file is one protobuf-encoded [`Layout`] with no header of its
//! own. Each export overwrites the previous file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use prost::Message;

use super::model::Layout;
use crate::error::CorpusError;

/// Suffix appended to the requested output name.
pub const CORPUS_SUFFIX: &str = ".pb";

/// Returns `<name>.pb`. The suffix is appended, so `page.1` becomes
/// `page.1.pb` rather than replacing the extension.
pub fn corpus_path(name: &Path) -> PathBuf {
    let mut os: OsString = name.as_os_str().to_owned();
    os.push(CORPUS_SUFFIX);
    PathBuf::from(os)
}

/// Encodes a layout to bytes.
pub fn to_bytes(layout: &Layout) -> Vec<u8> {
    layout.encode_to_vec()
}

/// Decodes a layout from bytes.
pub fn from_bytes(bytes: &[u8]) -> Result<Layout, prost::DecodeError> {
    Layout::decode(bytes)
}

/// Writes `layout` to `<name>.pb` and returns the written path.
///
/// The bytes go to a sibling temporary file first and are renamed into
/// place, so an interrupted write never leaves a truncated corpus behind.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_layout(name: &Path, layout: &Layout) -> Result<PathBuf, CorpusError> {
    let path = corpus_path(name);
    let mut tmp = path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let bytes = to_bytes(layout);
    if let Err(err) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, &path)) {
        let _ = fs::remove_file(&tmp);
        return Err(CorpusError::Io(err));
    }

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        "Found Staff: {}",
        layout.staff.len()
    );
    Ok(path)
}

/// Reads a layout from a corpus file.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn read_layout(path: &Path) -> Result<Layout, CorpusError> {
    let bytes = fs::read(path).map_err(CorpusError::Io)?;
    from_bytes(&bytes).map_err(|source| CorpusError::CorpusDecode {
        path: path.to_path_buf(),
        source,
    })
}
