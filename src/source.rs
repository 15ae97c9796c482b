//! Resolving an export path to transcript text.
//!
//! WhatsApp's "Export chat" produces either a zip archive (transcript plus
//! attached media) or a bare `.txt` transcript. Inside an archive the
//! transcript is normally `_chat.txt`; older exports name it after the chat.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{ClasspackError, Result};

/// WhatsApp's standard transcript entry name.
pub const CHAT_ENTRY: &str = "_chat.txt";

/// Transcript text together with where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// The export path, joined with the entry name for archives.
    pub origin: PathBuf,
    /// Decoded transcript text (invalid UTF-8 replaced).
    pub text: String,
}

/// Returns `true` if `path` has a `.zip` extension (any case).
pub fn is_zip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Reads the transcript of an export.
///
/// For `.zip` paths the entry named `_chat.txt` (case-insensitive) is used,
/// else the first `.txt` entry in archive order. Any other path is read as
/// a plain transcript. Bytes are decoded as UTF-8 with replacement.
///
/// # Errors
///
/// - [`ClasspackError::Io`] if the path is missing or unreadable
/// - [`ClasspackError::Archive`] if the zip is corrupt
/// - [`ClasspackError::NoTranscript`] if the zip has no `.txt` entry
pub fn read_transcript(path: &Path) -> Result<Transcript> {
    if is_zip_path(path) {
        read_zip_transcript(path)
    } else {
        let bytes = std::fs::read(path)?;
        Ok(Transcript {
            origin: path.to_path_buf(),
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

pub(crate) fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path)?;
    ZipArchive::new(file).map_err(|e| ClasspackError::archive(path, e))
}

/// Lists the entry names of a zip archive in archive order.
///
/// Names come from the central directory, so an entry whose data is damaged
/// is still listed; the failure surfaces when that entry is read.
///
/// # Errors
///
/// - [`ClasspackError::Io`] if the path is missing or unreadable
/// - [`ClasspackError::Archive`] if the central directory is corrupt
pub fn list_archive_entries(path: &Path) -> Result<Vec<String>> {
    Ok(entry_names(&open_archive(path)?))
}

pub(crate) fn entry_names(archive: &ZipArchive<File>) -> Vec<String> {
    archive.file_names().map(str::to_string).collect()
}

fn read_zip_transcript(path: &Path) -> Result<Transcript> {
    let mut archive = open_archive(path)?;

    let names = entry_names(&archive);
    let entry = select_transcript_entry(&names)
        .map(str::to_string)
        .ok_or_else(|| ClasspackError::no_transcript(path))?;

    let mut bytes = Vec::new();
    archive
        .by_name(&entry)
        .map_err(|e| ClasspackError::archive(path, e))?
        .read_to_end(&mut bytes)?;

    Ok(Transcript {
        origin: path.join(&entry),
        text: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Picks the transcript entry among archive entry names.
///
/// `names` must be in archive order.
pub fn select_transcript_entry<S: AsRef<str>>(names: &[S]) -> Option<&str> {
    names
        .iter()
        .map(|name| name.as_ref())
        .find(|name| name.eq_ignore_ascii_case(CHAT_ENTRY))
        .or_else(|| {
            names
                .iter()
                .map(|name| name.as_ref())
                .find(|name| name.to_ascii_lowercase().ends_with(".txt"))
        })
}
