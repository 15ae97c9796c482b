//! Extracting and renaming the media attached to zip exports.
//!
//! WhatsApp names attachments like `00000009-AUDIO-2024-05-12-13-12-04.m4a`.
//! The organizer sorts them into `audio/`, `video/` and `photos/` and gives
//! each a readable name built from its timestamp and, when the teacher posted
//! something nearby, what it probably is:
//!
//! | Entry | Nearby teacher message | New name |
//! |-------|------------------------|----------|
//! | `00000009-AUDIO-2024-05-12-13-12-04.m4a` | "Sargam practice for this week" | `audio/2024-05-12_Practice-Recording_1312.m4a` |
//! | `00000010-PHOTO-2024-05-12-18-00-00.jpg` | none | `photos/2024-05-12_Photo_1800.jpg` |
//! | `IMG_1234.JPG` | - | `photos/unknown-date_Photo_0000.jpg` |
//!
//! Names that collide within one media kind get `_2`, `_3`, ... suffixes.
//!
//! # Example
//!
//! ```rust
//! use classpack::Message;
//! use classpack::media::{MediaOrganizer, NameAllocator};
//!
//! let messages = vec![Message::new(
//!     "1:05 PM",
//!     "5/12/2024",
//!     "Vaishnavi",
//!     "Bandish recording from today",
//! )];
//! let organizer = MediaOrganizer::new()?;
//! let plans = organizer.plan(
//!     &["_chat.txt", "00000009-AUDIO-2024-05-12-13-12-04.m4a"],
//!     &messages,
//!     &mut NameAllocator::new(),
//! )?;
//!
//! assert_eq!(plans.len(), 1);
//! assert_eq!(plans[0].file_name, "2024-05-12_Practice-Recording_1312.m4a");
//! # Ok::<(), classpack::ClasspackError>(())
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::MediaConfig;
use crate::error::{ClasspackError, Result};
use crate::extract::PatternSet;
use crate::source::{entry_names, open_archive};

/// Context table, `(pattern, label)`. The first matching row wins.
pub const MEDIA_CONTEXT: &[(&str, &str)] = &[
    (r"recording|practice", "Practice-Recording"),
    (r"sargam", "Sargam-Practice"),
    (r"bandish", "Bandish"),
    (r"alaap", "Alaap"),
    (r"concert|performance", "Performance"),
    (r"class", "Class"),
];

/// Directory media is extracted into when none is given.
pub const DEFAULT_MEDIA_DIR: &str = "media";

const MEDIA_NAME_PATTERN: &str =
    r"\d+-(?:AUDIO|VIDEO|PHOTO)-(\d{4}-\d{2}-\d{2}-\d{2}-\d{2}-\d{2})";
const MEDIA_NAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Kind of attachment, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `.m4a`, `.opus`, `.mp3`, `.aac`, `.ogg`, `.wav`
    Audio,
    /// `.mp4`, `.mov`, `.avi`, `.webm`, `.3gp`
    Video,
    /// `.jpg`, `.jpeg`, `.png`, `.gif`, `.webp`
    Photo,
}

impl MediaKind {
    /// All kinds, in output order.
    pub fn all() -> &'static [MediaKind] {
        &[MediaKind::Audio, MediaKind::Video, MediaKind::Photo]
    }

    /// Classifies an entry name by its extension, ignoring case.
    ///
    /// ```rust
    /// use classpack::media::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_name("clip.MOV"), Some(MediaKind::Video));
    /// assert_eq!(MediaKind::from_name("_chat.txt"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = lowercase_extension(name)?;
        match ext.as_str() {
            "m4a" | "opus" | "mp3" | "aac" | "ogg" | "wav" => Some(MediaKind::Audio),
            "mp4" | "mov" | "avi" | "webm" | "3gp" => Some(MediaKind::Video),
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(MediaKind::Photo),
            _ => None,
        }
    }

    /// Output subdirectory.
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
            MediaKind::Photo => "photos",
        }
    }

    /// Name part used when no context was found.
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
            MediaKind::Photo => "Photo",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

fn lowercase_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Builds `<date>_<context or kind label>_<HHMM>`, without extension.
///
/// ```rust
/// use chrono::NaiveDate;
/// use classpack::media::{MediaKind, readable_base};
///
/// let at = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap().and_hms_opt(13, 12, 4).unwrap();
/// assert_eq!(readable_base(Some(at), Some("Bandish"), MediaKind::Audio), "2024-05-12_Bandish_1312");
/// assert_eq!(readable_base(None, None, MediaKind::Photo), "unknown-date_Photo_0000");
/// ```
pub fn readable_base(
    taken_at: Option<NaiveDateTime>,
    context: Option<&str>,
    kind: MediaKind,
) -> String {
    let (date, time) = match taken_at {
        Some(at) => (
            at.format("%Y-%m-%d").to_string(),
            at.format("%H%M").to_string(),
        ),
        None => ("unknown-date".to_string(), "0000".to_string()),
    };
    format!("{}_{}_{}", date, context.unwrap_or(kind.label()), time)
}

/// Hands out collision-free file names within each media kind.
///
/// The first use of a base name keeps it; later uses get `_2`, `_3`, ...
/// Extensions do not take part, so `x.m4a` and `x.opus` still collide.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    seen: HashMap<(MediaKind, String), usize>,
}

impl NameAllocator {
    /// Creates an allocator with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` (numbered if taken) with `.ext` appended.
    pub fn allocate(&mut self, kind: MediaKind, base: &str, ext: &str) -> String {
        let uses = self.seen.entry((kind, base.to_string())).or_insert(0);
        *uses += 1;
        match *uses {
            1 => format!("{base}.{ext}"),
            n => format!("{base}_{n}.{ext}"),
        }
    }
}

/// Where one archive entry goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlan {
    /// Entry name inside the archive.
    pub entry: String,
    /// Kind of attachment.
    pub kind: MediaKind,
    /// Timestamp from the entry name, if it had one.
    pub taken_at: Option<NaiveDateTime>,
    /// Context label from a nearby teacher message.
    pub context: Option<String>,
    /// New file name, unique within `kind`.
    pub file_name: String,
}

impl MediaPlan {
    /// Path relative to the output directory, e.g. `audio/2024-05-12_Bandish_1312.m4a`.
    pub fn relative_path(&self) -> PathBuf {
        Path::new(self.kind.dir_name()).join(&self.file_name)
    }
}

/// Outcome of one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// The archive path as given.
    pub path: PathBuf,
    /// Media entries written, in archive order.
    pub extracted: Vec<MediaPlan>,
    /// Entries that are not media (the transcript, documents, folders).
    pub skipped: usize,
    /// Why the archive was skipped, if it was.
    pub error: Option<String>,
}

/// Outcome of organizing several archives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaReport {
    /// Output directory.
    pub out_dir: PathBuf,
    /// One report per archive, in input order.
    pub archives: Vec<ArchiveReport>,
}

impl MediaReport {
    /// Files written of the given kind.
    pub fn count(&self, kind: MediaKind) -> usize {
        self.extracted().filter(|plan| plan.kind == kind).count()
    }

    /// Every written file, archive by archive.
    pub fn extracted(&self) -> impl Iterator<Item = &MediaPlan> {
        self.archives.iter().flat_map(|a| a.extracted.iter())
    }

    /// Reports of archives that could not be read.
    pub fn failed_archives(&self) -> impl Iterator<Item = &ArchiveReport> {
        self.archives.iter().filter(|a| a.error.is_some())
    }
}

/// Names and extracts media entries using chat messages for context.
#[derive(Debug, Clone)]
pub struct MediaOrganizer {
    config: MediaConfig,
    media_name: Regex,
    context: PatternSet,
}

impl MediaOrganizer {
    /// Creates an organizer with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(MediaConfig::default())
    }

    /// Creates an organizer with custom configuration.
    pub fn with_config(config: MediaConfig) -> Result<Self> {
        Ok(Self {
            config,
            media_name: Regex::new(MEDIA_NAME_PATTERN)?,
            context: PatternSet::new("media context", MEDIA_CONTEXT)?,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Reads the timestamp WhatsApp embeds in a media entry name.
    ///
    /// Returns `None` when the name has no timestamp or it is not a real
    /// calendar datetime.
    pub fn media_timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        let caps = self.media_name.captures(name)?;
        NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), MEDIA_NAME_FORMAT).ok()
    }

    /// Returns the context label of the first teacher message within the
    /// window around `at` whose body matches [`MEDIA_CONTEXT`].
    ///
    /// Messages are scanned in the order given; the window bounds are
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`] if a teacher message has an
    /// unparseable date/time.
    pub fn find_context(&self, at: NaiveDateTime, messages: &[Message]) -> Result<Option<&str>> {
        let window_secs = self.config.window_minutes.saturating_mul(60);
        for msg in messages.iter().filter(|m| m.is_from(&self.config.teacher)) {
            let sent = msg.datetime()?;
            if (sent - at).num_seconds().abs() > window_secs {
                continue;
            }
            if let Some(label) = self.context.first_match(&msg.body) {
                return Ok(Some(label));
            }
        }
        Ok(None)
    }

    /// Plans names for the media among `entries`, skipping everything else.
    ///
    /// `names` carries collision numbering across calls, so one allocator
    /// should be shared by all archives written to the same directory.
    pub fn plan<S: AsRef<str>>(
        &self,
        entries: &[S],
        messages: &[Message],
        names: &mut NameAllocator,
    ) -> Result<Vec<MediaPlan>> {
        let mut plans = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            let Some(kind) = MediaKind::from_name(entry) else {
                continue;
            };
            let ext = lowercase_extension(entry).unwrap_or_default();
            let taken_at = self.media_timestamp(entry);
            let context = match taken_at {
                Some(at) => self.find_context(at, messages)?,
                None => None,
            };
            let base = readable_base(taken_at, context, kind);
            plans.push(MediaPlan {
                entry: entry.to_string(),
                kind,
                taken_at,
                context: context.map(str::to_string),
                file_name: names.allocate(kind, &base, &ext),
            });
        }
        Ok(plans)
    }

    /// Extracts the media of every archive into `out_dir/{audio,video,photos}`.
    ///
    /// An archive that cannot be opened is recorded in its [`ArchiveReport`]
    /// and the rest are still processed. Existing files with the same name
    /// are overwritten.
    ///
    /// # Errors
    ///
    /// - [`ClasspackError::Io`] if the output directory or a file cannot be written
    /// - [`ClasspackError::Archive`] if an entry of an opened archive cannot be read
    /// - [`ClasspackError::InvalidDateTime`] from [`find_context`](Self::find_context)
    pub fn organize<P: AsRef<Path>>(
        &self,
        archives: &[P],
        messages: &[Message],
        out_dir: &Path,
    ) -> Result<MediaReport> {
        for kind in MediaKind::all() {
            fs::create_dir_all(out_dir.join(kind.dir_name()))?;
        }

        let mut names = NameAllocator::new();
        let mut reports = Vec::with_capacity(archives.len());

        for path in archives {
            let path = path.as_ref();
            let mut report = ArchiveReport {
                path: path.to_path_buf(),
                extracted: Vec::new(),
                skipped: 0,
                error: None,
            };

            let mut archive = match open_archive(path) {
                Ok(archive) => archive,
                Err(e) if e.is_unreadable_source() => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping archive");
                    report.error = Some(e.to_string());
                    reports.push(report);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let entries = entry_names(&archive);
            let plans = self.plan(&entries, messages, &mut names)?;
            report.skipped = entries.len() - plans.len();

            for plan in plans {
                let mut entry = archive
                    .by_name(&plan.entry)
                    .map_err(|e| ClasspackError::archive(path, e))?;
                let mut file = File::create(out_dir.join(plan.relative_path()))?;
                io::copy(&mut entry, &mut file)?;
                tracing::debug!(entry = %plan.entry, to = %plan.relative_path().display(), "extracted");
                report.extracted.push(plan);
            }

            tracing::info!(
                path = %path.display(),
                extracted = report.extracted.len(),
                skipped = report.skipped,
                "organized archive"
            );
            reports.push(report);
        }

        Ok(MediaReport {
            out_dir: out_dir.to_path_buf(),
            archives: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn teacher(time: &str, body: &str) -> Message {
        Message::new(time, "5/12/2024", "Vaishnavi Kondapalli", body)
    }

    fn organizer() -> MediaOrganizer {
        MediaOrganizer::new().unwrap()
    }

    // =========================================================================
    // Classification and names
    // =========================================================================

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_name("a.M4A"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_name("b.opus"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_name("c.3gp"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_name("d.webp"), Some(MediaKind::Photo));
        assert_eq!(MediaKind::from_name("notes.pdf"), None);
        assert_eq!(MediaKind::from_name("folder/"), None);
        assert_eq!(MediaKind::from_name("jpg"), None);
    }

    #[test]
    fn test_kind_dirs() {
        let dirs: Vec<_> = MediaKind::all().iter().map(|k| k.dir_name()).collect();
        assert_eq!(dirs, ["audio", "video", "photos"]);
        assert_eq!(MediaKind::Photo.to_string(), "photos");
    }

    #[test]
    fn test_media_timestamp() {
        let o = organizer();
        assert_eq!(
            o.media_timestamp("00000009-AUDIO-2024-05-12-13-12-04.m4a"),
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap().and_hms_opt(13, 12, 4)
        );
        assert_eq!(
            o.media_timestamp("media/00000010-PHOTO-2024-05-12-18-00-00.jpg"),
            Some(at(12, 18, 0))
        );
        assert_eq!(o.media_timestamp("IMG_1234.jpg"), None);
        // Month 13 looks right but is not a date.
        assert_eq!(o.media_timestamp("00000011-VIDEO-2024-13-12-18-00-00.mp4"), None);
    }

    #[test]
    fn test_name_allocator_numbers_per_kind() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate(MediaKind::Audio, "x", "m4a"), "x.m4a");
        assert_eq!(names.allocate(MediaKind::Audio, "x", "opus"), "x_2.opus");
        assert_eq!(names.allocate(MediaKind::Audio, "x", "m4a"), "x_3.m4a");
        assert_eq!(names.allocate(MediaKind::Photo, "x", "jpg"), "x.jpg");
    }

    // =========================================================================
    // Context
    // =========================================================================

    #[test]
    fn test_context_from_teacher_within_window() {
        let o = organizer();
        let messages = vec![
            teacher("12:30 PM", "Sargam for next week"),
            Message::new("1:10 PM", "5/12/2024", "Priya", "practice recording from my side"),
        ];
        assert_eq!(o.find_context(at(12, 13, 0), &messages).unwrap(), Some("Sargam-Practice"));
        // 12:30 is 31 minutes before 13:01.
        assert_eq!(o.find_context(at(12, 13, 1), &messages).unwrap(), None);
    }

    #[test]
    fn test_context_table_order_and_fallthrough() {
        let o = organizer();
        let messages = vec![
            teacher("1:00 PM", "see everyone soon"),
            teacher("1:05 PM", "Alaap and bandish practice"),
        ];
        assert_eq!(
            o.find_context(at(12, 13, 0), &messages).unwrap(),
            Some("Practice-Recording")
        );

        let class_only = vec![teacher("1:00 PM", "Class photo!")];
        assert_eq!(o.find_context(at(12, 13, 0), &class_only).unwrap(), Some("Class"));
    }

    #[test]
    fn test_context_custom_teacher_and_window() {
        let o = MediaOrganizer::with_config(
            MediaConfig::new().with_teacher("Guruji").with_window_minutes(5),
        )
        .unwrap();
        let messages = vec![
            Message::new("1:00 PM", "5/12/2024", "Guruji", "concert tonight"),
            teacher("1:00 PM", "class now"),
        ];
        assert_eq!(o.find_context(at(12, 13, 5), &messages).unwrap(), Some("Performance"));
        assert_eq!(o.find_context(at(12, 13, 6), &messages).unwrap(), None);
    }

    #[test]
    fn test_context_bad_teacher_datetime_is_error() {
        let messages = vec![Message::new("1:00 PM", "2/30/2024", "Vaishnavi", "class")];
        let err = organizer().find_context(at(12, 13, 0), &messages).unwrap_err();
        assert!(err.is_invalid_datetime());
    }

    // =========================================================================
    // Planning and extraction
    // =========================================================================

    #[test]
    fn test_plan_names_and_collisions() {
        let messages = vec![teacher("1:05 PM", "Bandish recording from today")];
        let entries = [
            "_chat.txt",
            "00000009-AUDIO-2024-05-12-13-12-04.m4a",
            "00000010-AUDIO-2024-05-12-13-12-50.opus",
            "00000011-VIDEO-2024-05-20-09-00-00.MP4",
            "IMG_1234.JPG",
        ];
        let plans = organizer()
            .plan(&entries, &messages, &mut NameAllocator::new())
            .unwrap();

        let paths: Vec<_> = plans.iter().map(|p| p.relative_path()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("audio/2024-05-12_Practice-Recording_1312.m4a"),
                PathBuf::from("audio/2024-05-12_Practice-Recording_1312_2.opus"),
                PathBuf::from("video/2024-05-20_Video_0900.mp4"),
                PathBuf::from("photos/unknown-date_Photo_0000.jpg"),
            ]
        );
        assert_eq!(plans[0].context.as_deref(), Some("Practice-Recording"));
        assert_eq!(plans[3].taken_at, None);
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_organize_extracts_and_reports() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("kiddo.zip");
        write_zip(
            &first,
            &[
                ("_chat.txt", b"[5/12/24, 1:05:00 PM] Vaishnavi: practice this".as_slice()),
                ("00000009-AUDIO-2024-05-12-13-12-04.m4a", b"audio-1".as_slice()),
                ("00000010-PHOTO-2024-05-12-18-00-00.jpg", b"photo-1".as_slice()),
            ],
        );
        let second = dir.path().join("again.zip");
        write_zip(
            &second,
            &[("00000009-AUDIO-2024-05-12-13-12-04.m4a", b"audio-2".as_slice())],
        );
        let broken = dir.path().join("broken.zip");
        fs::write(&broken, b"not a zip").unwrap();

        let messages = vec![teacher("1:05 PM", "practice this")];
        let out = dir.path().join("media");
        let report = organizer()
            .organize(&[first, broken, second], &messages, &out)
            .unwrap();

        assert_eq!(report.count(MediaKind::Audio), 2);
        assert_eq!(report.count(MediaKind::Photo), 1);
        assert_eq!(report.count(MediaKind::Video), 0);
        assert_eq!(report.archives[0].skipped, 1);
        assert_eq!(report.failed_archives().count(), 1);
        assert!(out.join("video").is_dir());

        let audio = out.join("audio");
        assert_eq!(
            fs::read(audio.join("2024-05-12_Practice-Recording_1312.m4a")).unwrap(),
            b"audio-1"
        );
        assert_eq!(
            fs::read(audio.join("2024-05-12_Practice-Recording_1312_2.m4a")).unwrap(),
            b"audio-2"
        );
        assert_eq!(
            fs::read(out.join("photos/2024-05-12_Photo_1800.jpg")).unwrap(),
            b"photo-1"
        );
    }
}
