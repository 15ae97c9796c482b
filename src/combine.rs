//! Merging several exports of the same (or overlapping) chats.
//!
//! Group members often export the same chat at different times, so the
//! exports overlap. The combiner parses each source, drops messages it has
//! already seen and sorts the result chronologically.
//!
//! - **Dedup key**: `(date, time, lowercased sender, first 100 body chars)`.
//!   The first occurrence wins.
//! - **Order**: stable sort by [`Message::datetime`], so ties keep encounter
//!   order. A message whose datetime cannot be parsed fails the whole
//!   combine.
//! - **Unreadable sources** are reported in [`SourceReport`] and skipped.
//!
//! # Example
//!
//! ```rust,no_run
//! use classpack::combine::Combiner;
//!
//! let combined = Combiner::new()?.combine(&["kiddo.zip", "hindustani.zip"])?;
//! for source in &combined.sources {
//!     println!("{}: {} new", source.path.display(), source.added);
//! }
//! println!("{} unique messages", combined.messages.len());
//! # Ok::<(), classpack::ClasspackError>(())
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::Message;
use crate::config::CombineConfig;
use crate::error::{ClasspackError, Result};
use crate::message::prefix_chars;
use crate::parser::WhatsAppParser;

/// Identity of a message across exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    date: String,
    time: String,
    sender: String,
    body_prefix: String,
}

impl DedupKey {
    /// Builds the key from `msg`, keeping `prefix_len` body characters.
    pub fn new(msg: &Message, prefix_len: usize) -> Self {
        Self {
            date: msg.date.clone(),
            time: msg.time.clone(),
            sender: msg.sender.to_lowercase(),
            body_prefix: prefix_chars(&msg.body, prefix_len).to_string(),
        }
    }
}

/// Outcome of one export source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// The export path as given.
    pub path: PathBuf,
    /// Messages parsed from this source.
    pub parsed: usize,
    /// Messages not already seen in earlier sources.
    pub added: usize,
    /// Why the source was skipped, if it was.
    pub error: Option<String>,
}

impl SourceReport {
    /// Returns `true` if the source was read.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of combining several exports.
#[derive(Debug, Clone, Default)]
pub struct Combined {
    /// Unique messages in chronological order.
    pub messages: Vec<Message>,
    /// One report per input path, in input order.
    pub sources: Vec<SourceReport>,
}

impl Combined {
    /// Reports of sources that could not be read.
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| !s.is_ok())
    }

    /// Fails with [`ClasspackError::NoReadableSources`] when sources were
    /// given but none of them could be read.
    pub fn ensure_any_readable(&self) -> Result<()> {
        if !self.sources.is_empty() && self.sources.iter().all(|s| !s.is_ok()) {
            return Err(ClasspackError::no_readable_sources(self.sources.len()));
        }
        Ok(())
    }

    /// Number of parsed messages dropped as duplicates.
    pub fn duplicates(&self) -> usize {
        self.sources.iter().map(|s| s.parsed - s.added).sum()
    }
}

/// Deduplicating accumulator shared by [`Combiner`] and [`merge_messages`].
#[derive(Debug)]
struct Accumulator {
    prefix_len: usize,
    seen: HashSet<DedupKey>,
    messages: Vec<Message>,
}

impl Accumulator {
    fn new(prefix_len: usize) -> Self {
        Self {
            prefix_len,
            seen: HashSet::new(),
            messages: Vec::new(),
        }
    }

    /// Adds unseen messages, returning how many were new.
    fn extend(&mut self, batch: Vec<Message>) -> usize {
        let before = self.messages.len();
        for msg in batch {
            if self.seen.insert(DedupKey::new(&msg, self.prefix_len)) {
                self.messages.push(msg);
            }
        }
        self.messages.len() - before
    }

    fn finish(self) -> Result<Vec<Message>> {
        sort_chronologically(self.messages)
    }
}

/// Parses and merges several exports.
#[derive(Debug, Clone)]
pub struct Combiner {
    config: CombineConfig,
    parser: WhatsAppParser,
}

impl Combiner {
    /// Creates a combiner with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(CombineConfig::default())
    }

    /// Creates a combiner with custom configuration.
    pub fn with_config(config: CombineConfig) -> Result<Self> {
        let parser = WhatsAppParser::with_config(config.parser.clone())?;
        Ok(Self { config, parser })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &CombineConfig {
        &self.config
    }

    /// Parses every path and merges the results.
    ///
    /// A source that cannot be read (missing file, corrupt archive, archive
    /// without a transcript) is recorded in its [`SourceReport`] and the
    /// remaining sources are still processed. Any other error aborts.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDateTime`](crate::ClasspackError::InvalidDateTime)
    /// if any kept message has an unparseable date/time.
    pub fn combine<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Combined> {
        let mut acc = Accumulator::new(self.config.dedup_prefix_len);
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let report = match self.parser.parse(path) {
                Ok(messages) => {
                    let parsed = messages.len();
                    let added = acc.extend(messages);
                    tracing::info!(path = %path.display(), parsed, added, "merged export");
                    SourceReport {
                        path: path.to_path_buf(),
                        parsed,
                        added,
                        error: None,
                    }
                }
                Err(e) if e.is_unreadable_source() => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping export");
                    SourceReport {
                        path: path.to_path_buf(),
                        parsed: 0,
                        added: 0,
                        error: Some(e.to_string()),
                    }
                }
                Err(e) => return Err(e),
            };
            sources.push(report);
        }

        Ok(Combined {
            messages: acc.finish()?,
            sources,
        })
    }
}

/// Merges already-parsed message batches, deduplicating and sorting.
///
/// Uses the default 100-character body prefix for dedup keys.
///
/// # Errors
///
/// Returns [`ClasspackError::InvalidDateTime`](crate::ClasspackError::InvalidDateTime)
/// if any kept message has an unparseable date/time.
pub fn merge_messages<I>(batches: I) -> Result<Vec<Message>>
where
    I: IntoIterator<Item = Vec<Message>>,
{
    let mut acc = Accumulator::new(CombineConfig::default().dedup_prefix_len);
    for batch in batches {
        acc.extend(batch);
    }
    acc.finish()
}

/// Sorts messages by datetime; equal datetimes keep their relative order.
///
/// # Errors
///
/// Fails on the first message whose date/time cannot be parsed.
pub fn sort_chronologically(messages: Vec<Message>) -> Result<Vec<Message>> {
    let mut keyed = messages
        .into_iter()
        .map(|msg| Ok((msg.datetime()?, msg)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(dt, _)| *dt);
    Ok(keyed.into_iter().map(|(_, msg)| msg).collect())
}
