//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments and the global filter flags
//! - [`Command`] - the `parse`, `combine`, `classes`, `search`, `links` and
//!   `media` subcommands
//! - [`OutputArgs`] - `--output` / `--format` / `--timestamps`, shared by the
//!   subcommands that write files
//! - [`OutputFormat`] - clap-facing mirror of [`crate::format::OutputFormat`]
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use classpack::cli::{Args, Command};
//!
//! let args = Args::parse_from(["classpack", "--teacher", "guru", "classes", "kiddo.zip"]);
//! assert_eq!(args.teacher, "guru");
//! assert!(matches!(args.command, Command::Classes { .. }));
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TEACHER;
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::media::DEFAULT_MEDIA_DIR;

/// Parse WhatsApp group exports and find the class schedule hidden in them.
#[derive(Parser, Debug, Clone)]
#[command(name = "classpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    classpack parse \"WhatsApp Chat - Kiddo Music Group.zip\"
    classpack combine exports/*.zip -o combined.csv
    classpack classes exports/*.zip --after 2025-09-01 -o classes.json
    classpack --teacher Guruji classes chat.txt
    classpack search exports/*.zip -p 'navratri|garba'
    classpack links kiddo.zip
    classpack media exports/*.zip -d media")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Teacher display name (case-insensitive substring)
    #[arg(long, global = true, default_value = DEFAULT_TEACHER, value_name = "NAME")]
    pub teacher: String,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages whose sender contains this name
    #[arg(long, global = true, value_name = "USER")]
    pub from: Option<String>,

    /// Keep messages sent on this export date, e.g. 5/20/24 (repeatable)
    #[arg(long = "on", global = true, value_name = "M/D/YY")]
    pub on: Vec<String>,

    /// Drop WhatsApp system notices (joins, deletions, encryption notes)
    #[arg(long, global = true)]
    pub skip_system: bool,

    /// Show info-level log output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    /// Builds the message filter from the global flags.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidDate`](crate::ClasspackError::InvalidDate)
    /// for a malformed `--after` / `--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new().with_dates(self.on.iter().cloned());
        if let Some(ref after) = self.after {
            config = config.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            config = config.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            config = config.with_sender(from.clone());
        }
        Ok(config)
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse one export and show message statistics
    Parse {
        /// Export file (.zip or .txt)
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Merge several exports, dropping duplicate messages
    Combine {
        /// Export files (.zip or .txt)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List class, event and cancellation dates announced by the teacher
    Classes {
        /// Export files (.zip or .txt)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Find festival and event mentions from any sender
    Search {
        /// Export files (.zip or .txt)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Custom pattern to search for instead of the built-in keywords (repeatable)
        #[arg(short, long = "pattern", value_name = "REGEX")]
        patterns: Vec<String>,
    },

    /// List Google Drive links (practice recordings) shared by the teacher
    Links {
        /// Export files (.zip or .txt)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Extract attached audio, video and photos with readable names
    Media {
        /// Zip exports
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory to extract into
        #[arg(short = 'd', long = "dir", default_value = DEFAULT_MEDIA_DIR, value_name = "DIR")]
        out_dir: PathBuf,
    },
}

/// Output file options.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write results to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Output format (default: from the file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Add a resolved timestamp column
    #[arg(short = 't', long)]
    pub timestamps: bool,
}

impl OutputArgs {
    /// Returns the output path and its format, if `--output` was given.
    ///
    /// # Errors
    ///
    /// Returns [`ClasspackError::InvalidFormat`](crate::ClasspackError::InvalidFormat)
    /// if no `--format` was given and the extension is not recognized.
    pub fn target(&self) -> Result<Option<(&str, crate::format::OutputFormat)>> {
        let Some(ref path) = self.output else {
            return Ok(None);
        };
        let format = match self.format {
            Some(format) => format.into(),
            None => crate::format::OutputFormat::from_path(path)?,
        };
        Ok(Some((path.as_str(), format)))
    }

    /// Writer configuration for these flags.
    pub fn output_config(&self) -> OutputConfig {
        if self.timestamps {
            OutputConfig::new().with_timestamps()
        } else {
            OutputConfig::new()
        }
    }
}

/// Output format options.
///
/// ```rust
/// use classpack::cli::OutputFormat;
///
/// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&crate::format::OutputFormat::from(*self), f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
