//! Line-level parsing building blocks.
//!
//! - [`normalize`]: splits raw text into lines and strips platform Unicode artifacts
//! - [`grammar`]: recognises message-start lines under the two bracketed layouts
//! - [`datetime`]: resolves a message's date/time strings to a calendar datetime
//! - [`whatsapp`]: system-notice detection for WhatsApp transcripts

pub mod datetime;
pub mod grammar;
pub mod normalize;
pub mod whatsapp;

pub use datetime::{DateTimeGrammar, parse_message_datetime};
pub use grammar::{GrammarMatcher, MessageGrammar, MessageStart};
pub use normalize::{normalize_line, split_lines};
pub use whatsapp::is_system_message;
