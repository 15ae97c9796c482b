//! WhatsApp system notices.
//!
//! Some notices carry a sender ("Priya: joined using this group's invite
//! link"), so they pass the line grammar. The assembler can drop them when
//! [`ParserConfig::skip_system_messages`](crate::config::ParserConfig) is set.

/// Body fragments WhatsApp uses for group notices (lowercase).
const SYSTEM_INDICATORS: &[&str] = &[
    "messages and calls are end-to-end encrypted",
    "created group",
    "changed the subject",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "changed their phone number",
    "joined using this group's invite link",
    "security code changed",
    "you're now an admin",
    "is now an admin",
    "turned on disappearing messages",
    "turned off disappearing messages",
    "this message was deleted",
];

/// Returns `true` if the message is a WhatsApp system notice rather than
/// something a participant wrote.
///
/// Media placeholders such as `<Media omitted>` or `image omitted` are real
/// messages and are not flagged.
///
/// # Example
///
/// ```rust
/// use classpack::parsing::is_system_message;
///
/// assert!(is_system_message("Kiddo Music Group", "Messages and calls are end-to-end encrypted."));
/// assert!(!is_system_message("Vaishnavi", "Class today at 5"));
/// ```
pub fn is_system_message(sender: &str, body: &str) -> bool {
    let body_lower = body.to_lowercase();
    if SYSTEM_INDICATORS
        .iter()
        .any(|indicator| body_lower.contains(indicator))
    {
        return true;
    }

    let sender_lower = sender.to_lowercase();
    sender.trim().is_empty() || sender_lower == "whatsapp" || sender_lower == "system"
}
