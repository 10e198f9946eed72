//! Text helpers for names, obscured receiver keys, and room classification.
//!
//! The points-given tally keys receivers by a cleaned, base64-encoded form
//! of their name so the raw name never appears in the sender's document
//! while the mapping stays reversible for display.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Strip a single leading `@` from a name. Inner `@` signs are kept.
#[must_use]
pub fn clean_name(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}

/// Trim, lowercase, and base64-encode a value into an obscured key.
///
/// Returns `None` when the trimmed input is empty, so absent reasons and
/// names stay absent instead of encoding to an empty key.
#[must_use]
pub fn clean_and_encode(raw: &str) -> Option<String> {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.is_empty() {
        return None;
    }
    Some(STANDARD.encode(cleaned))
}

/// Decode an obscured key back to its cleaned text form.
///
/// Returns `None` for invalid base64 or non-UTF-8 payloads.
#[must_use]
pub fn decode(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

/// Uppercase the first character, used when naming the bot wallet in
/// transfer log lines.
#[must_use]
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Whether a room identifier is a private/direct context.
///
/// Direct channels are prefixed `D` by the chat host; `shell` is the
/// local development adapter and also counts as direct.
#[must_use]
pub fn is_private_room(room: &str) -> bool {
    room.starts_with('D') || room == "shell"
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
