//! Notifier capability for user-visible nudges.
//!
//! The scoring core produces exactly two kinds of outbound notice: the
//! spam rejection sent to a rate-limited sender, and the peer-feedback
//! suggestion. Everything else the chat host renders is out of scope.
//!
//! Delivery is an injected capability rather than ambient state, so call
//! sites stay explicit and testable.

/// Delivers a text notice to a recipient (a user id or room id).
pub trait Notifier: Send + Sync {
    /// Send `text` to `recipient`. Delivery is best-effort; failures are
    /// the implementation's concern and must not propagate.
    fn notify(&self, recipient: &str, text: &str);
}

/// A notifier that drops every message. Useful for batch jobs and tests
/// that do not assert on notices.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _recipient: &str, _text: &str) {}
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
