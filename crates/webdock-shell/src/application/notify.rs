//! User-visible notification seam.
//!
//! Configuration failures and set-proxy confirmations surface as blocking
//! modal messages.  The application layer talks to this trait; the
//! infrastructure layer implements it with native dialogs, and tests use
//! a recording implementation.

/// Blocking, user-visible message surface.
///
/// Both methods block until the user dismisses the message.
pub trait Notifier: Send + Sync {
    /// Shows a blocking warning (used for config read failures).
    fn warn(&self, message: &str);

    /// Shows a blocking informational message (used for the set-proxy
    /// confirmation).
    fn info(&self, message: &str);
}
