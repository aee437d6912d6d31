//! Native modal dialogs.
//!
//! Implements the [`Notifier`] seam with blocking `rfd` message boxes and
//! hosts the About dialog.  Everything here blocks the calling thread
//! until the user dismisses the dialog, which is exactly the contract the
//! settings surface relies on: the set-proxy confirmation must not appear
//! before the rule has landed, and must be seen before the flow continues.

pub mod mock;

use crate::application::notify::Notifier;

/// Dialog title shared by all modal messages.
const DIALOG_TITLE: &str = "Webdock";

/// [`Notifier`] backed by native message boxes.
pub struct RfdNotifier;

impl Notifier for RfdNotifier {
    fn warn(&self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_title(DIALOG_TITLE)
            .set_level(rfd::MessageLevel::Warning)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn info(&self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_title(DIALOG_TITLE)
            .set_level(rfd::MessageLevel::Info)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Returns the version string shown in the About dialog.
fn version_string() -> String {
    if cfg!(debug_assertions) {
        format!("{}-dev", env!("CARGO_PKG_VERSION"))
    } else {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Shows the blocking About dialog.
pub fn show_about() {
    let _ = rfd::MessageDialog::new()
        .set_title("About Webdock")
        .set_level(rfd::MessageLevel::Info)
        .set_description(format!(
            "Webdock {}\n\nA desktop shell for your web workspace: native \
             window, tray presence, and an optional SOCKS5 proxy.\n\nIf the \
             page stays blank, try reloading from the tray menu.",
            version_string()
        ))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_is_non_empty() {
        assert!(!version_string().is_empty());
    }

    #[test]
    fn test_version_string_starts_with_package_version() {
        assert!(version_string().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
