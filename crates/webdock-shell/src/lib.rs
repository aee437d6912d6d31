//! webdock-shell library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does webdock-shell do? (for beginners)
//!
//! The *shell* is the native half of Webdock.  The actual product UI is a
//! remote web application; the shell's job is to make it feel like a
//! desktop program:
//!
//! 1. Opens a native window with an embedded webview pointed at the
//!    remote application, with a desktop-browser user agent so the site
//!    serves its full UI.
//! 2. Keeps a system-tray icon alive so closing the window hides the app
//!    instead of quitting it.
//! 3. Persists one SOCKS5 proxy profile (`proxy.json` in the user's data
//!    directory) and installs the matching rule on the webview's network
//!    session — at startup and whenever the user changes the settings.
//! 4. Shows a small settings dialog (toggle + host + port) and routes its
//!    events through the config store and the proxy applier in a fixed
//!    order: persist first, then apply to the live session.

/// Application layer: use cases and the traits they depend on.
pub mod application;

/// Infrastructure layer: storage, webview, tray, dialogs, and UI bridge.
pub mod infrastructure;

/// Application context and the event loop that ties everything together.
pub mod app;
