//! Infrastructure layer for the Webdock shell.
//!
//! Adapters between the application layer and the outside world: the JSON
//! config store, the wry-backed webview session, the system tray, native
//! dialogs, and the settings-dialog UI bridge.  Recording test doubles for
//! the dialog and session seams live in the `mock` submodules.

pub mod dialogs;
pub mod storage;
pub mod tray;
pub mod ui_bridge;
pub mod webview;
