//! # webdock-core
//!
//! Shared library for Webdock containing the proxy profile entity, proxy
//! rule derivation, and the settings-surface event contract.
//!
//! This crate is used by the desktop shell application. It has zero
//! dependencies on OS APIs, UI frameworks, or the filesystem.
//!
//! # Architecture overview (for beginners)
//!
//! Webdock is a desktop shell: it embeds a remote web application in a
//! native window, adds a system-tray presence, and lets the user route the
//! embedded page's traffic through an optional SOCKS5 proxy.  The moving
//! parts with real semantics all revolve around one tiny record:
//!
//! - **`config`** – The persisted proxy profile (`enabled`, `host`,
//!   `port`) and the lenient rules for reading it back from disk.  Files
//!   written by older or future versions must never crash the reader, so
//!   every field falls back to a default when it is absent or unusable.
//!
//! - **`rule`** – How a profile becomes an actual routing directive for
//!   the webview's network session: either a `socks5://host:port` rule or
//!   the empty rule meaning "direct connection".
//!
//! - **`events`** – The typed messages the settings dialog sends to the
//!   backend (`toggle-proxy` and `set-proxy`), decoded from the webview's
//!   IPC channel.

// Declare the three top-level modules.  Rust will look for each in a file
// with the same name (e.g., src/config.rs).
pub mod config;
pub mod events;
pub mod rule;

// Re-export the most-used types at the crate root so callers can write
// `webdock_core::ProxyConfig` instead of `webdock_core::config::ProxyConfig`.
pub use config::{ProxyConfig, DEFAULT_PROXY_HOST, DEFAULT_PROXY_PORT};
pub use events::SettingsEvent;
pub use rule::ProxyRule;
