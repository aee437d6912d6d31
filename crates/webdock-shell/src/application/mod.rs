//! Application layer for the Webdock shell.
//!
//! Use cases depend only on traits ([`notify::Notifier`],
//! [`apply_proxy::ProxySession`]) and on `webdock-core` domain types; all
//! infrastructure implementations are injected at construction time,
//! making the layer fully unit-testable.

pub mod apply_proxy;
pub mod notify;
pub mod settings;
