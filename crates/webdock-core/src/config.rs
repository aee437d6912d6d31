//! The persisted proxy profile.
//!
//! Exactly one `ProxyConfig` exists per installation.  The shell stores it
//! as a small JSON document (`proxy.json`) in the per-user data directory
//! and reads it once at startup; afterwards it only changes through
//! explicit settings events.
//!
//! # Read-time defaulting
//!
//! Defaulting happens when the profile is *read*, not when it is written.
//! A partially-specified record written by a future version must remain
//! loadable, so every field the reader cannot use falls back to its
//! default silently:
//!
//! - an absent or falsy `host`/`port` (empty string, `null`, `0`) becomes
//!   the default value,
//! - `enabled` is coerced to a strict boolean from whatever JSON value is
//!   present (`1` and `"yes"` count as on; `0`, `""`, `null`, and a
//!   missing field count as off),
//! - `port` may be stored as a string or a number; numbers are
//!   stringified on the way in.
//!
//! `serde`'s `#[serde(default)]` cannot express "present but empty means
//! default", so the lenient path goes through [`ProxyConfig::from_loose_json`]
//! over a raw [`serde_json::Value`].  The strict `Serialize`/`Deserialize`
//! derives are still used for writing and for round-trips of well-formed
//! records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default proxy host used when the stored value is absent or unusable.
pub const DEFAULT_PROXY_HOST: &str = "127.0.0.1";

/// Default proxy port used when the stored value is absent or unusable.
pub const DEFAULT_PROXY_PORT: &str = "1080";

/// The proxy profile persisted to `proxy.json`.
///
/// `port` is kept as a string because it travels between a text input in
/// the settings dialog and the textual `socks5://host:port` rule; the
/// reader still accepts a JSON number for compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Whether the proxy should be active.
    pub enabled: bool,
    /// Proxy server address.
    pub host: String,
    /// Proxy server port.
    pub port: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: DEFAULT_PROXY_HOST.to_string(),
            port: DEFAULT_PROXY_PORT.to_string(),
        }
    }
}

impl ProxyConfig {
    /// Builds a profile from an arbitrary JSON value, applying read-time
    /// defaulting to each field.
    ///
    /// Never fails: any shape of JSON (including a non-object) yields a
    /// usable profile.
    pub fn from_loose_json(value: &Value) -> Self {
        let enabled = value.get("enabled").map(is_truthy).unwrap_or(false);

        let host = value
            .get("host")
            .and_then(non_empty_string)
            .unwrap_or_else(|| DEFAULT_PROXY_HOST.to_string());

        let port = value
            .get("port")
            .and_then(port_value)
            .unwrap_or_else(|| DEFAULT_PROXY_PORT.to_string());

        Self { enabled, host, port }
    }
}

/// JavaScript-style truthiness over a JSON value.
///
/// `null`, `false`, `0`, and `""` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extracts a non-empty string, or `None` for anything else.
fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Extracts a usable port: a non-empty string, or a non-zero number
/// rendered as a string.
fn port_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if is_truthy(value) => Some(n.to_string()),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
