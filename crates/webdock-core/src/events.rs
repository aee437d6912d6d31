//! The settings-surface event contract.
//!
//! The settings dialog runs as HTML inside a small webview and talks to
//! the Rust backend over the webview's IPC channel.  Each message is a
//! JSON object tagged with a `type` field:
//!
//! ```json
//! { "type": "toggle-proxy", "enabled": true }
//! { "type": "set-proxy", "host": "proxy.local", "port": "1080" }
//! ```
//!
//! Decoding happens at the IPC boundary; the rest of the application only
//! ever sees the typed [`SettingsEvent`].  An unknown `type` is a decode
//! error the bridge logs and drops — user input must never crash the
//! shell.

use serde::{Deserialize, Serialize};

/// A mutation event from the settings dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SettingsEvent {
    /// Flip the proxy on or off without touching the stored endpoint.
    ToggleProxy { enabled: bool },
    /// Replace the stored endpoint, leaving the on/off state as is.
    SetProxy { host: String, port: String },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_toggle_proxy_payload() {
        // Arrange – the exact JSON the dialog posts
        let payload = r#"{ "type": "toggle-proxy", "enabled": true }"#;

        // Act
        let event: SettingsEvent = serde_json::from_str(payload).expect("decode");

        // Assert
        assert_eq!(event, SettingsEvent::ToggleProxy { enabled: true });
    }

    #[test]
    fn test_decodes_set_proxy_payload() {
        let payload = r#"{ "type": "set-proxy", "host": "proxy.local", "port": "1080" }"#;
        let event: SettingsEvent = serde_json::from_str(payload).expect("decode");
        assert_eq!(
            event,
            SettingsEvent::SetProxy {
                host: "proxy.local".to_string(),
                port: "1080".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_event_type_is_a_decode_error() {
        let payload = r#"{ "type": "drop-tables", "enabled": true }"#;
        let result: Result<SettingsEvent, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trips_through_json() {
        let event = SettingsEvent::SetProxy {
            host: "10.0.0.5".to_string(),
            port: "9999".to_string(),
        };
        let text = serde_json::to_string(&event).expect("encode");
        // The tag must use the kebab-case wire name.
        assert!(text.contains(r#""type":"set-proxy""#));
        let restored: SettingsEvent = serde_json::from_str(&text).expect("decode");
        assert_eq!(event, restored);
    }
}
