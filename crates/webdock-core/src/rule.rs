//! Proxy rule derivation.
//!
//! A [`ProxyRule`] is what actually gets installed on the embedded
//! webview's network session: either a single SOCKS5 endpoint or the empty
//! rule set meaning "direct connection".  The session only ever holds one
//! rule; installing a new one replaces the previous one.
//!
//! The derivation collapses the profile's three fields into two states:
//! the rule is `Socks5` only when the proxy is enabled *and* both host and
//! port are non-empty.  An enabled profile with a missing endpoint behaves
//! as "no proxy".

use std::fmt;

use crate::config::ProxyConfig;

/// The routing directive for the embedded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRule {
    /// No proxy: requests use a direct connection.
    Direct,
    /// All requests traverse the given SOCKS5 endpoint.
    Socks5 { host: String, port: String },
}

impl ProxyRule {
    /// Derives the rule for a profile.
    ///
    /// `Socks5` iff `enabled` and both `host` and `port` are non-empty;
    /// `Direct` otherwise.
    pub fn from_config(config: &ProxyConfig) -> Self {
        if config.enabled && !config.host.is_empty() && !config.port.is_empty() {
            ProxyRule::Socks5 {
                host: config.host.clone(),
                port: config.port.clone(),
            }
        } else {
            ProxyRule::Direct
        }
    }

    /// The session-level rule string: `socks5://<host>:<port>`, or the
    /// empty string for a direct connection.
    pub fn rule_string(&self) -> String {
        match self {
            ProxyRule::Direct => String::new(),
            ProxyRule::Socks5 { host, port } => format!("socks5://{host}:{port}"),
        }
    }

    /// `true` when this rule means "no proxy".
    pub fn is_direct(&self) -> bool {
        matches!(self, ProxyRule::Direct)
    }
}

impl fmt::Display for ProxyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(enabled: bool, host: &str, port: &str) -> ProxyConfig {
        ProxyConfig {
            enabled,
            host: host.to_string(),
            port: port.to_string(),
        }
    }

    #[test]
    fn test_enabled_profile_derives_exact_socks5_rule() {
        // Arrange
        let cfg = profile(true, "10.0.0.5", "9999");

        // Act
        let rule = ProxyRule::from_config(&cfg);

        // Assert
        assert_eq!(rule.rule_string(), "socks5://10.0.0.5:9999");
    }

    #[test]
    fn test_disabled_profile_derives_direct_rule() {
        let cfg = profile(false, "10.0.0.5", "9999");
        let rule = ProxyRule::from_config(&cfg);
        assert!(rule.is_direct());
        assert_eq!(rule.rule_string(), "");
    }

    #[test]
    fn test_empty_host_overrides_enabled() {
        // Enabled but no endpoint must behave as "no proxy".
        let cfg = profile(true, "", "1080");
        assert!(ProxyRule::from_config(&cfg).is_direct());
    }

    #[test]
    fn test_empty_port_overrides_enabled() {
        let cfg = profile(true, "127.0.0.1", "");
        assert!(ProxyRule::from_config(&cfg).is_direct());
    }

    #[test]
    fn test_display_matches_rule_string() {
        let rule = ProxyRule::Socks5 {
            host: "proxy.local".to_string(),
            port: "1080".to_string(),
        };
        assert_eq!(rule.to_string(), "socks5://proxy.local:1080");
        assert_eq!(ProxyRule::Direct.to_string(), "");
    }

    #[test]
    fn test_same_profile_derives_equal_rules() {
        // Rule derivation is pure: replaying the same profile yields the
        // same rule.
        let cfg = profile(true, "proxy.local", "1080");
        assert_eq!(ProxyRule::from_config(&cfg), ProxyRule::from_config(&cfg));
    }
}
