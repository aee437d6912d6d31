//! ApplyProxyUseCase: reflects a proxy profile onto the live webview session.
//!
//! This use case sits at the application layer and delegates to a
//! [`ProxySession`] trait object for the actual session mutation.  The
//! webview-backed implementation lives in the infrastructure layer.
//!
//! Installation may complete asynchronously relative to the caller: the
//! returned future resolves once the rule has landed on the session, which
//! is what lets the settings surface show its confirmation only after the
//! new rule is live.  There is no cancellation — once an apply is issued it
//! either lands or the session keeps the prior rule.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use webdock_core::{ProxyConfig, ProxyRule};

/// Error type for proxy session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The rule could not be installed on the session.
    #[error("proxy rule installation failed: {0}")]
    Install(String),
    /// The session (or the event loop owning it) is gone.
    #[error("proxy session is no longer available")]
    Closed,
}

/// The live network session of the embedded web content.
///
/// Installing [`ProxyRule::Socks5`] replaces any previous rule; installing
/// [`ProxyRule::Direct`] clears the rule set.  Requests already in flight
/// are not guaranteed to pick up the new rule.
#[async_trait]
pub trait ProxySession: Send + Sync {
    /// Installs `rule` as the session's sole proxy rule, resolving once it
    /// has taken effect for subsequent requests.
    async fn set_proxy_rule(&self, rule: &ProxyRule) -> Result<(), SessionError>;
}

/// The Apply Proxy use case.
///
/// Derives the effective rule from a profile and forwards it to the
/// session.  Returns the applied rule so callers can build confirmation
/// text from the exact rule string installed.
pub struct ApplyProxyUseCase {
    session: Arc<dyn ProxySession>,
}

impl ApplyProxyUseCase {
    /// Creates a new use case with the given session.
    pub fn new(session: Arc<dyn ProxySession>) -> Self {
        Self { session }
    }

    /// Applies `config` to the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the session rejects the installation.
    pub async fn apply(&self, config: &ProxyConfig) -> Result<ProxyRule, SessionError> {
        let rule = ProxyRule::from_config(config);
        self.session.set_proxy_rule(&rule).await?;
        Ok(rule)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // ── Recording session ─────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingSession {
        rules: Mutex<Vec<String>>,
        should_fail: bool,
    }

    #[async_trait]
    impl ProxySession for RecordingSession {
        async fn set_proxy_rule(&self, rule: &ProxyRule) -> Result<(), SessionError> {
            if self.should_fail {
                return Err(SessionError::Install("injected failure".to_string()));
            }
            self.rules.lock().unwrap().push(rule.rule_string());
            Ok(())
        }
    }

    fn make_use_case() -> (ApplyProxyUseCase, Arc<RecordingSession>) {
        let session = Arc::new(RecordingSession::default());
        let uc = ApplyProxyUseCase::new(Arc::clone(&session) as Arc<dyn ProxySession>);
        (uc, session)
    }

    fn profile(enabled: bool, host: &str, port: &str) -> ProxyConfig {
        ProxyConfig {
            enabled,
            host: host.to_string(),
            port: port.to_string(),
        }
    }

    // ── Rule installation ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_apply_installs_socks5_rule_for_enabled_profile() {
        // Arrange
        let (uc, session) = make_use_case();

        // Act
        let rule = uc.apply(&profile(true, "10.0.0.5", "9999")).await.unwrap();

        // Assert
        assert_eq!(rule.rule_string(), "socks5://10.0.0.5:9999");
        assert_eq!(
            *session.rules.lock().unwrap(),
            vec!["socks5://10.0.0.5:9999".to_string()]
        );
    }

    #[tokio::test]
    async fn test_apply_installs_empty_rule_for_disabled_profile() {
        // Arrange
        let (uc, session) = make_use_case();

        // Act
        let rule = uc.apply(&profile(false, "10.0.0.5", "9999")).await.unwrap();

        // Assert – explicit passthrough, not a skipped call
        assert!(rule.is_direct());
        assert_eq!(*session.rules.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_apply_treats_enabled_profile_without_endpoint_as_direct() {
        // Arrange – fresh-install shape: enabled flipped on, endpoint empty
        let (uc, session) = make_use_case();

        // Act
        let rule = uc.apply(&profile(true, "", "")).await.unwrap();

        // Assert
        assert!(rule.is_direct());
        assert_eq!(*session.rules.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_apply_propagates_session_failure() {
        // Arrange
        let session = Arc::new(RecordingSession {
            rules: Mutex::new(Vec::new()),
            should_fail: true,
        });
        let uc = ApplyProxyUseCase::new(Arc::clone(&session) as Arc<dyn ProxySession>);

        // Act
        let result = uc.apply(&profile(true, "10.0.0.5", "9999")).await;

        // Assert
        assert!(matches!(result, Err(SessionError::Install(_))));
        assert!(session.rules.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reapplying_replaces_the_previous_rule() {
        // Arrange
        let (uc, session) = make_use_case();

        // Act – endpoint changed while enabled
        uc.apply(&profile(true, "10.0.0.5", "9999")).await.unwrap();
        uc.apply(&profile(true, "10.0.0.6", "9999")).await.unwrap();

        // Assert – both installs went through, the later one last
        let rules = session.rules.lock().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1], "socks5://10.0.0.6:9999");
    }
}
