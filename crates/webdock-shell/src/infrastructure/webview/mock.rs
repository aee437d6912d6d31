//! Recording proxy session for tests.
//!
//! Records every installed rule string instead of touching a webview, and
//! can be armed to fail the next installation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use webdock_core::ProxyRule;

use crate::application::apply_proxy::{ProxySession, SessionError};

/// [`ProxySession`] that records installed rules in memory.
#[derive(Default)]
pub struct RecordingProxySession {
    rules: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl RecordingProxySession {
    /// Every rule string installed so far, in order.
    pub fn installed_rules(&self) -> Vec<String> {
        self.rules.lock().unwrap().clone()
    }

    /// The most recently installed rule string, if any.
    pub fn last_rule(&self) -> Option<String> {
        self.rules.lock().unwrap().last().cloned()
    }

    /// Arms the session to fail the next installation.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProxySession for RecordingProxySession {
    async fn set_proxy_rule(&self, rule: &ProxyRule) -> Result<(), SessionError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(SessionError::Install("injected failure".to_string()));
        }
        self.rules.lock().unwrap().push(rule.rule_string());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
