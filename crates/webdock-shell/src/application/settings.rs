//! SettingsService: the settings surface behind the proxy dialog.
//!
//! Accepts the two mutation events ([`SettingsEvent`]) and sequences the
//! config store and the proxy applier deterministically: read the current
//! profile, mutate it, persist it, then apply the result to the live
//! session.  Persist-before-apply means a crash between the two steps
//! leaves the stored profile ahead of the session, which the next startup
//! reconciles by applying the stored profile.
//!
//! Both events are idempotent with respect to storage: replaying the same
//! event with the same payload yields the same stored record and the same
//! applied rule.
//!
//! A confirmation dialog (naming the exact rule string installed) is shown
//! only after a `set-proxy` event while the proxy is enabled, and only once
//! the apply has completed.  Toggling alone never confirms.  Write failures
//! are not handled here — they propagate to the dispatch boundary.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use webdock_core::SettingsEvent;

use crate::application::apply_proxy::{ApplyProxyUseCase, SessionError};
use crate::application::notify::Notifier;
use crate::infrastructure::storage::{ConfigStore, StoreError};

/// Error type for settings event handling.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The updated profile could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The session rejected the rule installation.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The Settings Surface use case.
pub struct SettingsService {
    store: ConfigStore,
    applier: ApplyProxyUseCase,
    notifier: Arc<dyn Notifier>,
}

impl SettingsService {
    /// Creates a new service over the given store, applier, and notifier.
    pub fn new(store: ConfigStore, applier: ApplyProxyUseCase, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            applier,
            notifier,
        }
    }

    /// Routes one dialog event to the matching handler.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when persisting or applying fails.
    pub async fn handle_event(&self, event: SettingsEvent) -> Result<(), SettingsError> {
        match event {
            SettingsEvent::ToggleProxy { enabled } => self.toggle_proxy(enabled).await,
            SettingsEvent::SetProxy { host, port } => self.set_proxy(host, port).await,
        }
    }

    /// Flips the proxy on or off, keeping the stored endpoint.
    pub async fn toggle_proxy(&self, enabled: bool) -> Result<(), SettingsError> {
        let mut config = self.store.read();
        config.enabled = enabled;
        self.store.write(&config)?;

        let rule = self.applier.apply(&config).await?;
        info!(enabled, rule = %rule, "proxy toggled");
        Ok(())
    }

    /// Replaces the stored endpoint, keeping the on/off state.
    ///
    /// When the proxy is enabled, the new rule is applied and a blocking
    /// confirmation naming the exact rule string is shown once the apply
    /// has completed.  When it is disabled, the empty rule is applied
    /// silently.
    pub async fn set_proxy(&self, host: String, port: String) -> Result<(), SettingsError> {
        let mut config = self.store.read();
        config.host = host;
        config.port = port;
        self.store.write(&config)?;

        let rule = self.applier.apply(&config).await?;
        if config.enabled {
            self.notifier
                .info(&format!("Proxy set to: {}", rule.rule_string()));
        } else {
            debug!(rule = %rule, "endpoint stored while proxy disabled");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
