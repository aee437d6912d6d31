//! JSON-based persistence for the proxy profile.
//!
//! Reads and writes the [`ProxyConfig`] to the platform-appropriate
//! per-user data file:
//! - Windows:  `%APPDATA%\webdock\webdock\data\proxy.json`
//! - Linux:    `~/.local/share/webdock/proxy.json`
//! - macOS:    `~/Library/Application Support/dev.webdock.webdock/proxy.json`
//!
//! # Failure policy
//!
//! The two directions fail very differently, on purpose:
//!
//! - **Read never fails.**  A missing file is first use: the defaults are
//!   synthesized, persisted, and returned.  An unreadable or malformed
//!   file surfaces one blocking warning through the [`Notifier`] and then
//!   falls back to the in-memory defaults for this session — *without*
//!   writing them back, so a later fix of the file (or of the code that
//!   wrote it) is not clobbered by a panicked default.
//!
//! - **Write always propagates.**  Disk-full or permission errors on the
//!   write path are returned to the caller; there is no local recovery.
//!
//! Reads and writes are synchronous whole-file operations.  There is no
//! file watching and no cross-process locking: one process, one user.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use webdock_core::ProxyConfig;

use crate::application::notify::Notifier;

/// File name of the persisted proxy profile.
pub const PROXY_FILE_NAME: &str = "proxy.json";

/// Warning shown when the profile cannot be read; after dismissal the
/// session falls back to a direct connection.
const READ_FAILURE_MESSAGE: &str =
    "Failed to read proxy.json, will connect directly to the network";

/// Error type for profile persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform user-data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing proxy config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile could not be serialized to JSON.
    #[error("failed to serialize proxy config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolves the per-user data directory for Webdock.
///
/// # Errors
///
/// Returns [`StoreError::NoPlatformDataDir`] when the platform base
/// directory cannot be determined from the environment.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    ProjectDirs::from("dev", "webdock", "webdock")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoPlatformDataDir)
}

/// Resolves the full path of the persisted proxy profile.
///
/// # Errors
///
/// Returns [`StoreError::NoPlatformDataDir`] if the base directory cannot
/// be determined.
pub fn default_config_path() -> Result<PathBuf, StoreError> {
    Ok(data_dir()?.join(PROXY_FILE_NAME))
}

/// Durable single-record store for the proxy profile.
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    notifier: Arc<dyn Notifier>,
}

impl ConfigStore {
    /// Creates a store over an explicit file path.
    pub fn new(path: PathBuf, notifier: Arc<dyn Notifier>) -> Self {
        Self { path, notifier }
    }

    /// Creates a store at the platform default path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPlatformDataDir`] when the platform data
    /// directory cannot be resolved.
    pub fn at_default_path(notifier: Arc<dyn Notifier>) -> Result<Self, StoreError> {
        Ok(Self::new(default_config_path()?, notifier))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the profile, never failing.
    ///
    /// Missing file: synthesizes the defaults, persists them, returns
    /// them.  Unreadable or malformed file: one blocking warning, then the
    /// defaults are returned without being written back.
    pub fn read(&self) -> ProxyConfig {
        if !self.path.exists() {
            let defaults = ProxyConfig::default();
            match self.write(&defaults) {
                Ok(()) => {
                    debug!(path = %self.path.display(), "created proxy config with defaults");
                }
                Err(e) => {
                    warn!(error = %e, "could not create default proxy config");
                    self.notifier.warn(READ_FAILURE_MESSAGE);
                }
            }
            return defaults;
        }

        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "proxy config unreadable");
                self.notifier.warn(READ_FAILURE_MESSAGE);
                return ProxyConfig::default();
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ProxyConfig::from_loose_json(&value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "proxy config malformed");
                self.notifier.warn(READ_FAILURE_MESSAGE);
                ProxyConfig::default()
            }
        }
    }

    /// Persists `config`, overwriting the file in full.
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system failures or
    /// [`StoreError::Serialize`] if serialization fails.
    pub fn write(&self, config: &ProxyConfig) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string(config)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
