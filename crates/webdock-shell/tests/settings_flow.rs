//! Integration tests for the proxy settings pipeline.
//!
//! These tests exercise the application layer of webdock-shell end-to-end:
//! `SettingsService` + `ApplyProxyUseCase` + `ConfigStore` over a real
//! temp-dir file, with recording infrastructure standing in for the
//! webview session and the native dialogs.

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;
use webdock_core::{ProxyConfig, ProxyRule};

use webdock_shell::application::apply_proxy::{ApplyProxyUseCase, ProxySession};
use webdock_shell::application::notify::Notifier;
use webdock_shell::application::settings::SettingsService;
use webdock_shell::infrastructure::dialogs::mock::RecordingNotifier;
use webdock_shell::infrastructure::storage::{ConfigStore, PROXY_FILE_NAME};
use webdock_shell::infrastructure::webview::mock::RecordingProxySession;

// ── Fixture ───────────────────────────────────────────────────────────────────

struct Harness {
    service: SettingsService,
    store: ConfigStore,
    session: Arc<RecordingProxySession>,
    notifier: Arc<RecordingNotifier>,
    dir: PathBuf,
}

impl Drop for Harness {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn make_harness() -> Harness {
    let dir = std::env::temp_dir().join(format!("webdock_it_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let session = Arc::new(RecordingProxySession::default());
    let store = ConfigStore::new(
        dir.join(PROXY_FILE_NAME),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    let applier = ApplyProxyUseCase::new(Arc::clone(&session) as Arc<dyn ProxySession>);
    let service = SettingsService::new(
        store.clone(),
        applier,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    Harness {
        service,
        store,
        session,
        notifier,
        dir,
    }
}

fn on_disk(harness: &Harness) -> ProxyConfig {
    let text = std::fs::read_to_string(harness.store.path()).expect("config file must exist");
    serde_json::from_str(&text).expect("config file must be valid JSON")
}

// ── Fresh install ─────────────────────────────────────────────────────────────

#[test]
fn test_first_read_creates_the_default_profile_on_disk() {
    let harness = make_harness();

    let cfg = harness.store.read();

    assert_eq!(cfg, ProxyConfig::default());
    assert_eq!(on_disk(&harness), ProxyConfig::default());
}

#[tokio::test]
async fn test_fresh_install_startup_applies_direct_connection() {
    // The startup sequence: read once, apply once.
    let harness = make_harness();

    let startup = harness.store.read();
    let applier = ApplyProxyUseCase::new(Arc::clone(&harness.session) as Arc<dyn ProxySession>);
    let rule = applier.apply(&startup).await.unwrap();

    assert!(rule.is_direct());
    assert_eq!(harness.session.last_rule(), Some(String::new()));
}

#[test]
fn test_enabled_profile_without_endpoint_derives_direct_rule() {
    // Empty host/port overrides enabled=true.
    let cfg = ProxyConfig {
        enabled: true,
        host: String::new(),
        port: String::new(),
    };
    assert!(ProxyRule::from_config(&cfg).is_direct());
}

// ── Toggle flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_twice_matches_toggling_once() {
    let harness = make_harness();

    harness.service.toggle_proxy(true).await.unwrap();
    let stored_once = on_disk(&harness);
    let rule_once = harness.session.last_rule();

    harness.service.toggle_proxy(true).await.unwrap();

    assert_eq!(on_disk(&harness), stored_once);
    assert_eq!(harness.session.last_rule(), rule_once);
}

#[tokio::test]
async fn test_disable_clears_a_previously_applied_rule() {
    let harness = make_harness();
    harness
        .service
        .set_proxy("10.0.0.5".to_string(), "9999".to_string())
        .await
        .unwrap();
    harness.service.toggle_proxy(true).await.unwrap();
    assert_eq!(
        harness.session.last_rule(),
        Some("socks5://10.0.0.5:9999".to_string())
    );

    harness.service.toggle_proxy(false).await.unwrap();

    assert_eq!(harness.session.last_rule(), Some(String::new()));
}

// ── Set-proxy flow ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_proxy_while_enabled_updates_applies_and_confirms() {
    let harness = make_harness();
    harness.service.toggle_proxy(true).await.unwrap();

    harness
        .service
        .set_proxy("proxy.local".to_string(), "1080".to_string())
        .await
        .unwrap();

    // Stored config updated…
    let stored = on_disk(&harness);
    assert!(stored.enabled);
    assert_eq!(stored.host, "proxy.local");
    assert_eq!(stored.port, "1080");
    // …rule applied…
    assert_eq!(
        harness.session.last_rule(),
        Some("socks5://proxy.local:1080".to_string())
    );
    // …and the confirmation names the exact rule.
    let infos = harness.notifier.infos();
    assert_eq!(infos.len(), 1);
    assert!(infos[0].contains("socks5://proxy.local:1080"));
}

#[tokio::test]
async fn test_replaying_set_proxy_is_idempotent_in_storage() {
    let harness = make_harness();

    harness
        .service
        .set_proxy("proxy.local".to_string(), "1080".to_string())
        .await
        .unwrap();
    let stored_once = on_disk(&harness);

    harness
        .service
        .set_proxy("proxy.local".to_string(), "1080".to_string())
        .await
        .unwrap();

    assert_eq!(on_disk(&harness), stored_once);
}

// ── Failure paths ─────────────────────────────────────────────────────────────

#[test]
fn test_corrupt_file_warns_and_falls_back_without_persisting() {
    let harness = make_harness();
    std::fs::write(harness.store.path(), "definitely not json").unwrap();

    let cfg = harness.store.read();

    assert_eq!(cfg, ProxyConfig::default());
    assert_eq!(harness.notifier.warnings().len(), 1);
    // The fallback must not clobber the broken file.
    assert_eq!(
        std::fs::read_to_string(harness.store.path()).unwrap(),
        "definitely not json"
    );
}

#[tokio::test]
async fn test_session_failure_surfaces_after_the_profile_is_stored() {
    let harness = make_harness();
    harness.session.fail_next();

    let result = harness.service.toggle_proxy(true).await;

    assert!(result.is_err());
    // Persist-before-apply: the profile made it to disk anyway.
    assert!(on_disk(&harness).enabled);
}
