//! The embedded web view and its proxy session adapter.
//!
//! The main window hosts a single `wry` webview pointed at the remote
//! application.  Three shell behaviours are configured at build time:
//!
//! - a desktop-Chrome user agent, so the remote app serves its full
//!   desktop UI instead of a mobile or "unsupported browser" page;
//! - new-window requests are denied inside the webview and opened in the
//!   system default browser instead;
//! - the active proxy rule is installed on the webview's network context.
//!
//! # Applying a new rule at runtime
//!
//! `wry` fixes the proxy configuration when the webview is created, so
//! [`WebviewProxySession`] cannot mutate the live context the way it
//! mutates a config file.  Instead it posts the desired rule to the event
//! loop, which rebuilds the webview on the same window with the new
//! configuration and acknowledges through a oneshot channel.  Requests
//! already in flight keep the old rule; every request after the rebuild
//! uses the new one — which is the guarantee the settings surface needs
//! before it shows its confirmation.

pub mod mock;

use std::sync::Mutex;

use async_trait::async_trait;
use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use webdock_core::ProxyRule;
use wry::{ProxyConfig as WryProxyConfig, ProxyEndpoint, WebView, WebViewBuilder};

use crate::app::UserEvent;
use crate::application::apply_proxy::{ProxySession, SessionError};

/// The remote web application loaded into the main window.
pub const APP_URL: &str = "https://app.webdock.dev";

/// Desktop-Chrome user agent presented to the remote application.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Builds the main webview on `window` with `rule` installed on its
/// network context.
///
/// # Errors
///
/// Returns [`wry::Error`] when the platform webview cannot be created.
pub fn build_main_webview(window: &Window, rule: &ProxyRule) -> wry::Result<WebView> {
    let mut builder = WebViewBuilder::new(window)
        .with_url(APP_URL)
        .with_user_agent(USER_AGENT)
        .with_new_window_req_handler(|url: String| {
            // Links that would spawn a browser window leave the shell.
            if let Err(e) = open::that(&url) {
                warn!(url = %url, error = %e, "could not open external link");
            }
            false
        });

    if let ProxyRule::Socks5 { host, port } = rule {
        builder = builder.with_proxy_config(WryProxyConfig::Socks5(ProxyEndpoint {
            host: host.clone(),
            port: port.clone(),
        }));
    }

    builder.build()
}

/// [`ProxySession`] backed by the shell's event loop.
///
/// Applies a rule by asking the loop to rebuild the main webview; the
/// returned future resolves once the rebuild has completed.
pub struct WebviewProxySession {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl WebviewProxySession {
    /// Creates a session adapter over the event loop proxy.
    pub fn new(proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

#[async_trait]
impl ProxySession for WebviewProxySession {
    async fn set_proxy_rule(&self, rule: &ProxyRule) -> Result<(), SessionError> {
        let (ack_tx, ack_rx) = oneshot::channel();

        {
            let proxy = self.proxy.lock().expect("event loop proxy lock poisoned");
            proxy
                .send_event(UserEvent::ApplyProxy {
                    rule: rule.clone(),
                    ack: ack_tx,
                })
                .map_err(|_| SessionError::Closed)?;
        }

        debug!(rule = %rule, "proxy rule handed to event loop");
        // A dropped ack means the loop failed to rebuild the webview.
        ack_rx.await.map_err(|_| SessionError::Closed)
    }
}
