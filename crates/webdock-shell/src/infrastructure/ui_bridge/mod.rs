//! Settings dialog bridge.
//!
//! The proxy settings dialog is a small fixed-size window rendering
//! embedded HTML inside a webview.  The form talks back to the Rust side
//! through the webview IPC channel with the JSON payloads decoded by
//! [`SettingsEvent`]; decoded events are forwarded into the event loop as
//! [`UserEvent::Settings`].
//!
//! # One dialog at a time
//!
//! Only one settings dialog may be open; a second open request focuses the
//! existing one instead of creating a new window.  The rule is enforced by
//! [`SingleWindowSlot`]: a mutex-guarded optional window id owned by the
//! application context and checked-and-set atomically — not by a nullable
//! shared reference.

use std::sync::Mutex;

use tao::dpi::LogicalSize;
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use thiserror::Error;
use tracing::warn;
use webdock_core::{ProxyConfig, SettingsEvent};
use wry::{WebView, WebViewBuilder};

use crate::app::UserEvent;

/// Error type for settings dialog construction.
#[derive(Debug, Error)]
pub enum UiBridgeError {
    /// The native window could not be created.
    #[error("failed to create settings window: {0}")]
    Window(#[from] tao::error::OsError),
    /// The webview could not be created.
    #[error("failed to create settings webview: {0}")]
    Webview(#[from] wry::Error),
}

/// The open settings dialog: window plus the webview rendered into it.
///
/// Dropping this closes the dialog.
pub struct SettingsWindow {
    pub window: Window,
    pub webview: WebView,
}

/// Opens the settings dialog pre-filled from `config`.
///
/// # Errors
///
/// Returns [`UiBridgeError`] when the window or webview cannot be created.
pub fn open_settings_window(
    target: &EventLoopWindowTarget<UserEvent>,
    proxy: EventLoopProxy<UserEvent>,
    config: &ProxyConfig,
) -> Result<SettingsWindow, UiBridgeError> {
    let window = WindowBuilder::new()
        .with_title("Proxy Settings")
        .with_inner_size(LogicalSize::new(420.0, 340.0))
        .with_resizable(false)
        .with_minimizable(false)
        .with_maximizable(false)
        .build(target)?;

    let webview = WebViewBuilder::new(&window)
        .with_html(settings_html(config))
        .with_ipc_handler(move |req| {
            let body = req.body();
            if body == "close" {
                let _ = proxy.send_event(UserEvent::CloseSettings);
                return;
            }
            match serde_json::from_str::<SettingsEvent>(body) {
                Ok(event) => {
                    let _ = proxy.send_event(UserEvent::Settings(event));
                }
                Err(e) => warn!(payload = %body, error = %e, "unrecognized settings payload"),
            }
        })
        .build()?;

    Ok(SettingsWindow { window, webview })
}

// ── Dialog markup ─────────────────────────────────────────────────────────────

/// Renders the dialog HTML with the current profile filled in.
fn settings_html(config: &ProxyConfig) -> String {
    SETTINGS_HTML
        .replace("__CHECKED__", if config.enabled { "checked" } else { "" })
        .replace(
            "__STATE__",
            if config.enabled {
                "Proxy Enabled"
            } else {
                "Proxy Disabled"
            },
        )
        .replace("__HOST__", &attr_escape(&config.host))
        .replace("__PORT__", &attr_escape(&config.port))
}

/// Escapes a value for interpolation into an HTML attribute.
fn attr_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const SETTINGS_HTML: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><style>
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",system-ui,sans-serif;background:#f5f5f7;padding:24px;color:#1d1d1f;-webkit-user-select:none;user-select:none}
h2{font-size:17px;font-weight:600;margin-bottom:16px}
.row{margin-bottom:14px}
.switch{position:relative;display:inline-block;width:48px;height:24px;vertical-align:middle;margin-right:10px}
.switch input{opacity:0;width:0;height:0}
.slider{position:absolute;cursor:pointer;top:0;left:0;right:0;bottom:0;background:#ccc;transition:.3s;border-radius:24px}
.slider:before{position:absolute;content:"";height:18px;width:18px;left:3px;bottom:3px;background:#fff;transition:.3s;border-radius:50%}
input:checked+.slider{background:#34c759}
input:checked+.slider:before{transform:translateX(24px)}
#state{font-size:14px;vertical-align:middle}
label.field{display:block;font-size:13px;color:#6e6e73;margin-bottom:4px}
input.field{width:100%;padding:8px 10px;font-size:14px;border:1px solid #d2d2d7;border-radius:8px;outline:none;background:#fff}
input.field:focus{border-color:#0071e3}
.buttons{display:flex;gap:8px;margin-top:18px}
button{flex:1;padding:9px;border-radius:8px;font-size:14px;font-weight:500;cursor:pointer;border:none}
button[type=submit]{background:#0071e3;color:#fff}
button[type=button]{background:#e8e8ed;color:#1d1d1f}
</style></head><body>
<h2>SOCKS5 Proxy Settings</h2>
<div class="row">
  <label class="switch">
    <input type="checkbox" id="toggle" __CHECKED__>
    <span class="slider"></span>
  </label>
  <span id="state">__STATE__</span>
</div>
<form id="form">
  <div class="row">
    <label class="field" for="host">Proxy Address</label>
    <input class="field" id="host" type="text" placeholder="e.g. 127.0.0.1" value="__HOST__">
  </div>
  <div class="row">
    <label class="field" for="port">Port</label>
    <input class="field" id="port" type="text" placeholder="e.g. 1080" value="__PORT__">
  </div>
  <div class="buttons">
    <button type="submit">Apply</button>
    <button type="button" onclick="window.ipc.postMessage('close')">Close</button>
  </div>
</form>
<script>
const toggle = document.getElementById('toggle');
const state = document.getElementById('state');
toggle.onchange = () => {
  state.innerText = toggle.checked ? 'Proxy Enabled' : 'Proxy Disabled';
  window.ipc.postMessage(JSON.stringify({ type: 'toggle-proxy', enabled: toggle.checked }));
};
document.getElementById('form').onsubmit = (e) => {
  e.preventDefault();
  window.ipc.postMessage(JSON.stringify({
    type: 'set-proxy',
    host: document.getElementById('host').value,
    port: document.getElementById('port').value,
  }));
};
</script>
</body></html>"#;

// ── Single-instance slot ──────────────────────────────────────────────────────

/// Mutex-guarded optional window id enforcing the one-dialog rule.
///
/// `set` refuses to overwrite an occupied slot, so even racing openers
/// cannot end up with two dialogs; `clear` is called when the dialog
/// closes.
#[derive(Debug, Default)]
pub struct SingleWindowSlot<Id: Copy + PartialEq> {
    inner: Mutex<Option<Id>>,
}

impl<Id: Copy + PartialEq> SingleWindowSlot<Id> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// The currently registered window id, if a dialog is open.
    pub fn current(&self) -> Option<Id> {
        *self.inner.lock().expect("slot lock poisoned")
    }

    /// Registers `id` if the slot is empty.  Returns `false` (and leaves
    /// the slot untouched) when a dialog is already registered.
    pub fn set(&self, id: Id) -> bool {
        let mut guard = self.inner.lock().expect("slot lock poisoned");
        if guard.is_some() {
            return false;
        }
        *guard = Some(id);
        true
    }

    /// `true` when `id` is the registered dialog.
    pub fn is(&self, id: Id) -> bool {
        self.current() == Some(id)
    }

    /// Empties the slot.
    pub fn clear(&self) {
        *self.inner.lock().expect("slot lock poisoned") = None;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
