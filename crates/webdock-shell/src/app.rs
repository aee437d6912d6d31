//! Application context and event loop.
//!
//! Wires together the config store, the proxy applier, the settings
//! service, the tray, and the main webview, then runs the tao event loop.
//!
//! # Architecture
//!
//! ```text
//! run()
//!  └─ ConfigStore::at_default_path()   -- proxy.json in the user data dir
//!  └─ WebviewProxySession              -- applies rules via the event loop
//!  └─ SettingsService                  -- persist-then-apply sequencing
//!  └─ event loop
//!       ├─ Menu(show/proxy/about/quit) -- tray menu commands
//!       ├─ TrayClick                   -- toggle main window visibility
//!       ├─ Settings(event)             -- dispatched onto the Tokio runtime
//!       ├─ ApplyProxy{rule, ack}       -- rebuild webview, then ack
//!       └─ CloseRequested              -- hide main window / close dialog
//! ```
//!
//! # Why settings events hop through the loop (for beginners)
//!
//! The settings dialog's IPC handler runs on the UI thread while a
//! settings event may block on disk I/O and on a modal confirmation.  The
//! handler therefore only *posts* the decoded event; the loop hands it to
//! the Tokio runtime, and the service calls back into the loop (via
//! `ApplyProxy`) for the one step that must happen on the UI thread —
//! rebuilding the webview.  Events are processed strictly in arrival
//! order, which is all the sequencing the settings surface needs.
//!
//! All shared references live in [`AppContext`]; there is no module-level
//! mutable state.

use std::sync::Arc;

use anyhow::Context;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{WindowBuilder, WindowId};
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tracing::{error, info};
use tray_icon::menu::{MenuEvent, MenuId};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};
use webdock_core::{ProxyRule, SettingsEvent};

use crate::application::apply_proxy::{ApplyProxyUseCase, ProxySession};
use crate::application::notify::Notifier;
use crate::application::settings::SettingsService;
use crate::infrastructure::dialogs::{self, RfdNotifier};
use crate::infrastructure::storage::ConfigStore;
use crate::infrastructure::tray;
use crate::infrastructure::ui_bridge::{self, SettingsWindow, SingleWindowSlot};
use crate::infrastructure::webview::{self, WebviewProxySession};

/// Main window title.
const WINDOW_TITLE: &str = "Webdock";

/// Custom events posted into the tao event loop.
pub enum UserEvent {
    /// A decoded settings-dialog event.
    Settings(SettingsEvent),
    /// The settings dialog asked to close itself.
    CloseSettings,
    /// Install `rule` on the webview session, then signal `ack`.
    ApplyProxy {
        rule: ProxyRule,
        ack: oneshot::Sender<()>,
    },
    /// A tray menu entry was activated.
    Menu(MenuId),
    /// The tray icon was left-clicked.
    TrayClick,
}

/// Shared references threaded through the event loop.
///
/// Explicit context instead of ambient globals: every collaborator gets
/// exactly the handles it needs at construction time.
pub struct AppContext {
    pub store: ConfigStore,
    pub service: Arc<SettingsService>,
    pub settings_slot: Arc<SingleWindowSlot<WindowId>>,
    pub runtime: Runtime,
}

/// Builds the context and runs the shell until the user quits.
///
/// # Errors
///
/// Returns an error when startup wiring fails (data directory, window,
/// webview, or tray); once the loop is running it never returns.
pub fn run() -> anyhow::Result<()> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let notifier: Arc<dyn Notifier> = Arc::new(RfdNotifier);
    let store = ConfigStore::at_default_path(Arc::clone(&notifier))
        .context("resolving proxy config path")?;
    let session: Arc<dyn ProxySession> = Arc::new(WebviewProxySession::new(proxy.clone()));
    let applier = ApplyProxyUseCase::new(session);
    let service = Arc::new(SettingsService::new(
        store.clone(),
        applier,
        Arc::clone(&notifier),
    ));
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building Tokio runtime")?;

    let ctx = AppContext {
        store,
        service,
        settings_slot: Arc::new(SingleWindowSlot::new()),
        runtime,
    };

    run_event_loop(event_loop, proxy, ctx)
}

fn run_event_loop(
    event_loop: EventLoop<UserEvent>,
    proxy: EventLoopProxy<UserEvent>,
    ctx: AppContext,
) -> anyhow::Result<()> {
    // Read once at startup; afterwards the profile only changes through
    // explicit settings events.
    let startup = ctx.store.read();
    let initial_rule = ProxyRule::from_config(&startup);
    info!(rule = %initial_rule, "startup proxy rule");

    let main_window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(1200.0, 800.0))
        .build(&event_loop)
        .context("creating main window")?;
    let mut main_webview = Some(
        webview::build_main_webview(&main_window, &initial_rule)
            .context("creating main webview")?,
    );

    let (_tray, menu_ids) = tray::build_tray().context("creating tray icon")?;

    spawn_menu_forwarder(proxy.clone());
    spawn_tray_forwarder(proxy.clone());

    let mut settings_window: Option<SettingsWindow> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if window_id == main_window.id() {
                    // Closing hides; the tray keeps the app alive.
                    main_window.set_visible(false);
                } else if ctx.settings_slot.is(window_id) {
                    settings_window.take();
                    ctx.settings_slot.clear();
                }
            }

            Event::UserEvent(UserEvent::Menu(id)) => {
                if id == menu_ids.show {
                    main_window.set_visible(true);
                    main_window.set_focus();
                } else if id == menu_ids.proxy {
                    if ctx.settings_slot.current().is_some() {
                        // One settings dialog at a time: refocus, don't reopen.
                        if let Some(open) = settings_window.as_ref() {
                            open.window.set_focus();
                        }
                    } else {
                        let config = ctx.store.read();
                        match ui_bridge::open_settings_window(target, proxy.clone(), &config) {
                            Ok(dialog) => {
                                ctx.settings_slot.set(dialog.window.id());
                                settings_window = Some(dialog);
                            }
                            Err(e) => error!(error = %e, "could not open settings dialog"),
                        }
                    }
                } else if id == menu_ids.about {
                    dialogs::show_about();
                } else if id == menu_ids.quit {
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::UserEvent(UserEvent::TrayClick) => {
                if main_window.is_visible() {
                    main_window.set_visible(false);
                } else {
                    main_window.set_visible(true);
                    main_window.set_focus();
                }
            }

            Event::UserEvent(UserEvent::Settings(settings_event)) => {
                let service = Arc::clone(&ctx.service);
                // The unhandled-error surface for write failures: logged
                // here, nothing above this retries.
                ctx.runtime.spawn(async move {
                    if let Err(e) = service.handle_event(settings_event).await {
                        error!(error = %e, "settings event failed");
                    }
                });
            }

            Event::UserEvent(UserEvent::CloseSettings) => {
                settings_window.take();
                ctx.settings_slot.clear();
            }

            Event::UserEvent(UserEvent::ApplyProxy { rule, ack }) => {
                // Drop the old webview before building its replacement on
                // the same window.
                main_webview.take();
                match webview::build_main_webview(&main_window, &rule) {
                    Ok(rebuilt) => {
                        main_webview = Some(rebuilt);
                        info!(rule = %rule, "proxy rule applied to webview session");
                        let _ = ack.send(());
                    }
                    Err(e) => {
                        // Dropping `ack` reports the failure to the applier.
                        error!(error = %e, "webview rebuild failed; proxy rule not applied");
                    }
                }
            }

            _ => {}
        }
    });
}

/// Forwards tray menu activations into the event loop.
fn spawn_menu_forwarder(proxy: EventLoopProxy<UserEvent>) {
    std::thread::spawn(move || {
        let receiver = MenuEvent::receiver();
        while let Ok(event) = receiver.recv() {
            if proxy.send_event(UserEvent::Menu(event.id)).is_err() {
                break;
            }
        }
    });
}

/// Forwards left-clicks on the tray icon into the event loop.
fn spawn_tray_forwarder(proxy: EventLoopProxy<UserEvent>) {
    std::thread::spawn(move || {
        let receiver = TrayIconEvent::receiver();
        while let Ok(event) = receiver.recv() {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                if proxy.send_event(UserEvent::TrayClick).is_err() {
                    break;
                }
            }
        }
    });
}
