//! System tray presence.
//!
//! Builds the tray icon and its context menu.  The tray menu is the
//! shell's command surface: show the main window, open the proxy settings
//! dialog, show the About box, quit.  Menu and tray events arrive on
//! global channel receivers; the application forwards them into the event
//! loop.

use thiserror::Error;
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Tray tooltip and menu labels.
const TOOLTIP: &str = "Webdock";

/// Error type for tray construction.
#[derive(Debug, Error)]
pub enum TrayError {
    /// The tray icon could not be registered with the OS.
    #[error("failed to build tray icon: {0}")]
    Tray(#[from] tray_icon::Error),
    /// The generated icon bitmap was rejected.
    #[error("invalid tray icon bitmap: {0}")]
    Icon(#[from] tray_icon::BadIcon),
}

/// Ids of the tray menu entries, matched against incoming menu events.
pub struct TrayMenuIds {
    pub show: MenuId,
    pub proxy: MenuId,
    pub about: MenuId,
    pub quit: MenuId,
}

/// Builds the tray icon with its context menu.
///
/// The returned [`TrayIcon`] must be kept alive for the duration of the
/// process; dropping it removes the icon.
///
/// # Errors
///
/// Returns [`TrayError`] when the icon or the OS tray registration fails.
pub fn build_tray() -> Result<(TrayIcon, TrayMenuIds), TrayError> {
    let menu = Menu::new();

    let show_item = MenuItem::with_id("show", "Show Webdock", true, None);
    let proxy_item = MenuItem::with_id("proxy", "Proxy Settings…", true, None);
    let about_item = MenuItem::with_id("about", "About Webdock", true, None);
    let quit_item = MenuItem::with_id("quit", "Quit", true, None);

    menu.append(&show_item).ok();
    menu.append(&PredefinedMenuItem::separator()).ok();
    menu.append(&proxy_item).ok();
    menu.append(&about_item).ok();
    menu.append(&PredefinedMenuItem::separator()).ok();
    menu.append(&quit_item).ok();

    let ids = TrayMenuIds {
        show: show_item.id().clone(),
        proxy: proxy_item.id().clone(),
        about: about_item.id().clone(),
        quit: quit_item.id().clone(),
    };

    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip(TOOLTIP)
        .with_icon(tray_icon()?)
        .build()?;

    Ok((tray, ids))
}

/// Renders the tray icon bitmap: a filled disc with a lighter core.
fn icon_rgba() -> (Vec<u8>, u32) {
    let size = 22u32;
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    let center = (size as f32 - 1.0) / 2.0;
    for y in 0..size {
        for x in 0..size {
            let idx = ((y * size + x) * 4) as usize;
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist <= 6.0 {
                // Core
                rgba[idx] = 235;
                rgba[idx + 1] = 244;
                rgba[idx + 2] = 255;
                rgba[idx + 3] = 255;
            } else if dist <= 10.0 {
                // Ring
                rgba[idx] = 0;
                rgba[idx + 1] = 113;
                rgba[idx + 2] = 227;
                rgba[idx + 3] = 255;
            }
        }
    }

    (rgba, size)
}

fn tray_icon() -> Result<Icon, tray_icon::BadIcon> {
    let (rgba, size) = icon_rgba();
    Icon::from_rgba(rgba, size, size)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
