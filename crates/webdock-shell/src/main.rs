//! Webdock desktop shell entry point.
//!
//! Initialises structured logging, then hands control to the application
//! context and event loop in [`webdock_shell::app`].

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Webdock starting");
    webdock_shell::app::run()
}
