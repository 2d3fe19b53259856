//! Cubie Client - media server companion
//!
//! Command-line host for the client. It loads the settings, checks the
//! server, loads every collection and prints the music tab, then keeps the
//! music collection fresh until interrupted.
//!
//! `cubie-client wifi` lists the networks the device can see instead, and
//! `cubie-client wifi <ssid> [password]` configures one of them.

mod cli;

use std::{
    io::{BufRead, stdin},
    sync::Arc,
};

use {
    clap::Parser,
    tokio::signal::ctrl_c,
    tracing::{info, warn},
    tracing_subscriber::EnvFilter,
};

use cubie_client::{
    ClientSettings, ConnectOutcome, HeadlessMediaElement, HttpBackend, MediaApp,
    SettingsManager, WifiSetup,
    api::Backend,
    config::get_config_path,
    error::{ResultExt, domain::Result},
};

use crate::cli::{Cli, Command};

/// Main entry point for the client.
#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let manager = SettingsManager::new().add_contextf(format_args!(
        "Failed to load settings from {}",
        get_config_path().display()
    ))?;
    let mut settings = manager.get_settings().clone().with_env_overrides();
    if let Some(server) = cli.server {
        settings.server_url = server;
    }
    let backend = HttpBackend::new(&settings).add_context("Failed to create HTTP client")?;
    info!(server = %backend.base_url(), "Using media server");

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_client(backend, settings).await,
        Command::Wifi { ssid, password } => run_wifi(backend, ssid, password).await,
    }
}

/// Loads the collections, prints the music tab and polls until Ctrl-C.
async fn run_client(backend: HttpBackend, settings: ClientSettings) -> Result<()> {
    match backend.server_config().await {
        Ok(config) => info!(
            service = %config.service_name,
            music_folder = %config.music_folder,
            "Connected to server"
        ),
        Err(e) => warn!(error = %e, "Server config unavailable"),
    }
    match backend.health().await {
        Ok(health) => info!(status = %health.status, files = health.files_count, "Server health"),
        Err(e) => warn!(error = %e, "Health check failed"),
    }

    let polling = settings.polling;
    let app = Arc::new(MediaApp::new(
        backend,
        HeadlessMediaElement::default(),
        settings,
    ));
    app.fetch_all().await;

    if let Some(count) = app.file_count_text() {
        info!(%count, "Library loaded");
    }
    if let Some(fragment) = app.fragment() {
        println!("{}", fragment.html);
    }

    let poller = polling.then(|| app.start_polling());
    ctrl_c().await.add_context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    if let Some(poller) = poller {
        poller.stop().await;
    }
    Ok(())
}

/// Lists networks, or configures `ssid`.
async fn run_wifi(
    backend: HttpBackend,
    ssid: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let mut setup = WifiSetup::new(backend);
    setup.load_networks().await.add_context("WiFi scan failed")?;

    let Some(ssid) = ssid else {
        for option in setup.network_options() {
            println!("{}", option.label);
        }
        return Ok(());
    };

    let mut prompt = || {
        println!("Enter the hidden network name (SSID):");
        stdin().lock().lines().next()?.ok()
    };
    if setup.select_network(&ssid, &mut prompt).is_none() {
        warn!(%ssid, "No such network");
        return Ok(());
    }

    let password = password.unwrap_or_default();
    match setup.connect(&password).await.add_context("WiFi setup failed")? {
        ConnectOutcome::Connected => info!("WiFi configuration applied successfully"),
        ConnectOutcome::RebootRequired => {
            info!("Device is in hotspot mode, rebooting to join the network");
            setup.reboot().await.add_context("Reboot request failed")?;
        }
    }
    Ok(())
}
