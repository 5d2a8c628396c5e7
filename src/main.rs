mod common;
mod config;
mod monitor;
mod network;
mod sync;
mod ui;

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use monitor::{MonitorOutcome, SafetyMonitor};
use network::{HttpMessageApi, SyncClient};
use sync::MessageSyncEngine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use ui::ChatApp;

use config::AppConfig;

#[derive(Parser)]
#[command(
    name = "safety_chat",
    version,
    about = "Chat client with remote safety analysis"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Message service root, overriding config and environment
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Analyze lines typed on stdin and print safety alerts (no UI)
    Monitor,
    /// Write the effective configuration to the config path and exit
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(base_url) = cli.base_url {
        app_config.base_url = base_url;
    }
    log::info!("Using message service at {}", app_config.base_url);

    match cli.mode {
        Some(Mode::Monitor) => run_monitor(&app_config).await,
        Some(Mode::InitConfig) => {
            config::save_config(&cli.config, &app_config)?;
            log::info!("Wrote config to {}", cli.config);
            Ok(())
        }
        None => run_chat_client(app_config).await,
    }
}

async fn run_monitor(app_config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let api = HttpMessageApi::new(&app_config.base_url);
    let mut monitor = SafetyMonitor::new(
        api,
        app_config.monitor_author.clone(),
        app_config.alert_ttl(),
    );
    log::info!("Safety monitor reading stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let MonitorOutcome::Flagged(_) = monitor.analyze(&line).await {
            if let Some(alert) = monitor.current_alert() {
                println!("⚠ Safety Alert: {}", alert.message);
            }
        }
    }

    Ok(())
}

async fn run_chat_client(app_config: AppConfig) -> Result<(), Box<dyn Error>> {
    // UI -> sync task
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // sync task -> UI
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let api = HttpMessageApi::new(&app_config.base_url);
    let engine = Arc::new(
        MessageSyncEngine::new(api, app_config.dedup_limit()).with_events(event_tx),
    );

    let poll_interval = app_config.poll_interval();
    let sync_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        let client = SyncClient::new(sync_engine, cmd_rx, poll_interval);
        if let Err(err) = client.run().await {
            log::error!("Sync task terminated: {err}");
        }
    });

    let options = eframe::NativeOptions::default();
    let banner_ttl = app_config.alert_ttl();
    eframe::run_native(
        "Safety Chat",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, cmd_tx, event_rx, banner_ttl)))),
    )?;

    log::info!(
        "Session closed with {} messages (cursor {})",
        engine.snapshot().len(),
        engine.cursor()
    );
    Ok(())
}
