// src/main.rs
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod analysis;
mod api;
mod app;
mod config;
mod error;
mod file;
mod state;
mod ui;

use crate::api::BackendClient;
use crate::app::SentimentApp;
use crate::config::{ClientConfig, ConfigOrigin};

fn init_tracing(default_filter: &str) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let (config, origin) = ClientConfig::load_or_default();
    init_tracing(&config.log_filter);

    match &origin {
        ConfigOrigin::File { path, created: true } => {
            info!(path = %path.display(), "Wrote default configuration")
        }
        ConfigOrigin::File { path, .. } => info!(path = %path.display(), "Configuration loaded"),
        ConfigOrigin::Defaults(reason) => warn!(%reason, "Using default configuration"),
    }
    info!(backend = %config.backend_url, timeout = ?config.timeout_secs, "Backend client ready");

    let export_file_name = config.export_file_name.clone();
    let backend = BackendClient::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_drag_and_drop(true)
            .with_title("Анализ тональности"),
        ..Default::default()
    };

    eframe::run_native(
        "Sentiment Desk",
        options,
        Box::new(move |_cc| Box::new(SentimentApp::new(Arc::new(backend), export_file_name))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
