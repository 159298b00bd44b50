//! Bridge startup wiring
//!
//! Builds the shared components once, spawns the supervised chat
//! listener when one is configured, and serves the HTTP surface until
//! ctrl-c.

use crate::api::{build_app, AppState};
use crate::channels::{supervisor, ChannelAdapter, TelegramAdapter};
use crate::command::Vocabulary;
use crate::config::BridgeConfig;
use crate::device::{Forwarder, StatusReporter, StreamRelay};
use crate::mailbox::Mailbox;
use crate::processor::MessageProcessor;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Capacity of the channel event queue.
const EVENT_QUEUE_SIZE: usize = 100;

/// Build the shared application state from the configuration.
pub fn build_state(config: &BridgeConfig) -> crate::error::Result<AppState> {
    Ok(AppState {
        forwarder: Arc::new(Forwarder::new(&config.devices.actuator_url)?),
        mailbox: Arc::new(Mailbox::new()),
        status: Arc::new(StatusReporter::new(
            &config.devices.actuator_url,
            &config.devices.camera_url,
        )?),
        relay: Arc::new(StreamRelay::new(&config.devices.camera_url)?),
        vocabulary: Vocabulary::http(),
        shared_secret: config.shared_secret.clone(),
    })
}

/// Start the configured chat channels and their event loop.
///
/// With no channel configured this is a no-op — the bridge still
/// serves the HTTP surface.
pub fn start_channels(config: &BridgeConfig, forwarder: Arc<Forwarder>) {
    let Some(telegram_config) = config.telegram.clone() else {
        tracing::info!("No chat channel configured, HTTP surface only");
        return;
    };

    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);

    let adapter: Arc<dyn ChannelAdapter> = Arc::new(TelegramAdapter::new(telegram_config));
    let mut channels: HashMap<String, Arc<dyn ChannelAdapter>> = HashMap::new();
    channels.insert(adapter.name().to_string(), adapter.clone());

    supervisor::spawn_supervised(adapter, event_tx);

    let processor = Arc::new(MessageProcessor::new(forwarder));
    tokio::spawn(processor.run(event_rx, channels));
}

/// Build, bind, and serve the whole bridge in one call.
pub async fn run_bridge(config: BridgeConfig) -> Result<()> {
    let state = build_state(&config)?;

    start_channels(&config, state.forwarder.clone());

    let app = build_app(state);

    let addr: std::net::SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid listen address")?;

    tracing::info!(
        %addr,
        actuator = %config.devices.actuator_url,
        camera = %config.devices.camera_url,
        "espbridge listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
        .context("HTTP server error")?;

    tracing::info!("Shutting down...");

    Ok(())
}
