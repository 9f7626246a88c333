// main.rs
mod config;
mod docs;
mod error;
mod handlers;
mod logging;
mod metrics;
mod models;
mod notifier;
mod storage;
mod synchronizer;
mod utils;

use anyhow::Context;
use models::AppState;
use notifier::MqttPublisher;
use std::sync::Arc;
use storage::MongoLampStore;
use synchronizer::LampSynchronizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("LAMP_CONFIG").unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let settings = config::Settings::load(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", config_path, e))?;

    let _log_guard = logging::init(&settings.logger).context("Failed to initialize logging")?;

    if settings.metrics.enabled {
        metrics::setup_metrics(settings.metrics.port)?;
        tracing::info!("Metrics exporter listening on port {}", settings.metrics.port);
    }

    let store = MongoLampStore::connect(&settings.database)
        .await
        .context("Failed to connect to MongoDB")?;
    let publisher = MqttPublisher::connect(&settings.mqtt)
        .await
        .context("Failed to connect to MQTT broker")?;

    let lamps = LampSynchronizer::new(
        Arc::new(store),
        Arc::new(publisher),
        settings.mqtt.base_topic.clone(),
    );
    let app = handlers::router(Arc::new(AppState::new(lamps)));

    let listener = tokio::net::TcpListener::bind(&settings.server.address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind address: {}", e))?;

    tracing::info!("Server started on {}", settings.server.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Server stopped");
    Ok(())
}
