// Main entry point - dependency injection and pipeline startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::application::aggregator::ReadingAggregator;
use crate::application::archive_store::ArchiveStore;
use crate::application::dispatcher::MessageDispatcher;
use crate::application::uploader::ArchiveUploader;
use crate::domain::breakpoints::BreakpointTable;
use crate::infrastructure::config::load_pipeline_config;
use crate::infrastructure::fs_store::FsArchiveStore;
use crate::infrastructure::mqtt;
use crate::infrastructure::s3_store::S3ArchiveStore;
use crate::infrastructure::simulator;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{current_readings, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_pipeline_config()?;

    // Create archive store (infrastructure layer)
    let store: Arc<dyn ArchiveStore> = match config.storage.backend.as_str() {
        "fs" => Arc::new(FsArchiveStore::new(config.storage.fs_root.clone())),
        "s3" => Arc::new(
            S3ArchiveStore::connect(config.storage.bucket.clone(), config.storage.region.clone())
                .await,
        ),
        other => anyhow::bail!("unsupported storage backend `{other}` (expected `s3` or `fs`)"),
    };
    tracing::info!(target = %store.target(), "archive store ready");

    // Create the pipeline (application layer)
    let aggregator = ReadingAggregator::new(BreakpointTable::national());
    let uploader = ArchiveUploader::new(store, config.staging.path.clone());

    // A staging file surviving from a previous run means an upload failed
    // there; retry it before taking new traffic.
    if let Err(e) = uploader.recover_staged().await {
        tracing::warn!("staged record from a previous cycle not recovered: {e:#}");
    }

    let dispatcher = Arc::new(MessageDispatcher::new(aggregator, uploader));

    // One shutdown signal shared by every task
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // MQTT subscriber feeding the dispatcher
    let (client, eventloop) = mqtt::connect(&config.mqtt);
    let subscriber = tokio::spawn(mqtt::run_subscriber(
        client.clone(),
        eventloop,
        config.mqtt.topic.clone(),
        dispatcher,
        shutdown_rx.clone(),
    ));

    // Optional synthetic data source, indistinguishable from a real gateway
    if config.simulator.enabled {
        tokio::spawn(simulator::run_publisher(
            client,
            config.simulator.topic.clone(),
            config.simulator.interval_secs,
            shutdown_rx.clone(),
        ));
    }

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        table: BreakpointTable::national(),
    });
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/aqi", get(current_readings))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .http
        .listen
        .parse()
        .with_context(|| format!("invalid http.listen address `{}`", config.http.listen))?;
    tracing::info!("starting airquality-pipeline on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("ctrl-c received, shutting down");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    // Let the subscriber finish any in-flight dispatch before exiting
    let _ = subscriber.await;

    Ok(())
}
