//! Courier daemon — durable background file upload service.
//!
//! Main entry point that wires the queue store, transport, cleanup worker,
//! orchestrator, and scheduler together.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use courier_core::config::AppConfig;
use courier_core::error::AppError;
use courier_core::traits::reporter::CompletionReporter;
use courier_core::traits::sink::EventSink;
use courier_core::traits::store::UploadStore;
use courier_core::traits::transport::TransportClient;
use courier_store::JsonFileStore;
use courier_transport::HttpTransport;
use courier_worker::cleanup::FileCleanupWorker;
use courier_worker::orchestrator::UploadOrchestrator;
use courier_worker::scheduler::{ScheduledJobReporter, UploadJobScheduler};
use courier_worker::sink::BroadcastEventSink;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Daemon error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("COURIER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main daemon run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Courier v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the durable upload queue ────────────────────
    tracing::info!("Opening upload queue at '{}'...", config.queue.path);
    let store: Arc<dyn UploadStore> = Arc::new(JsonFileStore::open(&config.queue.path).await?);

    // ── Step 2: Build the transport client ───────────────────────
    let transport: Arc<dyn TransportClient> = Arc::new(HttpTransport::new(&config.transport)?);

    // ── Step 3: Event sink ───────────────────────────────────────
    let sink: Arc<dyn EventSink> = Arc::new(BroadcastEventSink::new(config.events.buffer_size));

    // ── Step 4: Cleanup worker ───────────────────────────────────
    let cleanup = Arc::new(FileCleanupWorker::start(&config.cleanup));

    // ── Step 5: Orchestrator ─────────────────────────────────────
    let reporter: Arc<dyn CompletionReporter> = Arc::new(ScheduledJobReporter);
    let orchestrator = Arc::new(UploadOrchestrator::new(
        store, transport, sink, reporter, cleanup,
    ));

    // ── Step 6: Start the scheduler ──────────────────────────────
    let mut scheduler = UploadJobScheduler::new().await?;
    if config.scheduler.enabled {
        scheduler
            .register_upload_job(&config.scheduler, Arc::clone(&orchestrator))
            .await?;
        scheduler.start().await?;
    } else {
        tracing::info!("Upload scheduler disabled");
    }

    tracing::info!("Courier daemon running");

    // ── Step 7: Graceful shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    if orchestrator.on_stop().await {
        tracing::info!("Uploads still in flight; queued entries will be retried on next start");
    }
    scheduler.shutdown().await?;
    orchestrator.on_teardown().await;

    tracing::info!("Courier daemon shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
