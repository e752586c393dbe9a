//! Prompt Processing API server.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `5000`)
//! - `PROCESSING_DELAY_MS`: Simulated processing latency (default: `100`)
//! - `MAX_PROMPT_LENGTH`: Maximum prompt length in characters (default: unlimited)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `prompt_processing_api=debug`)
//! - `LOG_FORMAT`: `text` (default) | `json`

use std::env;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompt_processing_api::api::{AppState, create_router};
use prompt_processing_api::infrastructure::{AppConfig, SimulatedProcessor};

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
        tracing::info!(threads, "Tokio worker_threads configured");
    }

    let runtime = match builder.build() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "Failed to create tokio runtime");
            std::process::exit(1);
        }
    };

    runtime.block_on(async_main(config));
}

fn init_tracing() {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "prompt_processing_api=debug,tower_http=debug".into()),
    );

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn async_main(config: AppConfig) {
    tracing::info!("Starting Prompt Processing API");

    tracing::info!(
        processing_delay = ?config.processing_delay,
        max_prompt_length = ?config.prompt_policy.max_length,
        "Configuration loaded"
    );

    let address = match config.socket_addr() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address");
            std::process::exit(1);
        }
    };

    let processor = SimulatedProcessor::new(config.processing_delay);
    let application = create_router(AppState::with_policy(processor, config.prompt_policy));

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, %address, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%address, "Listening");

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Resolves on the first shutdown request: SIGINT, or SIGTERM on Unix.
///
/// A handler that fails to install never resolves, so the other one still
/// governs shutdown.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "SIGINT handler unavailable");
            std::future::pending::<()>().await;
        }
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    let received = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!(signal = received, "Shutting down, draining in-flight requests");
}
