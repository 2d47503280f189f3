//! Benchmark server
//!
//! Binds the HTTP listener and routes every request to the benchmark handler.

use axum::{routing::any, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use crate::handler::{health_check, run_benchmarks, AppState};
use crate::runner::BenchmarkRunner;
use crate::strategy;

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", any(health_check))
        .fallback(run_benchmarks)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The benchmark HTTP server
pub struct BenchServer {
    config: BenchConfig,
    state: Arc<AppState>,
}

impl BenchServer {
    /// Build the strategy set from `config`.
    pub fn new(config: BenchConfig) -> BenchResult<Self> {
        let strategies = strategy::from_config(&config)?;
        tracing::info!(
            "Strategies: {}",
            strategies.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", ")
        );

        let state = Arc::new(AppState {
            strategies,
            runner: BenchmarkRunner::new(),
            default_runs: config.default_runs,
        });
        Ok(Self { config, state })
    }

    /// Start serving requests
    ///
    /// # Errors
    /// Returns error if the listener cannot be bound
    pub async fn serve(&self) -> BenchResult<()> {
        let router = create_router(Arc::clone(&self.state));

        let addr = &self.config.bind_address;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| BenchError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("pg-edge-bench listening on {}", addr);
        tracing::info!("   ANY  /?runs=N  - Benchmark all strategies");
        tracing::info!("   ANY  /health   - Health check");

        axum::serve(listener, router).await?;
        Ok(())
    }
}
