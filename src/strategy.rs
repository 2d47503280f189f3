//! Connection strategies under test.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::ClientFactory;
use crate::config::BenchConfig;
use crate::driver::{PgFactory, ServerlessFactory};
use crate::error::BenchResult;
use crate::runner::{BenchmarkRunner, BenchmarkSummary};

pub const DIRECT: &str = "directWithPgbouncer";
pub const POOLER: &str = "hyperdriveWithPgbouncer";
pub const SERVERLESS: &str = "neonServerlessDriver";

/// A named way of obtaining a database connection.
#[derive(Clone)]
pub struct Strategy {
    pub name: String,
    pub factory: Arc<dyn ClientFactory>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

impl Strategy {
    pub fn new(name: impl Into<String>, factory: impl ClientFactory + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }
}

/// Strategies enabled by `config`, in benchmark order.
pub fn from_config(config: &BenchConfig) -> BenchResult<Vec<Strategy>> {
    let database_url = config.database_url()?;
    let mut strategies = vec![Strategy::new(DIRECT, PgFactory::from_url(database_url)?)];

    if let Some(ref pooler_url) = config.pooler_url {
        strategies.push(Strategy::new(POOLER, PgFactory::from_url(pooler_url)?));
    }

    if config.serverless.enabled {
        let url = config.serverless.database_url.as_deref().unwrap_or(database_url);
        strategies.push(Strategy::new(
            SERVERLESS,
            ServerlessFactory::new(url, &config.serverless)?,
        ));
    }

    Ok(strategies)
}

/// Benchmark every strategy, one after another.
///
/// The first failure aborts the whole set; no partial results are returned.
pub async fn run_all(
    runner: &BenchmarkRunner,
    strategies: &[Strategy],
    runs: u32,
) -> BenchResult<BTreeMap<String, BenchmarkSummary>> {
    let mut results = BTreeMap::new();
    for strategy in strategies {
        tracing::info!("Benchmarking {} ({} runs)", strategy.name, runs);
        let summary = runner.run(strategy.factory.as_ref(), runs).await.map_err(|e| {
            tracing::error!("{} failed: {}", strategy.name, e);
            e
        })?;
        results.insert(strategy.name.clone(), summary);
    }
    Ok(results)
}
