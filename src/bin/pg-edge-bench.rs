//! pg-edge-bench: PostgreSQL connection latency harness
//!
//! # Usage
//!
//! ```bash
//! # Serve the benchmark over HTTP
//! DATABASE_URL=postgres://... pg-edge-bench serve
//!
//! # Benchmark once from the terminal
//! pg-edge-bench run --runs 20 --format json
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use pg_edge_bench::handler::BenchResponse;
use pg_edge_bench::prelude::*;
use pg_edge_bench::strategy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pg-edge-bench")]
#[command(version)]
#[command(about = "PostgreSQL connect / query / teardown latency harness", long_about = None)]
#[command(after_help = "EXAMPLES:
    pg-edge-bench serve --bind 127.0.0.1:8787
    pg-edge-bench run --runs 5
    pg-edge-bench --serverless run --format json")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

/// Settings layered over the config file
#[derive(Args)]
struct Overrides {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Direct connection string
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Connection string of the managed pooling proxy
    #[arg(long, global = true, env = "POOLER_URL")]
    pooler_url: Option<String>,

    /// Also benchmark the WebSocket serverless driver
    #[arg(long, global = true, env = "SERVERLESS_DRIVER")]
    serverless: bool,

    /// Connection string for the serverless driver
    #[arg(long, global = true, env = "SERVERLESS_DATABASE_URL")]
    serverless_database_url: Option<String>,

    /// WebSocket proxy template, e.g. "{host}/v2?address={host}:{port}"
    #[arg(long, global = true, env = "WS_PROXY")]
    ws_proxy: Option<String>,

    /// Use ws:// instead of wss:// for the serverless driver
    #[arg(long, global = true)]
    insecure_websocket: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the benchmark over HTTP
    Serve {
        /// Bind address
        #[arg(short, long, env = "BIND_ADDRESS")]
        bind: Option<String>,
    },
    /// Benchmark every strategy once and print the results
    Run {
        /// Connect / query / teardown cycles per strategy
        #[arg(short, long)]
        runs: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli.overrides)?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            BenchServer::new(config)?.serve().await?;
        }
        Commands::Run { runs, format } => {
            let runs = runs.unwrap_or(config.default_runs);
            if runs == 0 {
                return Err(BenchError::InvalidRuns(0).into());
            }
            let strategies = strategy::from_config(&config)?;
            let results = strategy::run_all(&BenchmarkRunner::new(), &strategies, runs).await?;
            print_results(&BenchResponse { runs, results }, &format)?;
        }
    }
    Ok(())
}

fn load_config(overrides: &Overrides) -> anyhow::Result<BenchConfig> {
    let mut config = BenchConfig::load(overrides.config.as_deref()).context("Failed to load config")?;

    if let Some(ref url) = overrides.database_url {
        config.database_url = Some(url.clone());
    }
    if let Some(ref url) = overrides.pooler_url {
        config.pooler_url = Some(url.clone());
    }
    if overrides.serverless {
        config.serverless.enabled = true;
    }
    if let Some(ref url) = overrides.serverless_database_url {
        config.serverless.database_url = Some(url.clone());
    }
    if let Some(ref proxy) = overrides.ws_proxy {
        config.serverless.ws_proxy = proxy.clone();
    }
    if overrides.insecure_websocket {
        config.serverless.use_secure_websocket = false;
    }
    Ok(config)
}

fn print_results(response: &BenchResponse, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Table => {
            let width = response
                .results
                .keys()
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max("Strategy".len());

            println!(
                "{:width$} │ {:>12} │ {:>12} │ {:>12} │ {:>12}",
                "Strategy".white().bold(),
                "Connect ms".white().bold(),
                "Query ms".white().bold(),
                "Teardown ms".white().bold(),
                "Total ms".white().bold(),
                width = width
            );
            println!("{}", "─".repeat(width + 4 * 15).dimmed());

            for (name, summary) in &response.results {
                println!(
                    "{:width$} │ {:>12.3} │ {:>12.3} │ {:>12.3} │ {:>12.3}",
                    name.cyan(),
                    summary.average_connection_time,
                    summary.average_query_time,
                    summary.average_teardown_time,
                    summary.average_total_time,
                    width = width
                );
            }

            println!();
            println!("{} run(s) per strategy", response.runs.to_string().cyan());
        }
    }
    Ok(())
}
