//! # pg-edge-bench
//!
//! Measures how long PostgreSQL connection establishment, query execution and
//! teardown take through different connection strategies.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use pg_edge_bench::prelude::*;
//!
//! let factory = PgFactory::from_url("postgres://bench@localhost:6432/bench")?;
//! let summary = BenchmarkRunner::new().run(&factory, 10).await?;
//! println!("connect: {:.2} ms", summary.average_connection_time);
//! ```
//!
//! ## Strategies
//!
//! | Name                      | Client                               |
//! |---------------------------|--------------------------------------|
//! | `directWithPgbouncer`     | TCP, through an external pooler      |
//! | `hyperdriveWithPgbouncer` | TCP, through a managed pooling proxy |
//! | `neonServerlessDriver`    | PostgreSQL tunneled over WebSocket   |

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod handler;
pub mod runner;
pub mod server;
pub mod strategy;

pub mod prelude {
    pub use crate::client::{BenchClient, ClientFactory};
    pub use crate::config::{BenchConfig, ServerlessConfig};
    pub use crate::driver::{PgFactory, ServerlessFactory};
    pub use crate::error::*;
    pub use crate::runner::{BenchmarkRunner, BenchmarkSummary};
    pub use crate::server::BenchServer;
    pub use crate::strategy::Strategy;
}
