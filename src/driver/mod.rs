//! Concrete [`BenchClient`](crate::client::BenchClient) implementations.
//!
//! - [`pg`]: plain TCP connection through sqlx, used for the direct and pooler strategies
//! - [`serverless`]: PostgreSQL wire protocol tunneled through a WebSocket proxy
//! - [`ws`]: byte-stream adapter the serverless driver runs on

pub mod pg;
pub mod serverless;
pub mod ws;

pub use pg::{PgClient, PgFactory};
pub use serverless::{ServerlessClient, ServerlessFactory};
