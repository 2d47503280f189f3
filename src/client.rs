//! Client abstraction timed by the benchmark runner.
//!
//! A [`BenchClient`] is a single, not-yet-connected database client. A
//! [`ClientFactory`] hands out a fresh one for every run, so no connection is
//! ever reused across runs.

use async_trait::async_trait;

use crate::error::BenchResult;

/// One database client with an explicit connect / query / end lifecycle.
#[async_trait]
pub trait BenchClient: Send {
    /// Establish the connection. Resolves once the handshake has completed.
    async fn connect(&mut self) -> BenchResult<()>;

    /// Run `sql` to completion and return the number of rows received.
    async fn query(&mut self, sql: &str) -> BenchResult<u64>;

    /// Close the connection. Resolves once the connection is fully shut down.
    async fn end(&mut self) -> BenchResult<()>;
}

#[async_trait]
impl<C: BenchClient + ?Sized> BenchClient for Box<C> {
    async fn connect(&mut self) -> BenchResult<()> {
        (**self).connect().await
    }

    async fn query(&mut self, sql: &str) -> BenchResult<u64> {
        (**self).query(sql).await
    }

    async fn end(&mut self) -> BenchResult<()> {
        (**self).end().await
    }
}

/// Produces a fresh, unconnected client bound to one connection strategy.
pub trait ClientFactory: Send + Sync {
    fn create(&self) -> Box<dyn BenchClient>;
}

impl<F> ClientFactory for F
where
    F: Fn() -> Box<dyn BenchClient> + Send + Sync,
{
    fn create(&self) -> Box<dyn BenchClient> {
        self()
    }
}
