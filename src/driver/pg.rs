//! Direct PostgreSQL client over TCP using sqlx.
//!
//! Used for both the direct strategy and the managed pooler strategy; the two
//! only differ in the connection string.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection, Executor};
use std::str::FromStr;

use crate::client::{BenchClient, ClientFactory};
use crate::error::{BenchError, BenchResult};

/// A single sqlx connection, opened on `connect` and closed on `end`.
pub struct PgClient {
    options: PgConnectOptions,
    conn: Option<PgConnection>,
}

impl PgClient {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options, conn: None }
    }

    fn conn(&mut self) -> BenchResult<&mut PgConnection> {
        self.conn.as_mut().ok_or(BenchError::NotConnected)
    }
}

#[async_trait]
impl BenchClient for PgClient {
    async fn connect(&mut self) -> BenchResult<()> {
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(BenchError::connection)?;
        self.conn = Some(conn);
        Ok(())
    }

    async fn query(&mut self, sql: &str) -> BenchResult<u64> {
        // A bare &str has no arguments, so sqlx sends it as an unprepared
        // simple query. Transaction-mode poolers require this.
        let rows = self.conn()?.fetch_all(sql).await.map_err(BenchError::query)?;
        Ok(rows.len() as u64)
    }

    async fn end(&mut self) -> BenchResult<()> {
        let conn = self.conn.take().ok_or(BenchError::NotConnected)?;
        conn.close().await.map_err(BenchError::teardown)
    }
}

/// Builds [`PgClient`]s for one connection string.
#[derive(Debug, Clone)]
pub struct PgFactory {
    options: PgConnectOptions,
}

impl PgFactory {
    /// Parse `url` once; every client created afterwards reuses the options.
    pub fn from_url(url: &str) -> BenchResult<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| BenchError::Config(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();
        Ok(Self { options })
    }
}

impl ClientFactory for PgFactory {
    fn create(&self) -> Box<dyn BenchClient> {
        Box::new(PgClient::new(self.options.clone()))
    }
}
