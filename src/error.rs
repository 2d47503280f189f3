//! Error types for pg-edge-bench.

use thiserror::Error;

/// The main error type for benchmark operations.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Failed to establish a database connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A benchmark query failed.
    #[error("Query error: {0}")]
    Query(String),

    /// Closing the connection failed.
    #[error("Teardown error: {0}")]
    Teardown(String),

    /// Query or teardown issued on a client that never connected.
    #[error("Client is not connected")]
    NotConnected,

    /// Repetition count outside `1..=u32::MAX`.
    #[error("Invalid runs: {0}. Expected a positive integer")]
    InvalidRuns(i64),

    /// Averages requested over an empty sample set.
    #[error("No samples collected")]
    NoSamples,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Create a connection error from any displayable cause.
    pub fn connection(cause: impl std::fmt::Display) -> Self {
        Self::Connection(cause.to_string())
    }

    /// Create a query error from any displayable cause.
    pub fn query(cause: impl std::fmt::Display) -> Self {
        Self::Query(cause.to_string())
    }

    /// Create a teardown error from any displayable cause.
    pub fn teardown(cause: impl std::fmt::Display) -> Self {
        Self::Teardown(cause.to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRuns(_) => 400,
            Self::Connection(_) => 503,
            Self::Query(_) | Self::Teardown(_) | Self::NotConnected | Self::NoSamples => 500,
            Self::Config(_) | Self::Io(_) => 500,
        }
    }

    /// Machine-readable error code for JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Query(_) => "QUERY_ERROR",
            Self::Teardown(_) => "TEARDOWN_ERROR",
            Self::NotConnected => "NOT_CONNECTED",
            Self::InvalidRuns(_) => "INVALID_RUNS",
            Self::NoSamples => "NO_SAMPLES",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;
