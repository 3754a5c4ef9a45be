//! Startup error types
//!
//! Per-request failures never reach this type: they are answered with an
//! HTTP status by the handlers. Everything here aborts startup.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration could not be built or deserialized
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// Host/port pair does not form a socket address
    #[error("Invalid listen address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Listening socket could not be bound (port in use, no privilege, ...)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Log file could not be opened
    #[error("Failed to initialize logger: {0}")]
    Logger(#[source] io::Error),

    /// Tokio runtime could not be built
    #[error("Failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),
}
