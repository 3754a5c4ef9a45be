//! Static file server for the storefront frontend.
//!
//! Serves a directory over HTTP/1.1, answers `OPTIONS` with a bare `200` and
//! puts permissive CORS headers on every response.

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::ServerConfig;
pub use error::ServerError;
