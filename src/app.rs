//! Storefront server assembly
//!
//! Wires configuration, the CORS-wrapped static file handler, the listening
//! socket and the browser launch together.

use std::sync::Arc;

use crate::browser::{self, BrowserLauncher};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::{Cors, StaticFiles};
use crate::logger;
use crate::server::Server;

/// Static files under the configured root, with CORS on every response
pub type StorefrontHandler = Cors<StaticFiles>;

pub fn storefront_handler(config: &ServerConfig) -> StorefrontHandler {
    Cors::new(StaticFiles::new(&config.root_directory))
}

/// Bind, announce the URLs and kick off the browser launch.
///
/// The returned server is not serving yet; call
/// [`Server::serve_until`] on it. Must run inside a Tokio runtime.
pub fn start<B: BrowserLauncher>(
    config: &ServerConfig,
    launcher: B,
) -> Result<Server<StorefrontHandler>, ServerError> {
    let server = Server::bind(config, storefront_handler(config))?;
    logger::log_server_start(&server.local_addr(), config);

    if let Some(url) = &config.auto_open_url {
        browser::launch_in_background(Arc::new(launcher), url.clone());
    }

    Ok(server)
}
