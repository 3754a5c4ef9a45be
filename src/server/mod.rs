// Server module entry point
// Binds the listening socket and runs the accept loop around a handler

pub mod connection;
pub mod listener;
pub mod server_loop;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::Handler;

pub use listener::create_listener;
pub use signal::shutdown_signal;

/// A bound, not yet serving, HTTP server
pub struct Server<H> {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<H>,
    access_log_format: Option<Arc<str>>,
}

impl<H: Handler> Server<H> {
    /// Bind the configured address. Fails fast; there is no retry.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn bind(config: &ServerConfig, handler: H) -> Result<Self, ServerError> {
        let addr = config.socket_addr()?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let access_log_format = config
            .logging
            .access_log
            .then(|| Arc::from(config.logging.access_log_format.as_str()));

        Ok(Self {
            listener,
            local_addr,
            handler: Arc::new(handler),
            access_log_format,
        })
    }

    /// Actual bound address (differs from the configured one for port 0)
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves
    pub async fn serve_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        server_loop::run_accept_loop(
            self.listener,
            self.handler,
            self.access_log_format,
            shutdown,
        )
        .await;
    }
}
