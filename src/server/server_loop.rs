// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use crate::handler::Handler;
use crate::logger;

/// Accept loop: one task per connection, no shared mutable state.
///
/// Connections already in flight keep running in their tasks after the loop
/// returns; only new accepts stop.
pub async fn run_accept_loop<H, F>(
    listener: TcpListener,
    handler: Arc<H>,
    access_log_format: Option<Arc<str>>,
    shutdown: F,
) where
    H: Handler,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&handler),
                            access_log_format.clone(),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => break,
        }
    }
}
