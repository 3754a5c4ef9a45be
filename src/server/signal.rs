// Signal handling module
//
// The server has no shutdown command: it runs until the process is signalled.
// - SIGTERM: stop accepting and exit
// - SIGINT:  same (Ctrl+C)
// Other platforms only get Ctrl+C.

use crate::logger;

/// Resolves once a termination signal arrives.
///
/// If handlers cannot be registered this never resolves and the process is
/// left to the default signal disposition.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                logger::log_warning(&format!("Failed to register signal handlers: {e}"));
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => logger::log_shutdown("SIGTERM"),
        _ = sigint.recv() => logger::log_shutdown("SIGINT"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_shutdown("Ctrl+C"),
        Err(e) => {
            logger::log_warning(&format!("Failed to register Ctrl+C handler: {e}"));
            std::future::pending::<()>().await;
        }
    }
}
