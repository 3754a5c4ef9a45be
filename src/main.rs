use std::process::ExitCode;

use storefront_server::browser::SystemBrowser;
use storefront_server::server::shutdown_signal;
use storefront_server::{app, logger, ServerConfig, ServerError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = ServerConfig::load()?;
    logger::init(&cfg.logging).map_err(ServerError::Logger)?;

    // Build the Tokio runtime, sized by the workers setting when present
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.workers.filter(|&w| w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(ServerError::Runtime)?;

    runtime.block_on(async {
        let server = app::start(&cfg, SystemBrowser)?;
        server.serve_until(shutdown_signal()).await;
        Ok(())
    })
}
