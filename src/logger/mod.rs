//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Startup banner and URL announcement
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{LoggingConfig, ServerConfig, ADMIN_PAGE, CHECKOUT_PAGE};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Until then every line goes
/// to stdout/stderr.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Log startup details and print the URLs an operator needs.
///
/// The URL lines always go to stdout, whatever the log targets are.
pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    write_info(&format!("[Startup] Listening on {addr}"));
    write_info(&format!(
        "[Startup] Serving files from {}",
        config.root_directory.display()
    ));
    if let Some(workers) = config.workers {
        write_info(&format!("[Startup] Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("[Startup] Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("[Startup] Error log: {path}"));
    }

    for line in startup_urls(addr.port()) {
        println!("{line}");
    }
}

/// The three URL lines printed once the socket is bound
pub fn startup_urls(port: u16) -> [String; 3] {
    [
        format!("Server running at http://localhost:{port}"),
        format!("Admin dashboard: http://localhost:{port}/{ADMIN_PAGE}"),
        format!("Checkout: http://localhost:{port}/{CHECKOUT_PAGE}"),
    ]
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_browser_opened(url: &str) {
    write_info(&format!("[Browser] Opened {url}"));
}

pub fn log_browser_failed(url: &str, err: &std::io::Error) {
    log_warning(&format!("Could not open browser at {url}: {err}"));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[Shutdown] {signal} received, stopping server"));
}
