//! Browser launching
//!
//! Opening a browser tab is a best-effort startup side effect. It is injected
//! as a [`BrowserLauncher`] so tests and headless hosts can swap it out.

use crate::logger;
use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

/// Opens a URL in a browser
pub trait BrowserLauncher: Send + Sync + 'static {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The host's default browser, through the platform opener command
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

/// Does nothing; for tests and headless environments
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBrowser;

impl BrowserLauncher for NoBrowser {
    fn open(&self, _url: &str) -> io::Result<()> {
        Ok(())
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no browser opener available");
        for (program, args) in opener_commands(url) {
            match run_opener(program, &args) {
                Ok(()) => return Ok(()),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

#[cfg(target_os = "macos")]
fn opener_commands(url: &str) -> Vec<(&'static str, Vec<String>)> {
    vec![("open", vec![url.to_string()])]
}

#[cfg(windows)]
fn opener_commands(url: &str) -> Vec<(&'static str, Vec<String>)> {
    // The empty string is the window title `start` expects first
    vec![(
        "cmd",
        vec![
            "/C".to_string(),
            "start".to_string(),
            String::new(),
            url.to_string(),
        ],
    )]
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener_commands(url: &str) -> Vec<(&'static str, Vec<String>)> {
    vec![
        ("xdg-open", vec![url.to_string()]),
        ("gio", vec!["open".to_string(), url.to_string()]),
        ("sensible-browser", vec![url.to_string()]),
    ]
}

fn run_opener(program: &str, args: &[String]) -> io::Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

/// Open `url` on a blocking worker thread and log the outcome.
///
/// Returns immediately; failures are logged and never retried.
pub fn launch_in_background<B: BrowserLauncher>(launcher: Arc<B>, url: String) {
    tokio::task::spawn_blocking(move || match launcher.open(&url) {
        Ok(()) => logger::log_browser_opened(&url),
        Err(e) => logger::log_browser_failed(&url, &e),
    });
}
