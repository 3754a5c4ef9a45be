// Configuration module entry point
// Builds the startup configuration from fixed defaults; nothing is read from disk

mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::ServerError;

// Re-export public types
pub use types::{LoggingConfig, ServerConfig, ADMIN_PAGE, CHECKOUT_PAGE};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Directory holding the server's own sources, served by default
pub fn default_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

impl ServerConfig {
    /// Load configuration for the default root directory
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from(&default_root())
    }

    /// Fixed configuration serving `dir`: port 3000 on all interfaces, the
    /// browser opened on the checkout page.
    ///
    /// Only the built-in defaults are layered; no file or environment source
    /// can change them.
    pub fn load_from(dir: &Path) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("root_directory", dir.to_string_lossy().into_owned())?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.auto_open_url = Some(cfg.public_url(CHECKOUT_PAGE));
        Ok(cfg)
    }

    /// `http://localhost:{port}/{path}`
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "http://localhost:{}/{}",
            self.port,
            path.trim_start_matches('/')
        )
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
                address,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServerConfig::load_from(dir.path()).unwrap();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.root_directory, dir.path());
        assert_eq!(
            cfg.auto_open_url.as_deref(),
            Some("http://localhost:3000/checkout-professional.html")
        );
        assert_eq!(cfg.workers, None);
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn test_files_in_root_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["storefront.toml", "config.toml", "Settings.toml"] {
            fs::write(dir.path().join(name), "port = 8081\nhost = \"127.0.0.1\"\n").unwrap();
        }

        let cfg = ServerConfig::load_from(dir.path()).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.root_directory, dir.path());
        assert_eq!(
            cfg.auto_open_url.as_deref(),
            Some("http://localhost:3000/checkout-professional.html")
        );
    }

    #[test]
    fn test_injected_config_has_no_browser_by_default() {
        let cfg = ServerConfig::new(8081, "/srv");
        assert_eq!(cfg.auto_open_url, None);

        let url = cfg.public_url(CHECKOUT_PAGE);
        let cfg = cfg.with_auto_open_url(url);
        assert_eq!(
            cfg.auto_open_url.as_deref(),
            Some("http://localhost:8081/checkout-professional.html")
        );
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::new(3000, "/srv");
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "0.0.0.0:3000");

        let mut bad = cfg;
        bad.host = "not a host".to_string();
        assert!(matches!(
            bad.socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_public_url() {
        let cfg = ServerConfig::new(3000, "/srv");
        assert_eq!(
            cfg.public_url(ADMIN_PAGE),
            "http://localhost:3000/admin-orders.html"
        );
        assert_eq!(cfg.public_url("/x.html"), "http://localhost:3000/x.html");
    }
}
