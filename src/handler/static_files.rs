//! Static file serving module
//!
//! Maps request paths onto a root directory and serves files, index pages
//! and directory listings. Only GET and HEAD are implemented.

use super::Handler;
use crate::http::listing::{self, ListingEntry};
use crate::http::{self, cache, mime, HttpResponse, TranslatedPath};
use crate::logger;
use hyper::body::Bytes;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{Method, Request};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Tried in order when a directory is requested
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serves files below a root directory
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    /// `None` when the root did not exist at startup; it is then resolved
    /// again on every request and lookups fail with 404 until it appears
    canonical_root: Option<PathBuf>,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let canonical_root = match root.canonicalize() {
            Ok(p) => Some(p),
            Err(e) => {
                logger::log_warning(&format!(
                    "Static directory not found or inaccessible '{}': {e}",
                    root.display()
                ));
                None
            }
        };
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn serve(&self, req: &Request<()>, is_head: bool) -> HttpResponse {
        let uri = req.uri();
        let TranslatedPath {
            fs_path,
            trailing_slash,
        } = http::translate_path(&self.root, uri.path());

        if self.escapes_root(&fs_path, uri.path()).await {
            return http::build_404_response("File not found");
        }

        let metadata = match fs::metadata(&fs_path).await {
            Ok(m) => m,
            Err(e) => return io_error_response(&fs_path, &e),
        };

        if metadata.is_dir() {
            if !uri.path().ends_with('/') {
                let location = match uri.query() {
                    Some(q) => format!("{}/?{q}", uri.path()),
                    None => format!("{}/", uri.path()),
                };
                return http::build_redirect_response(&location);
            }

            for index in INDEX_FILES {
                let candidate = fs_path.join(index);
                let is_file = fs::metadata(&candidate)
                    .await
                    .is_ok_and(|m| m.is_file());
                if is_file && !self.escapes_root(&candidate, uri.path()).await {
                    return serve_file(req, &candidate, is_head).await;
                }
            }

            return list_directory(uri.path(), &fs_path).await;
        }

        // A file never matches a path ending in '/'
        if trailing_slash {
            return http::build_404_response("File not found");
        }

        serve_file(req, &fs_path, is_head).await
    }

    /// Symlinks may point anywhere; refuse targets outside the root.
    /// An unresolvable root refuses everything.
    async fn escapes_root(&self, candidate: &Path, url_path: &str) -> bool {
        let root = match &self.canonical_root {
            Some(root) => Cow::Borrowed(root.as_path()),
            None => match fs::canonicalize(&self.root).await {
                Ok(root) => Cow::Owned(root),
                Err(_) => return true,
            },
        };
        match fs::canonicalize(candidate).await {
            Ok(resolved) if !resolved.starts_with(&root) => {
                logger::log_warning(&format!(
                    "Path traversal attempt blocked: {url_path} -> {}",
                    resolved.display()
                ));
                true
            }
            _ => false,
        }
    }
}

impl Handler for StaticFiles {
    fn handle(&self, req: Request<()>) -> impl Future<Output = HttpResponse> + Send {
        async move {
            let is_head = req.method() == Method::HEAD;
            if req.method() != Method::GET && !is_head {
                return http::build_501_response(req.method().as_str());
            }

            let response = self.serve(&req, is_head).await;
            if is_head {
                http::strip_body(response)
            } else {
                response
            }
        }
    }
}

async fn serve_file(req: &Request<()>, path: &Path, is_head: bool) -> HttpResponse {
    let mut file = match fs::File::open(path).await {
        Ok(f) => f,
        Err(e) => return io_error_response(path, &e),
    };
    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => return io_error_response(path, &e),
    };

    let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    let if_modified_since = req
        .headers()
        .get(IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok());
    if cache::is_not_modified(
        modified,
        if_modified_since,
        req.headers().contains_key(IF_NONE_MATCH),
    ) {
        return http::build_304_response();
    }

    let (body, content_length) = if is_head {
        (Bytes::new(), metadata.len())
    } else {
        let mut data = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
        if let Err(e) = file.read_to_end(&mut data).await {
            return io_error_response(path, &e);
        }
        let len = data.len() as u64;
        (Bytes::from(data), len)
    };

    http::build_file_response(
        body,
        content_length,
        mime::content_type_for(path),
        &cache::format_http_date(modified),
    )
}

async fn list_directory(url_path: &str, dir: &Path) -> HttpResponse {
    let mut reader = match fs::read_dir(dir).await {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!(
                "Cannot list directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response("No permission to list directory");
        }
    };

    let mut entries = Vec::new();
    loop {
        match reader.next_entry().await {
            Ok(Some(entry)) => {
                let is_symlink = entry
                    .file_type()
                    .await
                    .is_ok_and(|t| t.is_symlink());
                let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());
                entries.push(ListingEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir,
                    is_symlink,
                });
            }
            Ok(None) => break,
            Err(e) => {
                logger::log_warning(&format!(
                    "Directory listing of '{}' truncated: {e}",
                    dir.display()
                ));
                break;
            }
        }
    }

    let display_path = percent_decode_str(url_path).decode_utf8_lossy();
    http::build_html_response(listing::render_listing(&display_path, entries))
}

/// Map a filesystem error to the status the client sees
fn io_error_response(path: &Path, err: &io::Error) -> HttpResponse {
    match err.kind() {
        io::ErrorKind::NotFound => http::build_404_response("File not found"),
        io::ErrorKind::PermissionDenied => http::build_403_response(),
        _ => {
            logger::log_error(&format!("Failed to read '{}': {err}", path.display()));
            http::build_404_response("File not found")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::SERVER_NAME;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION, SERVER};
    use hyper::StatusCode;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const CHECKOUT: &[u8] = b"<!DOCTYPE html><title>Checkout</title>\n";

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("checkout-professional.html"), CHECKOUT).unwrap();
        stdfs::create_dir_all(dir.path().join("js")).unwrap();
        stdfs::write(dir.path().join("js/cart.js"), "export const cart = [];").unwrap();
        stdfs::create_dir_all(dir.path().join("docs")).unwrap();
        stdfs::write(dir.path().join("docs/index.html"), "<h1>docs</h1>").unwrap();
        dir
    }

    fn get(uri: &str) -> Request<()> {
        Request::builder().uri(uri).body(()).unwrap()
    }

    async fn body_of(resp: HttpResponse) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_exact_file_bytes() {
        let dir = site();
        let files = StaticFiles::new(dir.path());

        let resp = files.handle(get("/checkout-professional.html")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(
            resp.headers()[CONTENT_LENGTH],
            CHECKOUT.len().to_string().as_str()
        );
        assert!(resp.headers().contains_key(LAST_MODIFIED));
        assert_eq!(resp.headers()[SERVER], SERVER_NAME);
        assert_eq!(body_of(resp).await, CHECKOUT);
    }

    #[tokio::test]
    async fn test_query_string_ignored_for_lookup() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let resp = files.handle(get("/js/cart.js?v=42")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/javascript");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let resp = files.handle(get("/admin-orders.html")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(resp).await, "404 File not found\n");
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_404() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let resp = files.handle(get("/checkout-professional.html/")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_stays_inside_root() {
        let outer = tempfile::tempdir().unwrap();
        stdfs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let root = outer.path().join("site");
        stdfs::create_dir_all(&root).unwrap();
        let files = StaticFiles::new(&root);

        for uri in [
            "/../secret.txt",
            "/%2e%2e/secret.txt",
            "/..%2fsecret.txt",
            "/../../etc/passwd",
        ] {
            let resp = files.handle(get(uri)).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_ne!(body_of(resp).await, "top secret");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_blocked() {
        let outer = tempfile::tempdir().unwrap();
        stdfs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let root = outer.path().join("site");
        stdfs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("leak.txt"))
            .unwrap();

        let files = StaticFiles::new(&root);
        let resp = files.handle(get("/leak.txt")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_blocked_when_root_created_late() {
        let outer = tempfile::tempdir().unwrap();
        stdfs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let root = outer.path().join("site");
        let files = StaticFiles::new(&root);

        stdfs::create_dir_all(&root).unwrap();
        stdfs::write(root.join("checkout-professional.html"), CHECKOUT).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), root.join("leak.txt"))
            .unwrap();

        let resp = files.handle(get("/leak.txt")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_ne!(body_of(resp).await, "top secret");

        let resp = files.handle(get("/checkout-professional.html")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, CHECKOUT);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = site();
        let files = StaticFiles::new(dir.path());

        let resp = files.handle(get("/js")).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/js/");

        let resp = files.handle(get("/docs?lang=en")).await;
        assert_eq!(resp.headers()[LOCATION], "/docs/?lang=en");
    }

    #[tokio::test]
    async fn test_directory_index_served() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let resp = files.handle(get("/docs/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "<h1>docs</h1>");
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let resp = files.handle(get("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");

        let html = String::from_utf8(body_of(resp).await.to_vec()).unwrap();
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains(
            "<a href=\"checkout-professional.html\">checkout-professional.html</a>"
        ));
        assert!(html.contains("<a href=\"js/\">js/</a>"));
    }

    #[tokio::test]
    async fn test_head_has_headers_but_no_body() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/checkout-professional.html")
            .body(())
            .unwrap();

        let resp = files.handle(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[CONTENT_LENGTH],
            CHECKOUT.len().to_string().as_str()
        );
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_if_modified_since_yields_304() {
        let dir = site();
        let files = StaticFiles::new(dir.path());

        let first = files.handle(get("/checkout-professional.html")).await;
        let last_modified = first.headers()[LAST_MODIFIED].to_str().unwrap().to_string();

        let req = Request::builder()
            .uri("/checkout-professional.html")
            .header(IF_MODIFIED_SINCE, &last_modified)
            .body(())
            .unwrap();
        let resp = files.handle(req).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert!(body_of(resp).await.is_empty());

        let req = Request::builder()
            .uri("/checkout-professional.html")
            .header(IF_MODIFIED_SINCE, &last_modified)
            .header(IF_NONE_MATCH, "\"abc\"")
            .body(())
            .unwrap();
        assert_eq!(files.handle(req).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unsupported_methods_are_501() {
        let dir = site();
        let files = StaticFiles::new(dir.path());
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/checkout-professional.html")
                .body(())
                .unwrap();
            let resp = files.handle(req).await;
            assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED, "{method}");
        }
    }

    #[tokio::test]
    async fn test_missing_root_is_404_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let files = StaticFiles::new(dir.path().join("nope"));
        assert_eq!(files.root(), dir.path().join("nope"));
        let resp = files.handle(get("/")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
