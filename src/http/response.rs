//! HTTP response building module
//!
//! Builders for every status the static file handler produces. Bodies are
//! always `Full<Bytes>` with an explicit `Content-Length`, so a HEAD answer
//! can drop the body and keep the headers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION, SERVER};
use hyper::{Response, StatusCode};

pub type HttpResponse = Response<Full<Bytes>>;

/// Value of the `Server` header
pub const SERVER_NAME: &str = concat!("storefront-server/", env!("CARGO_PKG_VERSION"));

/// 200 with file content.
///
/// `content_length` is the size on disk; `body` is empty for HEAD requests.
pub fn build_file_response(
    body: Bytes,
    content_length: u64,
    content_type: &str,
    last_modified: &str,
) -> HttpResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(SERVER, SERVER_NAME)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .header(LAST_MODIFIED, last_modified)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 200 with a generated HTML page
pub fn build_html_response(content: String) -> HttpResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(SERVER, SERVER_NAME)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content.len())
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 200 with no body, the answer to every OPTIONS request
pub fn build_options_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::OK)
        .header(SERVER, SERVER_NAME)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 301 to the directory URL with a trailing slash
pub fn build_redirect_response(location: &str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(SERVER, SERVER_NAME)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 304 Not Modified
pub fn build_304_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(SERVER, SERVER_NAME)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 403 Forbidden
pub fn build_403_response() -> HttpResponse {
    build_error_response(StatusCode::FORBIDDEN, "Forbidden")
}

/// 404 Not Found with a short explanation
pub fn build_404_response(message: &str) -> HttpResponse {
    build_error_response(StatusCode::NOT_FOUND, message)
}

/// 501 for methods the static handler does not implement
pub fn build_501_response(method: &str) -> HttpResponse {
    build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
    )
}

/// Plain-text error page: `<code> <message>`
pub fn build_error_response(status: StatusCode, message: &str) -> HttpResponse {
    let body = format!("{} {message}\n", status.as_u16());
    Response::builder()
        .status(status)
        .header(SERVER, SERVER_NAME)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = status;
            fallback
        })
}

/// Keep status and headers, drop the body (HEAD)
pub fn strip_body(response: HttpResponse) -> HttpResponse {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Full::new(Bytes::new()))
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: HttpResponse) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_error_response_body_and_length() {
        let resp = build_404_response("File not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "19");
        assert_eq!(resp.headers()[SERVER], SERVER_NAME);
        assert_eq!(body_bytes(resp).await, "404 File not found\n");
    }

    #[tokio::test]
    async fn test_501_names_method() {
        let resp = build_501_response("POST");
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(
            body_bytes(resp).await,
            "501 Unsupported method ('POST')\n"
        );
    }

    #[tokio::test]
    async fn test_options_response_is_empty_200() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_strip_body_keeps_headers() {
        let resp = strip_body(build_html_response("<p>hi</p>".to_string()));
        assert_eq!(resp.headers()[CONTENT_LENGTH], "9");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[test]
    fn test_redirect_location() {
        let resp = build_redirect_response("/js/?v=2");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/js/?v=2");
    }
}
