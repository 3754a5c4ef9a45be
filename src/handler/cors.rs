//! CORS decorator
//!
//! Wraps any [`Handler`]: answers `OPTIONS` itself and stamps the same three
//! headers on every response the wrapped handler produces, errors included.

use super::Handler;
use crate::http::{self, HttpResponse};
use hyper::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::{Method, Request};
use std::future::Future;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Permissive CORS around an inner handler
#[derive(Debug, Clone)]
pub struct Cors<H> {
    inner: H,
}

impl<H> Cors<H> {
    pub const fn new(inner: H) -> Self {
        Self { inner }
    }

    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Handler> Handler for Cors<H> {
    fn handle(&self, req: Request<()>) -> impl Future<Output = HttpResponse> + Send {
        async move {
            let mut response = if req.method() == Method::OPTIONS {
                http::build_options_response()
            } else {
                self.inner.handle(req).await
            };
            apply_cors_headers(response.headers_mut());
            response
        }
    }
}

/// Insert the three CORS headers, replacing any the inner handler set
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
