//! Request handler module
//!
//! A [`Handler`] turns a request head into a response. The server only knows
//! this trait; behaviour is layered by wrapping one handler in another.

pub mod cors;
pub mod static_files;

pub use cors::Cors;
pub use static_files::StaticFiles;

use crate::http::HttpResponse;
use hyper::Request;
use std::future::Future;

/// Anything that can answer a request.
///
/// Request bodies are never read, so handlers receive the head only.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request<()>) -> impl Future<Output = HttpResponse> + Send;
}
