// Connection handling module
// Serves one accepted TCP connection with hyper and writes access log lines

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::handler::Handler;
use crate::http::HttpResponse;
use crate::logger::{self, AccessLogEntry};

/// Serve `stream` in its own task until the client closes it.
///
/// `access_log_format` is `None` when access logging is off.
pub fn spawn_connection<H: Handler>(
    stream: TcpStream,
    peer_addr: SocketAddr,
    handler: Arc<H>,
    access_log_format: Option<Arc<str>>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            let handler = Arc::clone(&handler);
            let format = access_log_format.clone();
            async move {
                Ok::<_, Infallible>(
                    respond(handler.as_ref(), req, peer_addr, format.as_deref()).await,
                )
            }
        });

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);
        // Unparseable requests are answered by hyper itself, without CORS headers
        if let Err(err) = builder.serve_connection(io, service).await {
            logger::log_connection_error(&err);
        }
    });
}

/// Run one request through the handler, logging it when a format is given.
///
/// The request body is never read; handlers only see the head.
pub async fn respond<H: Handler, B>(
    handler: &H,
    req: Request<B>,
    peer_addr: SocketAddr,
    access_log_format: Option<&str>,
) -> HttpResponse {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let head = Request::from_parts(parts, ());

    let mut entry = access_log_format.map(|_| AccessLogEntry::from_request(&head, peer_addr));

    let response = handler.handle(head).await;

    if let (Some(entry), Some(format)) = (entry.as_mut(), access_log_format) {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.complete(response.status().as_u16(), body_bytes, started.elapsed());
        logger::log_access(entry, format);
    }
    response
}
