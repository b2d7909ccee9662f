// Connection module
// Serves one accepted TCP connection on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppContext;
use crate::handler;
use crate::logger;

/// Serve a connection in a spawned task.
///
/// The whole connection is bounded by `server.request_timeout`; a timeout
/// is logged as a warning and the connection dropped.
pub fn spawn_connection(stream: tokio::net::TcpStream, peer: SocketAddr, ctx: &Arc<AppContext>) {
    let ctx = Arc::clone(ctx);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = Duration::from_secs(ctx.server.request_timeout);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&ctx), Some(peer))),
        );

        match tokio::time::timeout(timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer} timed out after {} seconds",
                timeout.as_secs()
            )),
        }
    });
}
