// Server loop module
// Accepts connections until shutdown is requested

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use crate::config::AppContext;
use crate::logger;

/// Accept connections on `listener` until `shutdown` resolves.
///
/// In-flight connections keep running on their own tasks after return.
pub async fn run<F>(listener: TcpListener, ctx: Arc<AppContext>, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer)) => spawn_connection(stream, peer, &ctx),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = &mut shutdown => {
                logger::log_shutdown();
                return;
            }
        }
    }
}
