// Connection handling module
// Serves a single accepted TCP connection with hyper's HTTP/1 builder

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the task ends
struct ConnectionGuard(Arc<AtomicUsize>);

impl ConnectionGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept a connection and serve it in a spawned task.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    let guard = ConnectionGuard::new(Arc::clone(conn_counter));
    logger::log_connection_accepted(&peer_addr);

    if let Err(e) = stream.set_nodelay(true) {
        logger::log_debug(&format!("Failed to set TCP_NODELAY for {peer_addr}: {e}"));
    }

    let state = Arc::clone(state);
    tokio::spawn(async move {
        let _guard = guard;
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let response = handler::handle_request(&req, &state, peer_addr);
            async move { Ok::<_, Infallible>(response) }
        });

        if let Err(err) = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service)
            .await
        {
            logger::log_connection_error(&err);
        }
    });
}
