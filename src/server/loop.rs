// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Upper bound on waiting for in-flight connections after shutdown
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` fires.
///
/// Returns once the listener is closed and in-flight connections have
/// finished or `DRAIN_TIMEOUT` has elapsed.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
    logger::log_info("Listener closed, draining active connections");
    drain_connections(&active_connections).await;
}

/// Wait for the active connection count to reach zero, bounded by `DRAIN_TIMEOUT`
async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_info("All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Drain timeout after {}s, {remaining} connection(s) still open",
                DRAIN_TIMEOUT.as_secs()
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_and_shuts_down() {
        let mut config = Config::default();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config).unwrap());

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());
        let server = tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));

        let root = raw_get(addr, "/").await;
        assert!(root.starts_with("HTTP/1.1 200 OK"));
        assert!(root.ends_with("Hello from Rust VLESS!\n"));

        let missing = raw_get(addr, "/nope").await;
        assert!(missing.starts_with("HTTP/1.1 404 Not Found"));
        assert!(missing.ends_with("Not Found"));

        let forbidden = raw_get(addr, "/xhttp/00000000-0000-0000-0000-000000000000").await;
        assert!(forbidden.starts_with("HTTP/1.1 403 Forbidden"));
        assert!(forbidden.ends_with("Invalid UUID"));

        shutdown.trigger();
        tokio::time::timeout(DRAIN_TIMEOUT * 2, server)
            .await
            .unwrap()
            .unwrap();
    }
}
