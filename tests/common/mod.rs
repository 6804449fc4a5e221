//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use space_data_proxy::config::ProxyConfig;
use space_data_proxy::http::HttpServer;
use space_data_proxy::lifecycle::Shutdown;

/// Start a mock upstream on an ephemeral port that answers every request
/// with a fixed status and body.
pub async fn start_mock_upstream(status: u16, body: String) -> SocketAddr {
    start_programmable_upstream(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a programmable mock upstream on an ephemeral port.
///
/// The handler receives the request target (path plus query string) and
/// returns the status and body to send back.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let target = read_request_target(&mut socket).await;
                        let (status, body) = f(target).await;
                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read the request head and return the target from the request line.
async fn read_request_target(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Default configuration pointing every upstream at the given mock address.
pub fn proxy_config_for(upstream_addr: SocketAddr) -> ProxyConfig {
    let base = format!("http://{}", upstream_addr);
    let mut config = ProxyConfig::default();
    config.upstream.neo_base_url = base.clone();
    config.upstream.sbdb_base_url = base.clone();
    config.upstream.usgs_base_url = base;
    config
}

/// Build and run a proxy instance on an ephemeral port.
///
/// The listener is bound before the server task starts, so tests can issue
/// requests immediately.
pub async fn spawn_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
