//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use hola::{HolaConfig, HttpServer, Shutdown};

/// Headers observed on one downstream request, names lowercased.
pub type CapturedHeaders = Vec<(String, String)>;

/// Read the request head (start line + headers) before responding.
async fn read_request_head(socket: &mut TcpStream) -> CapturedHeaders {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => break,
        }
    }

    let head = String::from_utf8_lossy(&buf);
    head.lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

/// Start a programmable mock aloha backend.
///
/// The closure sees the captured request headers and returns a status and
/// a body; the body is always served as application/json.
pub async fn start_programmable_aloha<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(CapturedHeaders) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let headers = read_request_head(&mut socket).await;
                        let (status, body) = f(headers).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock aloha returning a fixed greeting array.
#[allow(dead_code)]
pub async fn start_mock_aloha(addr: SocketAddr, greetings: &'static [&'static str]) {
    start_programmable_aloha(addr, move |_headers| async move {
        (200, serde_json::to_string(greetings).unwrap())
    })
    .await;
}

/// Base config for tests: fixed hostname, downstream pointed at `aloha`.
pub fn test_config(bind: SocketAddr, aloha: Option<SocketAddr>) -> HolaConfig {
    let mut config = HolaConfig::default();
    config.listener.bind_address = bind.to_string();
    config.greeting.hostname = Some("test-host".to_string());
    if let Some(addr) = aloha {
        config.downstream.url = Some(format!("http://{addr}/"));
    }
    config
}

/// Spawn a hola server, returning its shutdown coordinator.
pub async fn start_hola(addr: SocketAddr, config: HolaConfig) -> Shutdown {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    shutdown
}

/// Non-pooled client so connections never outlive a test.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
