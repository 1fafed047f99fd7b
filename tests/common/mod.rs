//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock upstream that echoes the raw request head back as the
/// response body. Lets tests assert on the request line and headers the
/// proxy actually sent. Returns the bound address.
pub async fn start_echo_upstream() -> SocketAddr {
    start_upstream(Duration::ZERO).await
}

/// Same as [`start_echo_upstream`], but waits `delay` before responding.
/// Used to hold a request in flight across a shutdown.
#[allow(dead_code)]
pub async fn start_slow_upstream(delay: Duration) -> SocketAddr {
    start_upstream(delay).await
}

async fn start_upstream(delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let mut head = Vec::new();

                        // Read until the end of the header block. The tests
                        // only send bodyless requests.
                        loop {
                            let n = socket.read(&mut buf).await.unwrap_or(0);
                            if n == 0 {
                                break;
                            }
                            head.extend_from_slice(&buf[..n]);
                            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }

                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }

                        let body = String::from_utf8_lossy(&head).into_owned();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
