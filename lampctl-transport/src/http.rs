//! HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use lampctl_core::constants::DEFAULT_TIMEOUT;
use lampctl_types::DeviceAddress;
use tracing::{debug, trace, warn};

use crate::{error::*, Response, Transport};

/// HTTP transport for the lamp controller
///
/// Plain `GET` requests, one per operation. The timeout covers connecting,
/// sending and reading the whole body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    address: DeviceAddress,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create new HTTP transport
    pub fn new(address: DeviceAddress) -> Self {
        Self {
            address,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else if err.is_connect() {
            Error::Connect(error_chain(&err))
        } else {
            Error::Request(error_chain(&err))
        }
    }
}

/// `err` followed by its sources, reqwest keeps the useful part (refused,
/// DNS failure) in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.address.url(path);

        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let err = self.map_error(e);
                warn!("GET {} failed: {}", url, err);
                err
            })?;

        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.timeout)
            } else {
                Error::Body(error_chain(&e))
            }
        })?;

        trace!("GET {} -> {} ({} bytes): {}", url, status, body.len(), body);

        Ok(Response { status, body })
    }

    fn base_url(&self) -> String {
        self.address.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 512];

        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve one canned response, report the request head
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (DeviceAddress, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\nContent-Type: text/html\r\n",
                    "Content-Length: {}\r\nConnection: close\r\n\r\n{}"
                ),
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.flush().await.unwrap();

            let _ = tx.send(request);
        });

        let address = DeviceAddress::new("127.0.0.1").unwrap().with_port(port);
        (address, rx)
    }

    #[test]
    fn test_http_transport_create() {
        let address = DeviceAddress::new("192.168.0.53").unwrap();
        let transport = HttpTransport::new(address);

        assert_eq!(transport.base_url(), "http://192.168.0.53");
        assert_eq!(transport.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_http_transport_with_timeout() {
        let address = DeviceAddress::new("192.168.0.53").unwrap();
        let transport = HttpTransport::new(address).with_timeout(Duration::from_millis(750));

        assert_eq!(transport.timeout(), Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_http_transport_get_status_page() {
        let (address, request) = serve_once("200 OK", "<p>Temperatura: 23.5 &deg;C</p>").await;
        let transport = HttpTransport::new(address);

        let response = transport.get("/").await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body, "<p>Temperatura: 23.5 &deg;C</p>");

        let request = request.await.unwrap();
        assert!(request.starts_with("GET / HTTP/1.1\r\n"), "{}", request);
    }

    #[tokio::test]
    async fn test_http_transport_sends_control_path() {
        let (address, request) = serve_once("200 OK", "OK").await;
        let transport = HttpTransport::new(address);

        transport.get("/lampada/on").await.unwrap();

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /lampada/on HTTP/1.1\r\n"), "{}", request);
    }

    #[tokio::test]
    async fn test_http_transport_reports_error_status() {
        let (address, _request) = serve_once("404 Not Found", "Not found").await;
        let transport = HttpTransport::new(address);

        let response = transport.get("/lampada/dim").await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let address = DeviceAddress::new("127.0.0.1").unwrap().with_port(port);
        let transport = HttpTransport::new(address).with_timeout(Duration::from_secs(2));

        let err = transport.get("/").await.unwrap_err();
        assert!(err.is_connect(), "{:?}", err);
    }

    #[tokio::test]
    async fn test_http_transport_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Accept and never answer
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(stream);
        });

        let address = DeviceAddress::new("127.0.0.1").unwrap().with_port(port);
        let transport = HttpTransport::new(address).with_timeout(Duration::from_millis(200));

        let err = transport.get("/").await.unwrap_err();
        assert!(err.is_timeout(), "{:?}", err);
    }
}
