//! HTTP telemetry source.
//!
//! Issues a single GET against the appliance's status endpoint, typically
//! `http://<host>:8008/setup/eureka_info?options=detail`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{parse_snapshot, TelemetrySnapshot, TelemetrySource};
use crate::error::{Error, Result};

/// A source that polls the appliance over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
    timeout: Duration,
    description: String,
}

impl HttpSource {
    /// Create a source for `url`; every request is bounded by `timeout`.
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::Config(
                "fetch timeout must be greater than zero".to_string(),
            ));
        }

        // The appliance lives on the LAN, so proxy settings from the
        // environment are ignored.
        let client = Client::builder().no_proxy().build()?;

        Ok(Self {
            client,
            description: url.to_string(),
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request(&self) -> Result<TelemetrySnapshot> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_snapshot(&body)
    }
}

#[async_trait]
impl TelemetrySource for HttpSource {
    /// The timeout bounds the whole exchange, headers and body alike.
    async fn fetch(&self) -> Result<TelemetrySnapshot> {
        tokio::time::timeout(self.timeout, self.request())
            .await
            .map_err(|_| Error::Timeout(self.timeout))?
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve exactly one canned response and return the URL to hit.
    async fn serve_once(response: String) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        Url::parse(&format!("http://{addr}/setup/eureka_info?options=detail")).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(http_response(
            "200 OK",
            r#"{"name":"Office","signal_level":-50,"opt_in":{"crash":false}}"#,
        ))
        .await;

        let source = HttpSource::new(url, Duration::from_secs(3)).unwrap();
        let snapshot = source.fetch().await.unwrap();
        assert_eq!(snapshot["name"], "Office");
        assert_eq!(snapshot["signal_level"], -50);
        assert_eq!(snapshot["opt_in"]["crash"], false);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve_once(http_response("500 Internal Server Error", "{}")).await;

        let source = HttpSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(matches!(err, Error::Protocol { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let url = serve_once(http_response("200 OK", "<html>setup</html>")).await;

        let source = HttpSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_fetch_non_object_json() {
        let url = serve_once(http_response("200 OK", "[1,2,3]")).await;

        let source = HttpSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/setup/eureka_info")).unwrap();
        let source = HttpSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and never answer.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let url = Url::parse(&format!("http://{addr}/setup/eureka_info")).unwrap();
        let source = HttpSource::new(url, Duration::from_millis(200)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(200)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let url = Url::parse("http://127.0.0.1:8008/").unwrap();
        let err = HttpSource::new(url, Duration::ZERO).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
