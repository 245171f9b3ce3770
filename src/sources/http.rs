use crate::models::PropertyRecord;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches property records from the REST backend as a JSON array
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source with the default request timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("property-portfolio/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PropertySource for HttpSource {
    async fn load(&self) -> Result<Vec<PropertyRecord>> {
        info!("Fetching properties from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to reach property backend")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Property backend returned status: {}", status);
            let detail = if detail.is_empty() {
                status.to_string()
            } else {
                detail
            };
            anyhow::bail!("API {}: {}", status.as_u16(), detail);
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes", body.len());

        let records: Vec<PropertyRecord> =
            serde_json::from_str(&body).context("Failed to parse property records from backend")?;
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sources::seed::seed_records;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the URL to hit
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/api/biens", addr)
    }

    /// Accept one connection and never answer it
    async fn serve_silently() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        format!("http://{}/api/biens", addr)
    }

    #[tokio::test]
    async fn request_times_out() {
        let url = serve_silently().await;
        let source = HttpSource::with_timeout(url, Duration::from_secs(1)).unwrap();

        let started = std::time::Instant::now();
        let err = source.load().await.unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(err.to_string(), "Failed to reach property backend");
    }

    #[tokio::test]
    async fn configured_timeout_reaches_client() {
        let url = serve_silently().await;
        let config = Config::from_lookup(|key| match key {
            "PORTFOLIO_SOURCE" => Some(url.clone()),
            "PORTFOLIO_HTTP_TIMEOUT_SECS" => Some("1".to_string()),
            _ => None,
        });
        assert_eq!(config.http_timeout, Duration::from_secs(1));

        let source = config.build_source().unwrap();
        assert_eq!(source.source_name(), "http");

        let started = std::time::Instant::now();
        assert!(source.load().await.is_err());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn loads_records_from_backend() {
        let body = serde_json::to_string(&seed_records()).unwrap();
        let url = serve_once("200 OK", body).await;

        let records = HttpSource::new(url).unwrap().load().await.unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[5].id, "b-1006");
    }

    #[tokio::test]
    async fn error_status_includes_body() {
        let url = serve_once("503 Service Unavailable", "backend down".to_string()).await;

        let err = HttpSource::new(url).unwrap().load().await.unwrap_err();
        assert_eq!(err.to_string(), "API 503: backend down");
    }
}
