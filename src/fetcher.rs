use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{debug, info};

use crate::config::USER_AGENT;
use crate::error::{ConfigError, FetchError};

static JEP_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?i:jep\s*)?(\d+)$").unwrap());

/// Source of raw page content. The enricher only sees this seam.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching content from: {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        debug!(
            "Fetched {} bytes from {} in {}ms",
            body.len(),
            url,
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}

/// Resolve a lookup target: `158` or `JEP 158` becomes `<base>158`,
/// anything else is taken as a URL.
pub fn lookup_url(target: &str, base_url: &str) -> String {
    let target = target.trim();
    match JEP_ID_RE.captures(target) {
        Some(caps) => format!("{}{}", base_url, &caps[1]),
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn lookup_numeric_id() {
        assert_eq!(lookup_url("158", DEFAULT_BASE_URL), "https://openjdk.org/jeps/158");
        assert_eq!(lookup_url(" JEP 444 ", DEFAULT_BASE_URL), "https://openjdk.org/jeps/444");
        assert_eq!(lookup_url("jep441", DEFAULT_BASE_URL), "https://openjdk.org/jeps/441");
    }

    #[test]
    fn lookup_full_url() {
        let url = "https://openjdk.org/jeps/8300000";
        assert_eq!(lookup_url(url, DEFAULT_BASE_URL), url);
    }

    #[tokio::test]
    async fn timeout_applies_to_silent_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and hold them open without ever answering.
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let url = format!("http://{}/jeps/158", addr);
        let result = tokio::time::timeout(Duration::from_secs(5), fetcher.fetch(&url))
            .await
            .expect("request outlived its timeout");

        match result {
            Err(FetchError::Request { source, .. }) => assert!(source.is_timeout()),
            other => panic!("expected a timed-out request, got {:?}", other),
        }
    }
}
