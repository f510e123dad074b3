//! Bounded HTTP fetching: one GET with a wall-clock deadline and a soft
//! byte cap on the streamed body.
//!
//! The fetcher never classifies responses — 4xx/5xx come back as ordinary
//! [`FetchResult`]s and the discovery engine decides what they mean.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::COOKIE;
use tracing::debug;

use siteprofiler_shared::{FetchResult, Result, SiteProfilerError};

/// User-Agent string for discovery requests.
const USER_AGENT: &str = concat!("siteprofiler/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Single-request HTTP fetcher with body-size bounding.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_body_bytes: usize,
}

impl Fetcher {
    /// Create a fetcher whose responses are truncated past `max_body_bytes`.
    pub fn new(max_body_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| {
                SiteProfilerError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// GET `url`, optionally sending a Cookie header, within `timeout_ms`.
    ///
    /// The deadline covers the whole call (connect, headers, body). On
    /// expiry the in-flight request is dropped and [`SiteProfilerError::Timeout`]
    /// is returned; partial body state is discarded with it.
    ///
    /// The body is read chunk by chunk; reading stops once the accumulated
    /// bytes exceed the budget, and whatever accumulated is returned with
    /// the original status. The cut is byte-oriented, so the tail of `text`
    /// may be a lossily decoded partial character — downstream scanners
    /// tolerate that.
    pub async fn fetch(
        &self,
        url: &str,
        cookie: Option<&str>,
        timeout_ms: u64,
    ) -> Result<FetchResult> {
        let deadline = Duration::from_millis(timeout_ms);
        match tokio::time::timeout(deadline, self.fetch_inner(url, cookie)).await {
            Ok(result) => result,
            Err(_) => Err(SiteProfilerError::timeout(url, timeout_ms)),
        }
    }

    async fn fetch_inner(&self, url: &str, cookie: Option<&str>) -> Result<FetchResult> {
        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| SiteProfilerError::Network(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        let mut body: Vec<u8> = Vec::new();

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SiteProfilerError::Network(format!("{url}: failed to read body: {e}")))?
        {
            body.extend_from_slice(&chunk);
            if body.len() > self.max_body_bytes {
                debug!(url, bytes = body.len(), "byte budget hit, truncating body");
                break;
            }
        }

        Ok(FetchResult {
            status,
            text: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn non_2xx_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(300_000).unwrap();
        let result = fetcher
            .fetch(&format!("{}/sitemap.xml", server.uri()), None, 5_000)
            .await
            .unwrap();

        assert_eq!(result.status, 403);
        assert_eq!(result.text, "denied");
    }

    #[tokio::test]
    async fn body_is_truncated_at_byte_budget() {
        let server = MockServer::start().await;
        let big = "x".repeat(50_000);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(big))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(1_000).unwrap();
        let result = fetcher.fetch(&server.uri(), None, 5_000).await.unwrap();

        assert_eq!(result.status, 200);
        assert!(result.text.len() < 50_000);
        assert!(!result.text.is_empty());
    }

    #[tokio::test]
    async fn deadline_expiry_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(300_000).unwrap();
        let err = fetcher.fetch(&server.uri(), None, 50).await.unwrap_err();

        assert!(matches!(err, SiteProfilerError::Timeout { ms: 50, .. }));
    }

    #[tokio::test]
    async fn cookie_header_is_sent_when_given() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(300_000).unwrap();
        let result = fetcher
            .fetch(&server.uri(), Some("session=abc"), 5_000)
            .await
            .unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.text, "ok");
    }

    #[tokio::test]
    async fn connection_failure_is_a_network_error() {
        // RFC 2606 reserves .invalid; resolution always fails.
        let fetcher = Fetcher::new(300_000).unwrap();
        let err = fetcher
            .fetch("http://site.invalid/", None, 5_000)
            .await
            .unwrap_err();

        assert!(matches!(err, SiteProfilerError::Network(_)));
    }
}
