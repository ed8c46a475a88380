use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::debug;

use crate::config::ScrapingConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Blocking HTTP wrapper used by the parser's online path.
///
/// One GET per profile, browser-like headers, bounded timeout, no retry.
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Build the underlying client.
    ///
    /// Construction failure means the process has no usable network
    /// capability (TLS backend, system resolver), which is a
    /// configuration error rather than a fetch error.
    pub fn new(config: &ScrapingConfig) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| {
                ScrapeError::configuration(format!("cannot build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// GET a URL and return the response body as text.
    ///
    /// Transport failures map to `Fetch`, non-2xx statuses to `HttpStatus`.
    pub fn get_text(&self, url: &str) -> ScrapeResult<String> {
        debug!("HTTP GET {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|e| ScrapeError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| ScrapeError::fetch(url, e.to_string()))
    }
}
