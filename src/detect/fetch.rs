//! HTTP probing of watched targets.

use crate::error::{Result, WatchError};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use reqwest::header::LAST_MODIFIED;
use tracing::{debug, info};

/// HTTP-date layout of the `Last-Modified` header, interpreted as UTC.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// What a single probe of a target yielded.
///
/// Produced by [`Fetcher::probe`]; fetch failures are the `Err` arm of the
/// surrounding `Result`. The detector dispatches on this to pick a strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchKind {
    /// The server sent a usable `Last-Modified` header.
    LastModified(DateTime<Utc>),
    /// No usable timestamp; the full response body as text.
    Body(String),
}

/// Issues the per-target requests for one detection pass.
///
/// A metadata-only HEAD request is tried first; the full body is fetched with
/// GET only when the HEAD response lacks a usable `Last-Modified` header.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher using the given HTTP client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Probe a target once, returning its timestamp or body text.
    ///
    /// # Errors
    ///
    /// Returns an error on any network failure or non-success status; the
    /// caller treats that as "no observation this cycle".
    pub async fn probe(&self, url: &str) -> Result<FetchKind> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| WatchError::FetchError(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::FetchStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(value) = response.headers().get(LAST_MODIFIED) {
            match value.to_str().ok().and_then(|raw| parse_http_date(raw).ok()) {
                Some(modified) => return Ok(FetchKind::LastModified(modified)),
                // Unparsable header counts as absent and routes to the
                // content strategy.
                None => debug!("Unusable Last-Modified header from {url}"),
            }
        }

        info!("No Last-Modified found for {url}");
        self.fetch_body(url).await
    }

    /// Fetch the full response body for the content strategy.
    async fn fetch_body(&self, url: &str) -> Result<FetchKind> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WatchError::FetchError(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::FetchStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WatchError::FetchError(format!("{url}: {e}")))?;

        Ok(FetchKind::Body(body))
    }
}

/// Parse a `Last-Modified` header value as an HTTP-date in UTC.
///
/// # Errors
///
/// Returns an error if the value does not match the
/// `"<weekday>, <day> <month> <year> <h>:<m>:<s> GMT"` layout.
pub fn parse_http_date(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, HTTP_DATE_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|e| WatchError::FetchError(format!("Invalid Last-Modified '{raw}': {e}")))
}
