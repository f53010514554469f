//! Scorecard API client
//!
//! Paginated retrieval from the College Scorecard schools endpoint. Pages
//! are fixed at 100 records, 0-based, and fetched strictly sequentially:
//! between pages the client sleeps for a random 0..=N seconds (politeness
//! toward the upstream rate limiter, not a fixed interval). Fetching stops
//! at the first empty page or when the configured page limit is reached.
//!
//! There is deliberately no retry here: any transport, protocol, or decode
//! failure halts the run and is surfaced together with the page index
//! reached and the batches buffered so far.

use crate::adapters::scorecard::models::{FetchFailure, Fields, SchoolsPage};
use crate::config::schema::ScorecardConfig;
use crate::domain::{CompassError, FetchError, RawBatch, Result};
use rand::Rng;
use reqwest::{Client, ClientBuilder};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Fixed page size for the schools endpoint
pub const PER_PAGE: u32 = 100;

/// HTTP client for the College Scorecard API
pub struct ScorecardClient {
    base_url: String,
    http: Client,
    api_key: Secret<crate::config::secret::SecretValue>,
    max_page_delay_secs: u64,
}

impl ScorecardClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ScorecardConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CompassError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
            api_key: config.api_key.clone(),
            max_page_delay_secs: config.max_page_delay_secs,
        })
    }

    /// Base URL of the schools endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all pages for a field set
    ///
    /// Walks pages starting at 0 while the response carries a non-empty
    /// `results` array and, if `page_limit` is given, the page index is
    /// below the limit.
    ///
    /// # Errors
    ///
    /// On the first failure of any kind, returns a [`FetchFailure`] with
    /// the error, the page index reached, and the batches already buffered.
    pub async fn fetch(
        &self,
        fields: &Fields<'_>,
        page_limit: Option<u32>,
    ) -> std::result::Result<Vec<RawBatch>, Box<FetchFailure>> {
        let mut batches: Vec<RawBatch> = Vec::new();
        let mut page: u32 = 0;

        loop {
            if let Some(limit) = page_limit {
                if page >= limit {
                    tracing::info!(page_limit = limit, "Reached configured page limit");
                    break;
                }
            }

            let response = match self.fetch_page(fields, page).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(
                        page = page,
                        pages_buffered = batches.len(),
                        error = %error,
                        "Fetch halted"
                    );
                    return Err(Box::new(FetchFailure {
                        error,
                        page,
                        partial: batches,
                    }));
                }
            };

            if response.is_end_of_data() {
                tracing::debug!(page = page, "Empty results array - end of data");
                break;
            }

            let batch = response.into_batch();
            tracing::debug!(page = page, records = batch.len(), "Fetched page");
            batches.push(batch);
            page += 1;

            self.politeness_delay().await;
        }

        tracing::info!(pages = batches.len(), "Fetch complete");
        Ok(batches)
    }

    /// Fetch a single page
    async fn fetch_page(
        &self,
        fields: &Fields<'_>,
        page: u32,
    ) -> std::result::Result<SchoolsPage, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("fields", fields.to_query_value().as_str()),
                ("api_key", self.api_key.expose_secret().as_ref()),
                ("page", page.to_string().as_str()),
                ("per_page", PER_PAGE.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Protocol {
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        response
            .json::<SchoolsPage>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Sleep for a random 0..=max_page_delay_secs seconds between pages
    async fn politeness_delay(&self) {
        if self.max_page_delay_secs == 0 {
            return;
        }
        // Draw before awaiting so the RNG handle is not held across the
        // suspension point.
        let secs = rand::thread_rng().gen_range(0..=self.max_page_delay_secs);
        if secs > 0 {
            tracing::trace!(delay_secs = secs, "Politeness delay before next page");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn test_config(base_url: &str) -> ScorecardConfig {
        ScorecardConfig {
            base_url: base_url.to_string(),
            api_key: secret_string("test-key".to_string()),
            page_limit: None,
            max_page_delay_secs: 0,
            timeout_seconds: 5,
            data_year: 2023,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ScorecardClient::new(&test_config("http://localhost/schools.json")).unwrap();
        assert_eq!(client.base_url(), "http://localhost/schools.json");
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("short", 200), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "x".repeat(500);
        let truncated = truncate(&long, 200);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
