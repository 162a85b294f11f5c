//! Sentiment analysis API client
//!
//! Thin client for the external text-emotion endpoint used by urgency
//! triage. Reports failures as typed errors and leaves the policy decision
//! (fail-open) to the classifier.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const ANALYSIS_PATH: &str = "/v1/analysis";

/// Bounded request timeout; the classifier treats an elapse as a failure
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Sentiment client errors
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Network communication error (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Sentiment API returned a non-200 status
    #[error("API error {0}")]
    Api(u16),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One emotion label with its score in [0, 1]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

/// Response body of POST /v1/analysis
///
/// An absent full_result decodes as an empty set, matching a response that
/// carries no per-label scores.
#[derive(Debug, Clone, Deserialize)]
struct AnalysisResponse {
    #[serde(default)]
    full_result: Vec<EmotionScore>,
}

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    text: &'a str,
}

/// Client for the sentiment analysis service
#[derive(Debug, Clone)]
pub struct SentimentClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SentimentClient {
    /// Create a client targeting the given host (e.g. `http://localhost:9000`)
    pub fn new(host: &str) -> Result<Self, SentimentError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SentimentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: host.trim_end_matches('/').to_string(),
        })
    }

    /// Analyze text, returning per-label emotion scores
    ///
    /// No internal retry: one request, one answer.
    pub async fn analyze(&self, text: &str) -> Result<Vec<EmotionScore>, SentimentError> {
        let url = format!("{}{}", self.base_url, ANALYSIS_PATH);

        tracing::debug!(url = %url, "Querying sentiment analysis API");

        let response = self
            .http_client
            .post(&url)
            .json(&AnalysisRequest { text })
            .send()
            .await
            .map_err(|e| SentimentError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(SentimentError::Api(status.as_u16()));
        }

        let body: AnalysisResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Parse(e.to_string()))?;

        Ok(body.full_result)
    }
}
