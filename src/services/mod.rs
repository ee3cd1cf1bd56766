use anyhow::Context;
use serde::Serialize;

pub mod analytics;
pub mod qa;
pub mod speech;
pub mod summarize;
pub mod transcribe;
pub mod translate;

pub use analytics::{HttpTextAnalyzer, SentimentScores, TextAnalyzer};
pub use qa::{HttpQaService, QaAnswer, QaService};
pub use speech::{HttpSpeechSynthesizer, SpeechSynthesizer};
pub use summarize::{summarize_chunked, HttpSummarizer, Summarizer};
pub use transcribe::{HttpTranscriber, Transcriber};
pub use translate::{HttpTranslator, Translator};

use crate::config::ServicesConfig;
use crate::{DigestorError, Result};

/// Shared HTTP client for the hosted inference endpoints.
///
/// Every collaborator speaks the same convention: POST to
/// `<base_url>/models/<model>`, optional bearer auth, JSON or raw-byte
/// payloads. Non-success statuses map to [`DigestorError::ServiceFailed`].
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl ServiceClient {
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token(),
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        model: &str,
    ) -> Result<reqwest::Response> {
        let request = match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {model} failed"))?;

        if !response.status().is_success() {
            return Err(DigestorError::ServiceFailed(format!(
                "{model} returned HTTP {}",
                response.status()
            ))
            .into());
        }

        Ok(response)
    }

    /// POST a JSON body, expecting a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<serde_json::Value> {
        let request = self.http.post(self.model_url(model)).json(body);
        let response = self.send(request, model).await?;

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {model}"))
    }

    /// POST raw bytes (audio uploads), expecting a JSON response.
    pub(crate) async fn post_binary(
        &self,
        model: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<serde_json::Value> {
        let request = self
            .http
            .post(self.model_url(model))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(payload);
        let response = self.send(request, model).await?;

        response
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {model}"))
    }

    /// POST a JSON body, expecting raw bytes back (audio payloads).
    pub(crate) async fn post_json_for_bytes<B: Serialize + ?Sized>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<Vec<u8>> {
        let request = self.http.post(self.model_url(model)).json(body);
        let response = self.send(request, model).await?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {model}"))?;

        Ok(bytes.to_vec())
    }
}
