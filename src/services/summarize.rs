use anyhow::Context;
use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::utils::{chunk_by_chars, leading_sentences};
use crate::{DigestorError, Result};

/// Abstractive summarization collaborator.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Compress `text` into a summary within the given token bounds.
    async fn summarize(&self, text: &str, min_tokens: usize, max_tokens: usize)
        -> Result<String>;
}

/// Summarizer backed by a hosted seq2seq summarization model.
pub struct HttpSummarizer {
    client: ServiceClient,
    model: String,
}

impl HttpSummarizer {
    pub fn new(client: ServiceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Serialize)]
struct SummarizationParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummarizationResponse {
    summary_text: String,
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(
        &self,
        text: &str,
        min_tokens: usize,
        max_tokens: usize,
    ) -> Result<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                min_length: min_tokens,
                max_length: max_tokens,
                do_sample: false,
            },
        };

        let value = self.client.post_json(&self.model, &request).await?;
        let parsed: Vec<SummarizationResponse> =
            serde_json::from_value(value).context("Unexpected summarization payload")?;

        parsed
            .into_iter()
            .next()
            .map(|response| response.summary_text.trim().to_string())
            .ok_or_else(|| {
                DigestorError::ServiceFailed("empty summarization response".to_string()).into()
            })
    }
}

/// Summarize long text chunk by chunk.
///
/// Chunks are submitted concurrently and re-joined with single spaces in
/// chunk order regardless of completion order. A chunk whose call fails
/// degrades to its three leading sentences, so a transient service error
/// shortens the output instead of aborting it.
pub async fn summarize_chunked(
    summarizer: &dyn Summarizer,
    text: &str,
    chunk_chars: usize,
    min_tokens: usize,
    max_tokens: usize,
) -> String {
    let chunks = chunk_by_chars(text, chunk_chars);
    let jobs = chunks.iter().map(|chunk| async move {
        match summarizer.summarize(chunk, min_tokens, max_tokens).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!("Chunk summarization failed, keeping leading sentences: {err}");
                leading_sentences(chunk, 3)
            }
        }
    });

    join_all(jobs).await.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) struct PrefixSummarizer;

    #[async_trait]
    impl Summarizer for PrefixSummarizer {
        async fn summarize(&self, text: &str, _min: usize, _max: usize) -> Result<String> {
            Ok(text.chars().take(3).collect())
        }
    }

    pub(crate) struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str, _min: usize, _max: usize) -> Result<String> {
            Err(DigestorError::ServiceFailed("boom".to_string()).into())
        }
    }

    #[test]
    fn parses_summarization_payload() {
        let value = serde_json::json!([{ "summary_text": " A short summary. " }]);
        let parsed: Vec<SummarizationResponse> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed[0].summary_text.trim(), "A short summary.");
    }

    #[test]
    fn chunk_results_keep_chunk_order() {
        let text = format!("{}{}", "a".repeat(10), "b".repeat(10));
        let summary =
            tokio_test::block_on(summarize_chunked(&PrefixSummarizer, &text, 10, 30, 150));
        assert_eq!(summary, "aaa bbb");
    }

    #[test]
    fn failed_chunks_fall_back_to_leading_sentences() {
        let text = "First sentence here. Second one follows. Third closes. Fourth is dropped.";
        let summary =
            tokio_test::block_on(summarize_chunked(&FailingSummarizer, text, 1000, 30, 150));
        assert_eq!(
            summary,
            "First sentence here. Second one follows. Third closes."
        );
    }
}
