use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;

/// An extractive answer with its confidence score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    pub score: f64,
}

/// Open-domain question answering over a context string.
#[async_trait]
pub trait QaService: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer>;
}

/// QA backed by a hosted extractive question-answering model.
pub struct HttpQaService {
    client: ServiceClient,
    model: String,
}

impl HttpQaService {
    pub fn new(client: ServiceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[async_trait]
impl QaService for HttpQaService {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer> {
        let request = QaRequest {
            inputs: QaInputs { question, context },
        };

        let value = self.client.post_json(&self.model, &request).await?;
        serde_json::from_value(value).context("Unexpected question answering payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answer_payload_ignoring_span_offsets() {
        let value = serde_json::json!({
            "answer": "the Transformer",
            "score": 0.93,
            "start": 42,
            "end": 57
        });
        let answer: QaAnswer = serde_json::from_value(value).unwrap();
        assert_eq!(answer.answer, "the Transformer");
        assert!(answer.score > 0.9);
    }
}
