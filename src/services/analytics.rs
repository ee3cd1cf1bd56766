use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;

/// Polarity scores for a piece of text. All components are in `[0, 1]`
/// except `compound`, which is `positive - negative` in `[-1, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

/// Keyword extraction and sentiment scoring collaborator.
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    async fn keywords(&self, text: &str, max_keywords: usize) -> Result<Vec<String>>;

    async fn sentiment(&self, text: &str) -> Result<SentimentScores>;
}

/// Text analytics backed by hosted keyword and classification models.
pub struct HttpTextAnalyzer {
    client: ServiceClient,
    keyword_model: String,
    sentiment_model: String,
}

impl HttpTextAnalyzer {
    pub fn new(
        client: ServiceClient,
        keyword_model: impl Into<String>,
        sentiment_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            keyword_model: keyword_model.into(),
            sentiment_model: sentiment_model.into(),
        }
    }
}

#[derive(Serialize)]
struct AnalysisRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct KeywordResponse {
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClassificationLabel {
    label: String,
    score: f64,
}

/// Fold classifier labels into polarity scores. Whatever probability mass
/// the classifier does not assign to positive/negative counts as neutral.
fn scores_from_labels(labels: &[ClassificationLabel]) -> SentimentScores {
    let mut scores = SentimentScores::default();

    for label in labels {
        match label.label.to_lowercase().as_str() {
            "positive" | "pos" => scores.positive = label.score,
            "negative" | "neg" => scores.negative = label.score,
            "neutral" => scores.neutral = label.score,
            _ => {}
        }
    }

    if scores.neutral == 0.0 {
        scores.neutral = (1.0 - scores.positive - scores.negative).max(0.0);
    }
    scores.compound = scores.positive - scores.negative;
    scores
}

#[async_trait]
impl TextAnalyzer for HttpTextAnalyzer {
    async fn keywords(&self, text: &str, max_keywords: usize) -> Result<Vec<String>> {
        let value = self
            .client
            .post_json(&self.keyword_model, &AnalysisRequest { inputs: text })
            .await?;

        let response: KeywordResponse =
            serde_json::from_value(value).context("Unexpected keyword payload")?;

        Ok(response
            .keywords
            .into_iter()
            .take(max_keywords)
            .collect())
    }

    async fn sentiment(&self, text: &str) -> Result<SentimentScores> {
        let value = self
            .client
            .post_json(&self.sentiment_model, &AnalysisRequest { inputs: text })
            .await?;

        // Text classification endpoints return one label list per input.
        let batches: Vec<Vec<ClassificationLabel>> =
            serde_json::from_value(value).context("Unexpected sentiment payload")?;
        let labels = batches.into_iter().next().unwrap_or_default();

        Ok(scores_from_labels(&labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_binary_classifier_labels() {
        let labels = vec![
            ClassificationLabel {
                label: "POSITIVE".to_string(),
                score: 0.9,
            },
            ClassificationLabel {
                label: "NEGATIVE".to_string(),
                score: 0.1,
            },
        ];
        let scores = scores_from_labels(&labels);
        assert_eq!(scores.positive, 0.9);
        assert_eq!(scores.negative, 0.1);
        assert!(scores.neutral.abs() < 1e-9);
        assert!((scores.compound - 0.8).abs() < 1e-9);
    }

    #[test]
    fn unknown_labels_count_as_neutral_mass() {
        let labels = vec![ClassificationLabel {
            label: "POSITIVE".to_string(),
            score: 0.4,
        }];
        let scores = scores_from_labels(&labels);
        assert!((scores.neutral - 0.6).abs() < 1e-9);
    }

    #[test]
    fn parses_keyword_payload() {
        let value = serde_json::json!({ "keywords": ["attention", "transformer", "bleu"] });
        let response: KeywordResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.keywords.len(), 3);
    }
}
