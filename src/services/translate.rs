use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;

/// Machine translation collaborator.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate English text into the target language. Unsupported targets
    /// return the text unchanged rather than failing.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Translator backed by hosted en->xx translation models.
pub struct HttpTranslator {
    client: ServiceClient,
}

impl HttpTranslator {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

/// Fixed map of supported target languages to translation models.
fn model_for(target_lang: &str) -> Option<&'static str> {
    match target_lang {
        "hi" => Some("Helsinki-NLP/opus-mt-en-hi"),
        "fr" => Some("Helsinki-NLP/opus-mt-en-fr"),
        "es" => Some("Helsinki-NLP/opus-mt-en-es"),
        _ => None,
    }
}

#[derive(Serialize)]
struct TranslationRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct TranslationResponse {
    translation_text: String,
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let Some(model) = model_for(target_lang) else {
            tracing::warn!("No translation model for '{target_lang}', keeping original text");
            return Ok(text.to_string());
        };

        let value = self
            .client
            .post_json(model, &TranslationRequest { inputs: text })
            .await?;

        let parsed: Vec<TranslationResponse> =
            serde_json::from_value(value).context("Unexpected translation payload")?;

        Ok(parsed
            .into_iter()
            .next()
            .map(|response| response.translation_text)
            .unwrap_or_else(|| text.to_string()))
    }
}
