use async_trait::async_trait;
use serde::Serialize;

use super::ServiceClient;
use crate::Result;

/// Text-to-speech collaborator. Returns encoded audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Speech synthesis backed by hosted TTS models, one per voice language.
pub struct HttpSpeechSynthesizer {
    client: ServiceClient,
    default_model: String,
}

impl HttpSpeechSynthesizer {
    pub fn new(client: ServiceClient, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
        }
    }

    /// Voice model for a language. "en-uk" shares the English model; unknown
    /// languages fall back to the configured default voice.
    fn model_for(&self, language: &str) -> &str {
        match language {
            "fr" => "facebook/mms-tts-fra",
            "hi" => "facebook/mms-tts-hin",
            "es" => "facebook/mms-tts-spa",
            _ => &self.default_model,
        }
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    inputs: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let model = self.model_for(language).to_string();
        tracing::info!("Synthesizing {} characters of speech with {model}", text.len());

        self.client
            .post_json_for_bytes(&model, &SpeechRequest { inputs: text })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServicesConfig;

    fn synthesizer() -> HttpSpeechSynthesizer {
        let client = ServiceClient::new(&ServicesConfig::default()).unwrap();
        HttpSpeechSynthesizer::new(client, "facebook/mms-tts-eng")
    }

    #[test]
    fn voice_models_follow_language() {
        let tts = synthesizer();
        assert_eq!(tts.model_for("fr"), "facebook/mms-tts-fra");
        assert_eq!(tts.model_for("hi"), "facebook/mms-tts-hin");
        assert_eq!(tts.model_for("en"), "facebook/mms-tts-eng");
        assert_eq!(tts.model_for("en-uk"), "facebook/mms-tts-eng");
        assert_eq!(tts.model_for("xx"), "facebook/mms-tts-eng");
    }
}
