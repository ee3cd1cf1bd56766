use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::ServiceClient;
use crate::Result;

/// Speech-to-text collaborator.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Transcriber backed by a hosted speech recognition model. The audio file
/// is uploaded whole; long recordings are the service's problem, not ours.
pub struct HttpTranscriber {
    client: ServiceClient,
    model: String,
}

impl HttpTranscriber {
    pub fn new(client: ServiceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// MIME type for an audio file, by extension.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("m4a") | Some("aac") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        tracing::info!("Transcribing audio file: {}", audio_path.display());

        let payload = fs_err::read(audio_path)?;
        let value = self
            .client
            .post_binary(&self.model, payload, content_type_for(audio_path))
            .await?;

        let response: TranscriptionResponse =
            serde_json::from_value(value).context("Unexpected transcription payload")?;

        Ok(response.text.trim().to_string())
    }
}
