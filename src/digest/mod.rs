use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

use anyhow::Context;

use crate::config::Config;
use crate::media::YoutubeDownloader;
use crate::services::{
    summarize_chunked, HttpSpeechSynthesizer, HttpSummarizer, HttpTextAnalyzer, HttpTranscriber,
    HttpTranslator, SentimentScores, ServiceClient, SpeechSynthesizer, Summarizer, TextAnalyzer,
    Transcriber, Translator,
};
use crate::utils;
use crate::{DigestorError, Result};

/// Transcripts are summarized in slices of this many characters.
const TRANSCRIPT_CHUNK_CHARS: usize = 1000;
const TRANSCRIPT_SUMMARY_MIN_TOKENS: usize = 30;
const TRANSCRIPT_SUMMARY_MAX_TOKENS: usize = 130;

/// Keywords reported per digest.
const MAX_KEYWORDS: usize = 10;

/// A translated rendition of the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedSummary {
    pub language: String,
    pub text: String,
}

/// Everything extracted from one spoken-audio source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestReport {
    pub source: String,
    pub transcript: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub sentiment: SentimentScores,
    pub translated_summary: Option<TranslatedSummary>,
    pub narration_path: Option<PathBuf>,
    pub audio_path: Option<PathBuf>,
    pub generated_at: DateTime<Utc>,
}

/// Options for a digest run.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    /// Translate the summary into this target language
    pub translate_to: Option<String>,

    /// Narrate the summary to an audio file
    pub narrate: bool,

    /// Voice language/accent for narration
    pub voice: String,

    /// Keep the downloaded audio file next to the output
    pub keep_audio: bool,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            translate_to: None,
            narrate: false,
            voice: "en".to_string(),
            keep_audio: false,
        }
    }
}

/// Audio digest pipeline: input -> transcript -> summary -> analytics.
///
/// Owns its working directory; downloaded audio disappears with it unless
/// the caller asked to keep it.
pub struct DigestPipeline {
    youtube: YoutubeDownloader,
    transcriber: Box<dyn Transcriber>,
    summarizer: Box<dyn Summarizer>,
    analyzer: Box<dyn TextAnalyzer>,
    translator: Box<dyn Translator>,
    speech: Box<dyn SpeechSynthesizer>,
    temp_dir: TempDir,
}

impl DigestPipeline {
    /// Create a new digest pipeline
    pub fn new(config: &Config) -> Result<Self> {
        let client = ServiceClient::new(&config.services)?;

        let temp_dir = match &config.app.temp_dir {
            Some(dir) => TempDir::new_in(dir),
            None => TempDir::new(),
        }
        .context("Failed to create temporary directory")?;

        Ok(Self {
            youtube: YoutubeDownloader::new(),
            transcriber: Box::new(HttpTranscriber::new(
                client.clone(),
                config.services.transcription_model.clone(),
            )),
            summarizer: Box::new(HttpSummarizer::new(
                client.clone(),
                config.services.summarization_model.clone(),
            )),
            analyzer: Box::new(HttpTextAnalyzer::new(
                client.clone(),
                config.services.keyword_model.clone(),
                config.services.sentiment_model.clone(),
            )),
            translator: Box::new(HttpTranslator::new(client.clone())),
            speech: Box::new(HttpSpeechSynthesizer::new(
                client,
                config.services.tts_model.clone(),
            )),
            temp_dir,
        })
    }

    /// Digest an audio source: YouTube URL, local audio file, or a
    /// pre-transcribed `.txt` transcript.
    pub async fn digest(&self, input: &str, options: &DigestOptions) -> Result<DigestReport> {
        let (transcript, audio_path) = self.obtain_transcript(input, options).await?;

        if transcript.trim().is_empty() {
            return Err(DigestorError::ExtractionFailed(
                "transcription produced no text".to_string(),
            )
            .into());
        }

        let summary = self.summarize_transcript(&transcript).await;

        tracing::info!("Analyzing summary for keywords and sentiment");
        let keywords = self.analyzer.keywords(&summary, MAX_KEYWORDS).await?;
        let sentiment = self.analyzer.sentiment(&summary).await?;

        let translated_summary = match &options.translate_to {
            Some(language) => {
                tracing::info!("Translating summary into '{language}'");
                let text = self.translator.translate(&summary, language).await?;
                Some(TranslatedSummary {
                    language: language.clone(),
                    text,
                })
            }
            None => None,
        };

        let narration_path = if options.narrate {
            Some(self.narrate(&summary, &options.voice).await?)
        } else {
            None
        };

        Ok(DigestReport {
            source: input.to_string(),
            transcript,
            summary,
            keywords,
            sentiment,
            translated_summary,
            narration_path,
            audio_path,
            generated_at: Utc::now(),
        })
    }

    /// Resolve the input to a transcript, downloading and transcribing as
    /// needed. Returns the preserved audio path when one was requested.
    async fn obtain_transcript(
        &self,
        input: &str,
        options: &DigestOptions,
    ) -> Result<(String, Option<PathBuf>)> {
        if YoutubeDownloader::is_youtube_url(input) {
            let audio_path = self.temp_dir.path().join(format!(
                "audio_{}.mp3",
                &Uuid::new_v4().to_string()[..8]
            ));

            let progress = spinner("Downloading audio with yt-dlp...");
            self.youtube.download_audio(input, &audio_path).await?;
            progress.finish_with_message("Download complete");

            let transcript = self.transcribe_with_progress(&audio_path).await?;
            let kept = if options.keep_audio {
                Some(preserve_audio(&audio_path)?)
            } else {
                None
            };
            return Ok((transcript, kept));
        }

        let path = Path::new(input);
        utils::check_file_accessible(path)?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("txt") => Ok((fs_err::read_to_string(path)?, None)),
            Some("mp3" | "m4a" | "wav" | "flac" | "ogg" | "webm") => {
                let transcript = self.transcribe_with_progress(path).await?;
                Ok((transcript, None))
            }
            _ => Err(DigestorError::UnsupportedSource(format!(
                "expected a YouTube URL, an audio file, or a .txt transcript: {input}"
            ))
            .into()),
        }
    }

    async fn transcribe_with_progress(&self, audio_path: &Path) -> Result<String> {
        let progress = spinner("Transcribing audio...");
        let transcript = self.transcriber.transcribe(audio_path).await?;
        progress.finish_with_message("Transcription complete");
        Ok(transcript)
    }

    /// Summarize the whole transcript with the same chunking policy used for
    /// paper sections: fixed slices, concurrent calls, ordered re-join,
    /// per-chunk truncation fallback.
    async fn summarize_transcript(&self, transcript: &str) -> String {
        let normalized = transcript.split_whitespace().collect::<Vec<_>>().join(" ");

        let progress = spinner("Summarizing transcript...");
        let summary = summarize_chunked(
            self.summarizer.as_ref(),
            &normalized,
            TRANSCRIPT_CHUNK_CHARS,
            TRANSCRIPT_SUMMARY_MIN_TOKENS,
            TRANSCRIPT_SUMMARY_MAX_TOKENS,
        )
        .await;
        progress.finish_with_message("Summary ready");

        summary.trim().to_string()
    }

    /// Narrate the summary into an audio file in the working directory.
    async fn narrate(&self, summary: &str, voice: &str) -> Result<PathBuf> {
        let progress = spinner("Generating narration...");
        let audio = self.speech.synthesize(summary, voice).await?;
        progress.finish_with_message("Narration ready");

        // Hosted TTS endpoints answer with FLAC audio.
        let filename = utils::generate_unique_filename("narration", "flac");
        let output_path = std::env::current_dir()?.join(filename);
        fs_err::write(&output_path, audio)?;

        Ok(output_path)
    }
}

/// Copy a downloaded audio file out of the working directory.
fn preserve_audio(temp_path: &Path) -> Result<PathBuf> {
    let filename = utils::generate_unique_filename("audio", "mp3");
    let output_path = std::env::current_dir()?.join(filename);
    fs_err::copy(temp_path, &output_path)?;
    Ok(output_path)
}

fn spinner(message: &str) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    progress.set_message(message.to_string());
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Write;

    struct PanickingTranscriber;

    #[async_trait]
    impl Transcriber for PanickingTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> Result<String> {
            panic!("transcription must not run for transcript inputs");
        }
    }

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str, _min: usize, _max: usize) -> Result<String> {
            Ok("a concise summary".to_string())
        }
    }

    struct FixedAnalyzer;

    #[async_trait]
    impl TextAnalyzer for FixedAnalyzer {
        async fn keywords(&self, _text: &str, max_keywords: usize) -> Result<Vec<String>> {
            Ok(vec!["alpha".to_string(), "beta".to_string()]
                .into_iter()
                .take(max_keywords)
                .collect())
        }

        async fn sentiment(&self, _text: &str) -> Result<SentimentScores> {
            Ok(SentimentScores {
                positive: 0.7,
                negative: 0.1,
                neutral: 0.2,
                compound: 0.6,
            })
        }
    }

    struct UppercasingTranslator;

    #[async_trait]
    impl Translator for UppercasingTranslator {
        async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct SilentSpeech;

    #[async_trait]
    impl SpeechSynthesizer for SilentSpeech {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>> {
            Ok(vec![0u8; 4])
        }
    }

    fn pipeline() -> DigestPipeline {
        DigestPipeline {
            youtube: YoutubeDownloader::new(),
            transcriber: Box::new(PanickingTranscriber),
            summarizer: Box::new(FixedSummarizer),
            analyzer: Box::new(FixedAnalyzer),
            translator: Box::new(UppercasingTranslator),
            speech: Box::new(SilentSpeech),
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn transcript_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("talk.txt");
        let mut file = fs_err::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn digests_a_transcript_file_without_transcription() {
        let pipeline = pipeline();
        let input = transcript_file(&pipeline.temp_dir, "A short talk about oceans.");

        let report = pipeline
            .digest(input.to_str().unwrap(), &DigestOptions::default())
            .await
            .unwrap();

        assert_eq!(report.transcript, "A short talk about oceans.");
        assert_eq!(report.summary, "a concise summary");
        assert_eq!(report.keywords, vec!["alpha", "beta"]);
        assert!(report.sentiment.compound > 0.0);
        assert!(report.translated_summary.is_none());
        assert!(report.narration_path.is_none());
    }

    #[tokio::test]
    async fn translation_is_applied_when_requested() {
        let pipeline = pipeline();
        let input = transcript_file(&pipeline.temp_dir, "A short talk about oceans.");

        let options = DigestOptions {
            translate_to: Some("fr".to_string()),
            ..Default::default()
        };
        let report = pipeline
            .digest(input.to_str().unwrap(), &options)
            .await
            .unwrap();

        let translated = report.translated_summary.unwrap();
        assert_eq!(translated.language, "fr");
        assert_eq!(translated.text, "A CONCISE SUMMARY");
    }

    #[tokio::test]
    async fn empty_transcripts_are_an_extraction_error() {
        let pipeline = pipeline();
        let input = transcript_file(&pipeline.temp_dir, "   \n  ");

        let err = pipeline
            .digest(input.to_str().unwrap(), &DigestOptions::default())
            .await
            .unwrap_err();
        let digestor = err.downcast_ref::<DigestorError>().expect("typed error");
        assert!(matches!(digestor, DigestorError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn unsupported_extensions_are_rejected() {
        let pipeline = pipeline();
        let path = pipeline.temp_dir.path().join("slides.ppt");
        fs_err::write(&path, b"not audio").unwrap();

        let err = pipeline
            .digest(path.to_str().unwrap(), &DigestOptions::default())
            .await
            .unwrap_err();
        let digestor = err.downcast_ref::<DigestorError>().expect("typed error");
        assert!(matches!(digestor, DigestorError::UnsupportedSource(_)));
    }
}
