use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted inference service configuration
    pub services: ServicesConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the inference endpoint
    pub base_url: String,

    /// API token; the SMARTCAST_API_TOKEN environment variable wins when set
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Model used to summarize text chunks
    pub summarization_model: String,

    /// Model used for speech-to-text
    pub transcription_model: String,

    /// Model used for sentiment scoring
    pub sentiment_model: String,

    /// Model used for keyword extraction
    pub keyword_model: String,

    /// Model used for question answering
    pub qa_model: String,

    /// Default voice model for narration
    pub tts_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Temporary directory for downloads
    pub temp_dir: Option<PathBuf>,

    /// Keep downloaded audio files after digesting
    pub keep_audio: bool,

    /// Podcast style used when none is given on the command line
    pub default_style: String,

    /// Default output format
    pub default_output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig::default(),
            app: AppConfig {
                temp_dir: None,
                keep_audio: false,
                default_style: "educational".to_string(),
                default_output_format: "text".to_string(),
            },
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_token: None,
            timeout_secs: 120,
            summarization_model: "facebook/bart-large-cnn".to_string(),
            transcription_model: "openai/whisper-base".to_string(),
            sentiment_model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            keyword_model: "ml6team/keyphrase-extraction-kbir-inspec".to_string(),
            qa_model: "distilbert-base-cased-distilled-squad".to_string(),
            tts_model: "facebook/mms-tts-eng".to_string(),
        }
    }
}

impl ServicesConfig {
    /// Resolve the API token, preferring the environment over the file.
    pub fn api_token(&self) -> Option<String> {
        std::env::var("SMARTCAST_API_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| self.api_token.clone())
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load(override_path: Option<&Path>) -> Result<Self> {
        let config_path = match override_path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(&config_path).await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("smartcast").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        Url::parse(&self.services.base_url)
            .with_context(|| format!("Invalid service base URL: {}", self.services.base_url))?;

        if self.services.summarization_model.is_empty() {
            anyhow::bail!("A summarization model must be configured");
        }

        if self.services.timeout_secs == 0 {
            anyhow::bail!("Service timeout must be at least one second");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Service Base URL: {}", self.services.base_url);
        println!(
            "  API Token: {}",
            if self.services.api_token().is_some() {
                "configured"
            } else {
                "not set"
            }
        );
        println!("  Summarization Model: {}", self.services.summarization_model);
        println!("  Transcription Model: {}", self.services.transcription_model);
        println!("  Keep Audio: {}", self.app.keep_audio);
        println!("  Default Style: {}", self.app.default_style);
        println!("  Default Format: {}", self.app.default_output_format);
    }
}
