use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smartcast",
    about = "SmartCast Digestor - turn audio, YouTube links, and scientific papers into digests and podcast scripts",
    version,
    long_about = "A CLI assistant that digests spoken and written source material. Audio files, \
                  YouTube links, and transcripts become summaries with keywords and sentiment; \
                  scientific papers (PDF, text, or arXiv) become stylized podcast scripts with \
                  episode metadata. Heavy lifting is delegated to hosted inference services."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to an alternate configuration file
    #[arg(long, global = true, env = "SMARTCAST_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn a scientific paper into a podcast script with episode metadata
    Paper {
        /// Paper input: local PDF or .txt file, arXiv identifier, or arXiv URL
        #[arg(value_name = "PAPER")]
        input: String,

        /// Narrative style: educational, storytelling, interview, or news
        /// (unknown values fall back to educational)
        #[arg(short, long, value_name = "STYLE")]
        style: Option<String>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Digest spoken audio into a transcript, summary, keywords, and sentiment
    Digest {
        /// Audio input: YouTube URL, local audio file, or a .txt transcript
        #[arg(value_name = "URL_OR_FILE")]
        input: String,

        /// Translate the summary into a target language (hi, fr, es)
        #[arg(long, value_name = "LANG")]
        translate_to: Option<String>,

        /// Narrate the summary to an audio file
        #[arg(long)]
        narrate: bool,

        /// Voice language/accent for narration
        #[arg(long, default_value = "en", value_name = "LANG")]
        voice: String,

        /// Keep the downloaded audio file
        #[arg(long)]
        save_audio: bool,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Answer a question against a transcript or any plain-text file
    Ask {
        /// Context file (a saved transcript or any plain text)
        #[arg(value_name = "FILE")]
        context: PathBuf,

        /// The question to ask
        #[arg(value_name = "QUESTION")]
        question: String,
    },

    /// List available podcast narrative styles
    Styles,

    /// Show or create the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON artifact
    Json,
    /// Markdown document
    Markdown,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
