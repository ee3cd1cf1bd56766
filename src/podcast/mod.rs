use serde::{Deserialize, Serialize};

pub mod templates;

use crate::paper::{Section, StructuredPaper};
use crate::services::{summarize_chunked, Summarizer};
use crate::{DigestorError, Result};

pub use templates::ScriptInputs;

/// Sections shorter than this are narrated as-is, without a summarization
/// round-trip.
const CONDENSE_THRESHOLD_CHARS: usize = 200;

/// Sections are summarized in fixed slices of this many characters. The
/// slicing is not sentence-aware; a chunk may split mid-sentence.
const CHUNK_CHARS: usize = 800;

const SUMMARY_MIN_TOKENS: usize = 30;
const SUMMARY_MAX_TOKENS: usize = 150;

/// Average narration rate used for the duration estimate.
const WORDS_PER_MINUTE: usize = 150;

/// Every episode is billed as at least this long.
const MIN_DURATION_MINUTES: u64 = 3;

const FALLBACK_EPISODE_TITLE: &str = "Scientific Paper Analysis";
const FALLBACK_DESCRIPTION: &str = "A detailed analysis of a scientific research paper, \
     breaking down complex concepts into understandable insights.";

/// Narrative framing for a generated episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodcastStyle {
    Educational,
    Storytelling,
    Interview,
    News,
}

impl PodcastStyle {
    pub const ALL: [PodcastStyle; 4] = [
        PodcastStyle::Educational,
        PodcastStyle::Storytelling,
        PodcastStyle::Interview,
        PodcastStyle::News,
    ];

    /// Parse a style selector. Unknown values fall back to educational.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "storytelling" => PodcastStyle::Storytelling,
            "interview" => PodcastStyle::Interview,
            "news" => PodcastStyle::News,
            _ => PodcastStyle::Educational,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PodcastStyle::Educational => "educational",
            PodcastStyle::Storytelling => "storytelling",
            PodcastStyle::Interview => "interview",
            PodcastStyle::News => "news",
        }
    }

    /// One-line description for the style listing.
    pub fn blurb(&self) -> &'static str {
        match self {
            PodcastStyle::Educational => "clear walkthrough of the study, classroom tone",
            PodcastStyle::Storytelling => "the research retold as a detective story",
            PodcastStyle::Interview => "mock interview with the paper itself",
            PodcastStyle::News => "breaking-news bulletin framing",
        }
    }
}

impl std::fmt::Display for PodcastStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendered narration script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastScript {
    pub body: String,
    pub style: PodcastStyle,
}

/// Episode metadata derived from the script and the paper's bibliographic
/// record. `paper_*` fields copy the extraction output verbatim, absent
/// values included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeMetadata {
    pub episode_title: String,
    pub duration_minutes: u64,
    pub word_count: usize,
    pub description: String,
    pub paper_title: Option<String>,
    pub paper_year: Option<String>,
    pub paper_doi: Option<String>,
}

/// A complete episode: script plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastEpisode {
    pub script: PodcastScript,
    pub metadata: EpisodeMetadata,
}

/// Turns a [`StructuredPaper`] into a narrated episode.
///
/// Stateless between calls: each (paper, style) pair is synthesized
/// independently, so the same inputs produce the same script modulo
/// whatever variation the summarization service introduces.
pub struct PodcastSynthesizer {
    summarizer: Box<dyn Summarizer>,
}

impl PodcastSynthesizer {
    pub fn new(summarizer: Box<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Create an episode from a structured paper.
    ///
    /// Unknown style selectors fall back to the educational framing rather
    /// than failing; a paper with no content at all is unrecoverable.
    pub async fn create_podcast(
        &self,
        paper: &StructuredPaper,
        style: &str,
    ) -> Result<PodcastEpisode> {
        if paper.full_text.trim().is_empty() {
            return Err(DigestorError::SynthesisFailed(
                "structured paper has no content".to_string(),
            )
            .into());
        }

        let style = PodcastStyle::parse(style);
        tracing::info!("Synthesizing {style} episode");

        let inputs = self.prepare_inputs(paper).await;
        let body = templates::render(&inputs, style);
        let metadata =
            derive_episode_metadata(paper, &body, inputs.abstract_summary.as_deref());

        Ok(PodcastEpisode {
            script: PodcastScript { body, style },
            metadata,
        })
    }

    async fn prepare_inputs(&self, paper: &StructuredPaper) -> ScriptInputs {
        ScriptInputs {
            title: paper.metadata.title.clone(),
            year: paper.metadata.year.clone(),
            abstract_summary: self.condense_section(paper, Section::Abstract).await,
            introduction_summary: self.condense_section(paper, Section::Introduction).await,
            methods_summary: self.condense_section(paper, Section::Methods).await,
            results_summary: self.condense_section(paper, Section::Results).await,
            discussion_summary: self.condense_section(paper, Section::Discussion).await,
            findings: paper
                .findings
                .iter()
                .take(templates::MAX_RENDERED_FINDINGS)
                .cloned()
                .collect(),
        }
    }

    async fn condense_section(
        &self,
        paper: &StructuredPaper,
        section: Section,
    ) -> Option<String> {
        if paper.sections.is_blank(section) {
            return None;
        }
        Some(self.condense(paper.sections.get(section)).await)
    }

    /// Compress a section of text through the summarization service.
    ///
    /// Texts under the threshold pass through unchanged (modulo whitespace
    /// normalization). Longer texts are sliced into fixed chunks; chunks are
    /// summarized concurrently and re-joined in chunk order. A failed chunk
    /// degrades to its leading sentences instead of aborting the script.
    pub async fn condense(&self, text: &str) -> String {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.chars().count() < CONDENSE_THRESHOLD_CHARS {
            return text;
        }

        summarize_chunked(
            self.summarizer.as_ref(),
            &text,
            CHUNK_CHARS,
            SUMMARY_MIN_TOKENS,
            SUMMARY_MAX_TOKENS,
        )
        .await
    }
}

/// Derive episode metadata from the rendered script and the paper record.
///
/// The duration models a 150-words-per-minute narration with a three-minute
/// floor. The description reuses the condensed abstract when one exists.
pub fn derive_episode_metadata(
    paper: &StructuredPaper,
    script_body: &str,
    abstract_summary: Option<&str>,
) -> EpisodeMetadata {
    let word_count = script_body.split_whitespace().count();
    let duration_minutes = MIN_DURATION_MINUTES.max((word_count / WORDS_PER_MINUTE) as u64);

    let episode_title = match paper.metadata.title.as_deref() {
        Some(title) if !title.trim().is_empty() => format!("Breaking Down: {title}"),
        _ => FALLBACK_EPISODE_TITLE.to_string(),
    };

    let description = match abstract_summary {
        Some(summary) if !summary.trim().is_empty() => summary.to_string(),
        _ => FALLBACK_DESCRIPTION.to_string(),
    };

    EpisodeMetadata {
        episode_title,
        duration_minutes,
        word_count,
        description,
        paper_title: paper.metadata.title.clone(),
        paper_year: paper.metadata.year.clone(),
        paper_doi: paper.metadata.doi.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::{PaperMetadata, SectionMap};
    use async_trait::async_trait;

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str, _min: usize, _max: usize) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str, _min: usize, _max: usize) -> Result<String> {
            Err(DigestorError::ServiceFailed("transient".to_string()).into())
        }
    }

    fn paper_with(section: Section, content: &str) -> StructuredPaper {
        let mut sections = SectionMap::new();
        sections.set(section, content);
        StructuredPaper {
            full_text: content.to_string(),
            sections,
            metadata: PaperMetadata {
                title: Some("A Paper".to_string()),
                ..Default::default()
            },
            findings: Vec::new(),
        }
    }

    fn synthesizer(summarizer: impl Summarizer + 'static) -> PodcastSynthesizer {
        PodcastSynthesizer::new(Box::new(summarizer))
    }

    #[test]
    fn style_parsing_falls_back_to_educational() {
        assert_eq!(PodcastStyle::parse("news"), PodcastStyle::News);
        assert_eq!(PodcastStyle::parse("Interview"), PodcastStyle::Interview);
        assert_eq!(PodcastStyle::parse("unknown_style"), PodcastStyle::Educational);
        assert_eq!(PodcastStyle::parse(""), PodcastStyle::Educational);
    }

    #[tokio::test]
    async fn short_sections_pass_through_condense_unchanged() {
        let text = "x".repeat(150);
        let synth = synthesizer(FailingSummarizer);
        assert_eq!(synth.condense(&text).await, text);
    }

    #[tokio::test]
    async fn long_sections_are_summarized_per_chunk() {
        let text = "word ".repeat(400); // ~2000 chars, three chunks
        let synth = synthesizer(FixedSummarizer("SUM"));
        assert_eq!(synth.condense(&text).await, "SUM SUM SUM");
    }

    #[tokio::test]
    async fn chunk_failures_degrade_to_leading_sentences() {
        let sentence = "This sentence pads the section well past the threshold. ";
        let text = sentence.repeat(10);
        let synth = synthesizer(FailingSummarizer);
        let condensed = synth.condense(&text).await;
        assert!(condensed.contains("This sentence pads the section"));
    }

    #[tokio::test]
    async fn unknown_style_renders_the_educational_template() {
        let paper = paper_with(Section::Abstract, "A tiny abstract.");
        let episode = synthesizer(FixedSummarizer("SUM"))
            .create_podcast(&paper, "unknown_style")
            .await
            .unwrap();
        assert_eq!(episode.script.style, PodcastStyle::Educational);
        assert!(episode.script.body.contains("Science Explained"));
    }

    #[tokio::test]
    async fn only_populated_sections_reach_the_script() {
        let paper = paper_with(Section::Abstract, "Only an abstract here.");
        let episode = synthesizer(FixedSummarizer("SUM"))
            .create_podcast(&paper, "educational")
            .await
            .unwrap();
        assert!(episode.script.body.contains("set out to discover"));
        assert!(!episode.script.body.contains("how did they go about"));
        assert!(!episode.script.body.contains("The results tell us"));
    }

    #[tokio::test]
    async fn conclusion_is_extracted_but_not_rendered() {
        let mut paper = paper_with(Section::Abstract, "An abstract.");
        paper
            .sections
            .set(Section::Conclusion, "UNSPOKEN-CONCLUSION-TEXT");
        let episode = synthesizer(FixedSummarizer("SUM"))
            .create_podcast(&paper, "educational")
            .await
            .unwrap();
        assert!(!episode.script.body.contains("UNSPOKEN-CONCLUSION-TEXT"));
        assert_eq!(paper.sections.get(Section::Conclusion), "UNSPOKEN-CONCLUSION-TEXT");
    }

    #[tokio::test]
    async fn synthesis_fails_on_an_empty_paper() {
        let paper = StructuredPaper {
            full_text: "  ".to_string(),
            sections: SectionMap::new(),
            metadata: PaperMetadata::default(),
            findings: Vec::new(),
        };
        let err = synthesizer(FixedSummarizer("SUM"))
            .create_podcast(&paper, "educational")
            .await
            .unwrap_err();
        let digestor = err.downcast_ref::<DigestorError>().expect("typed error");
        assert!(matches!(digestor, DigestorError::SynthesisFailed(_)));
    }

    #[test]
    fn duration_has_a_three_minute_floor() {
        let paper = paper_with(Section::Abstract, "abstract");

        let one_word = derive_episode_metadata(&paper, "word", None);
        assert_eq!(one_word.word_count, 1);
        assert_eq!(one_word.duration_minutes, 3);

        let script = "word ".repeat(450);
        let metadata = derive_episode_metadata(&paper, &script, None);
        assert_eq!(metadata.word_count, 450);
        assert_eq!(metadata.duration_minutes, 3);

        let script = "word ".repeat(900);
        let metadata = derive_episode_metadata(&paper, &script, None);
        assert_eq!(metadata.duration_minutes, 6);
    }

    #[test]
    fn episode_title_and_description_fall_back_when_absent() {
        let mut paper = paper_with(Section::Abstract, "abstract");
        paper.metadata.title = None;

        let metadata = derive_episode_metadata(&paper, "some script body", None);
        assert_eq!(metadata.episode_title, FALLBACK_EPISODE_TITLE);
        assert_eq!(metadata.description, FALLBACK_DESCRIPTION);
        assert!(metadata.paper_title.is_none());

        paper.metadata.title = Some("Deep Oceans".to_string());
        let metadata = derive_episode_metadata(&paper, "body", Some("An abstract summary."));
        assert_eq!(metadata.episode_title, "Breaking Down: Deep Oceans");
        assert_eq!(metadata.description, "An abstract summary.");
        assert_eq!(metadata.paper_title.as_deref(), Some("Deep Oceans"));
    }
}
