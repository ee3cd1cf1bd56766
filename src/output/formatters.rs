use anyhow::Context;
use serde::Serialize;

use crate::digest::DigestReport;
use crate::podcast::PodcastEpisode;
use crate::utils::format_duration;
use crate::Result;

/// Artifacts that can be rendered for export or console display.
pub trait Renderable: Serialize {
    fn to_text(&self) -> String;

    fn to_markdown(&self) -> String;

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize artifact")
    }
}

impl Renderable for PodcastEpisode {
    fn to_text(&self) -> String {
        let meta = &self.metadata;
        let mut out = String::new();

        out.push_str(&format!("{}\n", meta.episode_title));
        out.push_str(&format!(
            "Style: {} | Words: {} | Estimated length: {}\n\n",
            self.script.style,
            meta.word_count,
            format_duration(meta.duration_minutes * 60)
        ));
        out.push_str(&self.script.body);
        out.push('\n');

        out
    }

    fn to_markdown(&self) -> String {
        let meta = &self.metadata;
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", meta.episode_title));
        out.push_str(&format!("> {}\n\n", meta.description));
        out.push_str(&format!(
            "*Style: {} | {} words | about {}*\n\n",
            self.script.style,
            meta.word_count,
            format_duration(meta.duration_minutes * 60)
        ));

        if let Some(title) = &meta.paper_title {
            out.push_str(&format!("**Paper:** {title}"));
            if let Some(year) = &meta.paper_year {
                out.push_str(&format!(" ({year})"));
            }
            if let Some(doi) = &meta.paper_doi {
                out.push_str(&format!(" | doi:{doi}"));
            }
            out.push_str("\n\n");
        }

        out.push_str("## Script\n\n");
        out.push_str(&self.script.body);
        out.push('\n');

        out
    }
}

impl Renderable for DigestReport {
    fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Source: {}\n", self.source));
        out.push_str(&format!("Generated: {}\n\n", self.generated_at.to_rfc3339()));

        out.push_str("Transcript:\n");
        out.push_str(&self.transcript);
        out.push_str("\n\nSummary:\n");
        out.push_str(&self.summary);
        out.push('\n');

        if !self.keywords.is_empty() {
            out.push_str(&format!("\nKeywords: {}\n", self.keywords.join(", ")));
        }

        out.push_str(&format!(
            "Sentiment: compound {:.2} (pos {:.2} / neu {:.2} / neg {:.2})\n",
            self.sentiment.compound,
            self.sentiment.positive,
            self.sentiment.neutral,
            self.sentiment.negative
        ));

        if let Some(translated) = &self.translated_summary {
            out.push_str(&format!(
                "\nSummary ({}):\n{}\n",
                translated.language, translated.text
            ));
        }

        if let Some(path) = &self.narration_path {
            out.push_str(&format!("\nNarration saved to: {}\n", path.display()));
        }

        if let Some(path) = &self.audio_path {
            out.push_str(&format!("Audio saved to: {}\n", path.display()));
        }

        out
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str("# Listening Digest\n\n");
        out.push_str(&format!(
            "*Source: {} | generated {}*\n\n",
            self.source,
            self.generated_at.to_rfc3339()
        ));

        out.push_str("## Summary\n\n");
        out.push_str(&self.summary);
        out.push_str("\n\n");

        if !self.keywords.is_empty() {
            out.push_str("## Keywords\n\n");
            out.push_str(&self.keywords.join(", "));
            out.push_str("\n\n");
        }

        out.push_str("## Sentiment\n\n");
        out.push_str(&format!(
            "compound {:.2}, positive {:.2}, neutral {:.2}, negative {:.2}\n\n",
            self.sentiment.compound,
            self.sentiment.positive,
            self.sentiment.neutral,
            self.sentiment.negative
        ));

        if let Some(translated) = &self.translated_summary {
            out.push_str(&format!("## Summary ({})\n\n", translated.language));
            out.push_str(&translated.text);
            out.push_str("\n\n");
        }

        out.push_str("## Transcript\n\n");
        out.push_str(&self.transcript);
        out.push('\n');

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::{EpisodeMetadata, PodcastScript, PodcastStyle};
    use crate::services::SentimentScores;
    use chrono::Utc;

    fn episode() -> PodcastEpisode {
        PodcastEpisode {
            script: PodcastScript {
                body: "Welcome to the show.".to_string(),
                style: PodcastStyle::Educational,
            },
            metadata: EpisodeMetadata {
                episode_title: "Breaking Down: Deep Oceans".to_string(),
                duration_minutes: 4,
                word_count: 600,
                description: "A dive into the deep.".to_string(),
                paper_title: Some("Deep Oceans".to_string()),
                paper_year: Some("2019".to_string()),
                paper_doi: None,
            },
        }
    }

    fn report() -> DigestReport {
        DigestReport {
            source: "talk.mp3".to_string(),
            transcript: "hello there".to_string(),
            summary: "a greeting".to_string(),
            keywords: vec!["greeting".to_string()],
            sentiment: SentimentScores {
                positive: 0.8,
                negative: 0.0,
                neutral: 0.2,
                compound: 0.8,
            },
            translated_summary: None,
            narration_path: None,
            audio_path: None,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn episode_text_includes_title_and_body() {
        let text = episode().to_text();
        assert!(text.contains("Breaking Down: Deep Oceans"));
        assert!(text.contains("Welcome to the show."));
        assert!(text.contains("4m 0s"));
    }

    #[test]
    fn episode_markdown_skips_absent_doi() {
        let markdown = episode().to_markdown();
        assert!(markdown.contains("**Paper:** Deep Oceans (2019)"));
        assert!(!markdown.contains("doi:"));
    }

    #[test]
    fn episode_json_round_trips() {
        let json = episode().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["word_count"], 600);
        assert_eq!(value["script"]["style"], "educational");
    }

    #[test]
    fn report_text_skips_optional_sections() {
        let text = report().to_text();
        assert!(text.contains("Keywords: greeting"));
        assert!(!text.contains("Narration saved"));
        assert!(!text.contains("Summary (fr)"));
    }

    #[test]
    fn report_markdown_has_section_headers() {
        let markdown = report().to_markdown();
        assert!(markdown.contains("## Summary"));
        assert!(markdown.contains("## Transcript"));
        assert!(markdown.contains("compound 0.80"));
    }
}
