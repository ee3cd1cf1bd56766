use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod findings;
pub mod patterns;

use crate::{DigestorError, Result};
use patterns::{CleanPatterns, FindingPatterns, MetadataPatterns, SectionPatterns};

/// Structural regions of a scientific paper.
///
/// Declaration order is the canonical section order. `Title` is never
/// produced by segmentation - it exists as a map key and is filled by the
/// separate metadata step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Title,
    Abstract,
    Introduction,
    Methods,
    Results,
    Discussion,
    Conclusion,
    References,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Title,
        Section::Abstract,
        Section::Introduction,
        Section::Methods,
        Section::Results,
        Section::Discussion,
        Section::Conclusion,
        Section::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Title => "title",
            Section::Abstract => "abstract",
            Section::Introduction => "introduction",
            Section::Methods => "methods",
            Section::Results => "results",
            Section::Discussion => "discussion",
            Section::Conclusion => "conclusion",
            Section::References => "references",
        }
    }
}

/// Ordered mapping from the closed section set to accumulated content.
///
/// Every key is always present; sections that never received content hold
/// an empty string. A line belongs to at most one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap {
    inner: BTreeMap<Section, String>,
}

impl SectionMap {
    pub fn new() -> Self {
        let mut inner = BTreeMap::new();
        for section in Section::ALL {
            inner.insert(section, String::new());
        }
        Self { inner }
    }

    pub fn get(&self, section: Section) -> &str {
        self.inner
            .get(&section)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_blank(&self, section: Section) -> bool {
        self.get(section).trim().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        self.inner.iter().map(|(section, content)| (*section, content.as_str()))
    }

    pub(crate) fn set(&mut self, section: Section, content: impl Into<String>) {
        self.inner.insert(section, content.into());
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Bibliographic metadata recovered heuristically from the document text.
///
/// Every field is best-effort; absence is a valid state, not an error.
/// `authors` and `journal` exist in the schema but are never populated by
/// the current heuristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub year: Option<String>,
    pub doi: Option<String>,
}

/// The structured representation of a paper: the sole artifact handed from
/// the structuring engine to the podcast synthesizer. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredPaper {
    pub full_text: String,
    pub sections: SectionMap,
    pub metadata: PaperMetadata,
    pub findings: Vec<String>,
}

/// Converts raw extracted document text into a [`StructuredPaper`].
///
/// The engine holds only compiled patterns; there is no per-document state,
/// so one instance can structure any number of documents.
pub struct StructuringEngine {
    clean: CleanPatterns,
    sections: SectionPatterns,
    metadata: MetadataPatterns,
    findings: FindingPatterns,
}

impl StructuringEngine {
    pub fn new() -> Self {
        Self {
            clean: CleanPatterns::default(),
            sections: SectionPatterns::default(),
            metadata: MetadataPatterns::default(),
            findings: FindingPatterns::default(),
        }
    }

    /// Build a structured paper from raw document text.
    ///
    /// Fails when the document has no extractable text after cleaning, so
    /// downstream consumers never see an all-empty record.
    pub fn build(&self, document_text: &str) -> Result<StructuredPaper> {
        let cleaned = self.clean(document_text);
        if cleaned.trim().is_empty() {
            return Err(DigestorError::ExtractionFailed(
                "document contains no extractable text".to_string(),
            )
            .into());
        }

        let sections = self.segment(&cleaned);
        let metadata = self.extract_metadata(&cleaned);
        let findings = self.extract_findings(&cleaned);

        tracing::debug!(
            populated_sections = sections.iter().filter(|(_, c)| !c.trim().is_empty()).count(),
            findings = findings.len(),
            has_title = metadata.title.is_some(),
            "structured document"
        );

        Ok(StructuredPaper {
            full_text: cleaned,
            sections,
            metadata,
            findings,
        })
    }

    /// Normalize extracted text while preserving line structure.
    ///
    /// Per line: strips characters outside the word/whitespace/punctuation
    /// allow-list, collapses horizontal whitespace runs, and removes trailing
    /// numeric tokens (page numbers) until none remain. Idempotent; empty
    /// input yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        let lines: Vec<String> = text
            .lines()
            .map(|line| {
                let line = self.clean.stray.replace_all(line, " ");
                let line = self.clean.spaces.replace_all(&line, " ");
                let mut line = line.trim().to_string();
                while self.clean.trailing_number.is_match(&line) {
                    line = self
                        .clean
                        .trailing_number
                        .replace(&line, "")
                        .trim_end()
                        .to_string();
                }
                line
            })
            .collect();

        lines.join("\n")
    }

    /// Assign non-empty lines to sections in a single forward pass.
    ///
    /// A line matching a header rule flushes the currently open section and
    /// opens a new one; other lines accumulate under the open section. Lines
    /// seen before the first recognized header are dropped. Every key of the
    /// closed section set is present in the result.
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut map = SectionMap::new();
        let mut current: Option<Section> = None;
        let mut content: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(section) = self.sections.match_header(line) {
                if let Some(open) = current {
                    if !content.is_empty() {
                        map.set(open, content.join("\n"));
                    }
                }
                current = Some(section);
                content.clear();
            } else if current.is_some() {
                content.push(line);
            }
        }

        if let Some(open) = current {
            if !content.is_empty() {
                map.set(open, content.join("\n"));
            }
        }

        map
    }

    /// Recover bibliographic metadata, best-effort.
    ///
    /// The title is the first of the leading ten lines with a plausible
    /// length that is not entirely upper-case. The first DOI-shaped token
    /// and the first 19xx/20xx year in document order win; a year cited in
    /// the reference list can therefore shadow the publication year.
    pub fn extract_metadata(&self, text: &str) -> PaperMetadata {
        let mut metadata = PaperMetadata::default();

        for line in text.lines().take(10) {
            let line = line.trim();
            let length = line.chars().count();
            if length > 10 && length < 200 && !is_all_uppercase(line) {
                metadata.title = Some(line.to_string());
                break;
            }
        }

        if let Some(captures) = self.metadata.doi.captures(text) {
            metadata.doi = Some(captures[1].to_string());
        }

        if let Some(year) = self.metadata.year.find(text) {
            metadata.year = Some(year.as_str().to_string());
        }

        metadata
    }

    /// Extract up to ten key-finding sentences in source order.
    pub fn extract_findings(&self, text: &str) -> Vec<String> {
        findings::extract_findings(&self.findings, text)
    }
}

impl Default for StructuringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the line has alphabetic content and none of it is lower-case.
fn is_all_uppercase(line: &str) -> bool {
    let mut has_alpha = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_alphabetic() {
            has_alpha = true;
        }
    }
    has_alpha
}
