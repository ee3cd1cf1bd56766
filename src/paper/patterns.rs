use regex::Regex;

use super::Section;

/// Ordered section-header rules.
///
/// Rules are tested in declaration order and the first match wins, so a
/// heading that satisfies more than one rule resolves deterministically.
/// In particular a "Summary" heading always opens the abstract, never the
/// conclusion, because the abstract rule is tested first.
pub struct SectionPatterns {
    rules: Vec<(Section, Regex)>,
}

impl SectionPatterns {
    /// Match a line against the header rules, returning the section it opens.
    pub fn match_header(&self, line: &str) -> Option<Section> {
        self.rules
            .iter()
            .find(|(_, pattern)| pattern.is_match(line))
            .map(|(section, _)| *section)
    }
}

impl Default for SectionPatterns {
    fn default() -> Self {
        let rules = [
            (Section::Abstract, r"(?i)^(abstract|summary)"),
            (Section::Introduction, r"(?i)^(introduction|intro)"),
            (
                Section::Methods,
                r"(?i)^(methods|methodology|materials and methods|experimental)",
            ),
            (Section::Results, r"(?i)^(results|findings)"),
            (Section::Discussion, r"(?i)^(discussion|discuss)"),
            (Section::Conclusion, r"(?i)^(conclusion|conclusions|summary)"),
            (Section::References, r"(?i)^(references|bibliography|citations)"),
        ]
        .into_iter()
        .map(|(section, pattern)| {
            (section, Regex::new(pattern).expect("valid header pattern"))
        })
        .collect();

        Self { rules }
    }
}

/// Patterns used by the text cleaning pass.
pub struct CleanPatterns {
    /// Characters outside the word/whitespace/punctuation allow-list.
    pub stray: Regex,
    /// Runs of horizontal whitespace.
    pub spaces: Regex,
    /// Trailing numeric token at the end of a line (page numbers).
    pub trailing_number: Regex,
}

impl Default for CleanPatterns {
    fn default() -> Self {
        Self {
            stray: Regex::new(r"[^\w\s.,;:!?\-()\[\]]+").expect("valid character class"),
            spaces: Regex::new(r"[ \t]+").expect("valid whitespace pattern"),
            trailing_number: Regex::new(r"\s*\b\d+\s*$").expect("valid page number pattern"),
        }
    }
}

/// Patterns used by bibliographic metadata extraction.
pub struct MetadataPatterns {
    /// `doi` followed by an optional colon/whitespace and a token.
    pub doi: Regex,
    /// A four-digit year starting with 19 or 20.
    pub year: Regex,
}

impl Default for MetadataPatterns {
    fn default() -> Self {
        Self {
            doi: Regex::new(r"(?i)doi:?\s*(\S+)").expect("valid doi pattern"),
            year: Regex::new(r"\b(19|20)\d{2}\b").expect("valid year pattern"),
        }
    }
}

/// Patterns used by key-finding extraction.
pub struct FindingPatterns {
    /// Sentence-terminal punctuation.
    pub sentence_end: Regex,
    /// Signal phrases that mark a sentence as a candidate finding.
    pub signal_phrases: Regex,
}

impl Default for FindingPatterns {
    fn default() -> Self {
        Self {
            sentence_end: Regex::new(r"[.!?]+").expect("valid sentence pattern"),
            signal_phrases: Regex::new(
                r"(?i)we found|results show|study demonstrates|analysis reveals|significant|important|key finding|conclusion|implication",
            )
            .expect("valid signal phrase pattern"),
        }
    }
}
