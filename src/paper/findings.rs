use super::patterns::FindingPatterns;

/// Maximum number of findings kept, in source order.
pub const MAX_FINDINGS: usize = 10;

/// Sentences shorter than this are never considered findings.
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Pull candidate key-finding sentences out of cleaned text.
///
/// The text is split on sentence-terminal punctuation; a sentence qualifies
/// as soon as it contains one signal phrase. The first ten qualifying
/// sentences win, ties resolved by document order - there is no scoring.
pub fn extract_findings(patterns: &FindingPatterns, text: &str) -> Vec<String> {
    let mut findings = Vec::new();

    for sentence in patterns.sentence_end.split(text) {
        let sentence = sentence.trim();
        if sentence.chars().count() < MIN_SENTENCE_CHARS {
            continue;
        }

        if patterns.signal_phrases.is_match(sentence) {
            findings.push(sentence.split_whitespace().collect::<Vec<_>>().join(" "));
            if findings.len() == MAX_FINDINGS {
                break;
            }
        }
    }

    findings
}
