use super::PodcastStyle;

/// Number of findings read out on air.
pub const MAX_RENDERED_FINDINGS: usize = 5;

/// Shared inputs for every style template.
///
/// Summaries are `None` when the corresponding paper section was empty, and
/// the block that would voice them is skipped. The conclusion section is
/// deliberately absent: it is extracted for callers but no template reads it.
#[derive(Debug, Clone, Default)]
pub struct ScriptInputs {
    pub title: Option<String>,
    pub year: Option<String>,
    pub abstract_summary: Option<String>,
    pub introduction_summary: Option<String>,
    pub methods_summary: Option<String>,
    pub results_summary: Option<String>,
    pub discussion_summary: Option<String>,
    pub findings: Vec<String>,
}

impl ScriptInputs {
    fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("this research paper")
    }

    fn display_year(&self) -> &str {
        self.year
            .as_deref()
            .filter(|year| !year.trim().is_empty())
            .unwrap_or("recent")
    }

    fn rendered_findings(&self) -> &[String] {
        let n = self.findings.len().min(MAX_RENDERED_FINDINGS);
        &self.findings[..n]
    }
}

/// Render the script body for the selected style.
///
/// All styles share one skeleton: a fixed opening hook, ordered optional
/// blocks guarded on their source section, an enumerated findings block, and
/// a fixed closing that references the paper title. Blocks are joined with
/// blank lines.
pub fn render(inputs: &ScriptInputs, style: PodcastStyle) -> String {
    let parts = match style {
        PodcastStyle::Educational => educational(inputs),
        PodcastStyle::Storytelling => storytelling(inputs),
        PodcastStyle::Interview => interview(inputs),
        PodcastStyle::News => news(inputs),
    };

    parts.join("\n\n")
}

fn educational(inputs: &ScriptInputs) -> Vec<String> {
    let title = inputs.display_title();
    let mut parts = vec![format!(
        "Welcome to Science Explained, where we break down complex research into digestible insights. \
         Today, we're diving into a fascinating study titled \"{title}\" published in {}.\n\n\
         Let me start by giving you the big picture of what this research is all about.",
        inputs.display_year()
    )];

    if let Some(summary) = &inputs.abstract_summary {
        parts.push(format!(
            "Here's what the researchers set out to discover: {summary}"
        ));
    }

    if let Some(summary) = &inputs.introduction_summary {
        parts.push(format!(
            "The research addresses an important question: {summary}"
        ));
    }

    if let Some(summary) = &inputs.methods_summary {
        parts.push(format!(
            "So how did they go about answering this question? {summary}"
        ));
    }

    if !inputs.findings.is_empty() {
        parts.push("Now, here are the most important findings from this study:".to_string());
        for (i, finding) in inputs.rendered_findings().iter().enumerate() {
            parts.push(format!("Finding number {}: {finding}", i + 1));
        }
    }

    if let Some(summary) = &inputs.results_summary {
        parts.push(format!("The results tell us that: {summary}"));
    }

    if let Some(summary) = &inputs.discussion_summary {
        parts.push(format!("What does this all mean? {summary}"));
    }

    parts.push(format!(
        "To wrap up today's episode, this research on \"{title}\" gives us valuable insights into \
         an important area of study. The findings suggest that we need to pay attention to these \
         results and consider their implications for future research and applications.\n\n\
         That's all for today's Science Explained. Thanks for listening, and remember, science is \
         all around us - we just need to take the time to understand it."
    ));

    parts
}

fn storytelling(inputs: &ScriptInputs) -> Vec<String> {
    let title = inputs.display_title();
    let mut parts = vec![format!(
        "Imagine you're a detective, and you've just been handed the most puzzling case of your \
         career. That's exactly what happened to the researchers behind \"{title}\". They \
         discovered something that made them scratch their heads and say, \"Wait, that's not \
         supposed to happen.\"\n\n\
         Today, I'm going to tell you the story of how they solved this scientific mystery."
    )];

    if let Some(summary) = &inputs.introduction_summary {
        parts.push(format!(
            "It all started when scientists noticed something strange: {summary} This was the \
             beginning of a scientific journey that would take them down unexpected paths."
        ));
    }

    if let Some(summary) = &inputs.methods_summary {
        parts.push(format!(
            "Like any good detective story, they needed a plan. Here's how they investigated: {summary}"
        ));
    }

    if !inputs.findings.is_empty() {
        parts.push("And then, the plot thickened. Here's what they discovered:".to_string());
        for (i, finding) in inputs.rendered_findings().iter().enumerate() {
            parts.push(format!("Discovery {}: {finding}", i + 1));
        }
    }

    if let Some(summary) = &inputs.results_summary {
        parts.push(format!(
            "Finally, the pieces of the puzzle came together: {summary}"
        ));
    }

    parts.push(format!(
        "And that's the story of \"{title}\". It's a reminder that in science, sometimes the most \
         interesting discoveries come from asking the right questions and being willing to follow \
         the evidence wherever it leads.\n\n\
         The next time you hear about a scientific breakthrough, remember that behind every \
         discovery is a story of curiosity, persistence, and the thrill of uncovering something new."
    ));

    parts
}

fn interview(inputs: &ScriptInputs) -> Vec<String> {
    let title = inputs.display_title();
    let mut parts = vec![format!(
        "Welcome to Science Talk, where we interview the research itself. Today, we're sitting \
         down with a fascinating study: \"{title}\".\n\n\
         Let me ask this research paper some questions to understand what it's all about."
    )];

    if let Some(summary) = &inputs.abstract_summary {
        parts.push(format!(
            "Q: So, what's your main message? What should people know about you?\n\n\
             A: Well, let me tell you: {summary}"
        ));
    }

    if let Some(summary) = &inputs.introduction_summary {
        parts.push(format!(
            "Q: What problem were you trying to solve?\n\nA: Great question! {summary}"
        ));
    }

    if let Some(summary) = &inputs.methods_summary {
        parts.push(format!(
            "Q: How did you go about finding answers?\n\nA: Here's my approach: {summary}"
        ));
    }

    if !inputs.findings.is_empty() {
        parts.push(
            "Q: What are your most important findings?\n\n\
             A: I'm glad you asked! Here are my key discoveries:"
                .to_string(),
        );
        for (i, finding) in inputs.rendered_findings().iter().enumerate() {
            parts.push(format!("{}. {finding}", i + 1));
        }
    }

    if let Some(summary) = &inputs.results_summary {
        parts.push(format!(
            "Q: What do your results tell us?\n\nA: My results show that: {summary}"
        ));
    }

    parts.push(format!(
        "Q: What's your takeaway message for our listeners?\n\n\
         A: I want people to understand that \"{title}\" represents an important step forward in \
         our understanding of this field. The implications are significant, and I hope this \
         research inspires others to build upon these findings.\n\n\
         That concludes our interview with \"{title}\". Thanks for sharing your insights with us!"
    ));

    parts
}

fn news(inputs: &ScriptInputs) -> Vec<String> {
    let title = inputs.display_title();
    let mut parts = vec![format!(
        "BREAKING SCIENCE NEWS: \"{title}\" - New Research Reveals Surprising Findings\n\n\
         This is Science News Daily, bringing you the latest developments in scientific research."
    )];

    if let Some(summary) = &inputs.abstract_summary {
        parts.push(format!(
            "In a groundbreaking study published in {}, researchers have made a significant \
             discovery: {summary}",
            inputs.display_year()
        ));
    }

    if let Some(summary) = &inputs.introduction_summary {
        parts.push(format!("The research addresses a critical issue: {summary}"));
    }

    if !inputs.findings.is_empty() {
        parts.push("Here are the major findings from this study:".to_string());
        for (i, finding) in inputs.rendered_findings().iter().enumerate() {
            parts.push(format!("Finding {}: {finding}", i + 1));
        }
    }

    if let Some(summary) = &inputs.discussion_summary {
        parts.push(format!(
            "The implications of this research are significant: {summary}"
        ));
    }

    parts.push(format!(
        "This has been Science News Daily. The study \"{title}\" represents an important \
         contribution to the field and will likely influence future research directions.\n\n\
         Stay tuned for more breaking science news. This is Science News Daily, keeping you \
         informed about the latest discoveries that shape our world."
    ));

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_inputs() -> ScriptInputs {
        ScriptInputs {
            title: Some("Attention Is All You Need".to_string()),
            year: Some("2017".to_string()),
            abstract_summary: Some("ABSTRACT-SUMMARY".to_string()),
            introduction_summary: Some("INTRO-SUMMARY".to_string()),
            methods_summary: Some("METHODS-SUMMARY".to_string()),
            results_summary: Some("RESULTS-SUMMARY".to_string()),
            discussion_summary: Some("DISCUSSION-SUMMARY".to_string()),
            findings: vec![
                "finding one".to_string(),
                "finding two".to_string(),
                "finding three".to_string(),
                "finding four".to_string(),
                "finding five".to_string(),
                "finding six".to_string(),
            ],
        }
    }

    #[test]
    fn every_style_references_the_title_in_its_closing() {
        for style in PodcastStyle::ALL {
            let script = render(&full_inputs(), style);
            assert!(
                script.contains("Attention Is All You Need"),
                "style {style} lost the title"
            );
        }
    }

    #[test]
    fn findings_are_numbered_and_capped_at_five() {
        for style in PodcastStyle::ALL {
            let script = render(&full_inputs(), style);
            assert!(script.contains("finding five"), "style {style}");
            assert!(!script.contains("finding six"), "style {style}");
        }
    }

    #[test]
    fn empty_sections_emit_no_blocks() {
        let inputs = ScriptInputs {
            title: Some("A Minimal Paper".to_string()),
            abstract_summary: Some("ONLY-THE-ABSTRACT".to_string()),
            ..Default::default()
        };

        for style in PodcastStyle::ALL {
            let script = render(&inputs, style);
            assert!(!script.contains("METHODS-SUMMARY"), "style {style}");
            assert!(!script.contains("RESULTS-SUMMARY"), "style {style}");
            assert!(!script.contains("DISCUSSION-SUMMARY"), "style {style}");
            assert!(
                !script.contains("how did they go about"),
                "style {style} rendered a methods lead-in with no methods"
            );
        }

        // Styles that voice the abstract carry it; none carry the others.
        let educational = render(&inputs, PodcastStyle::Educational);
        assert!(educational.contains("ONLY-THE-ABSTRACT"));
        let news = render(&inputs, PodcastStyle::News);
        assert!(news.contains("ONLY-THE-ABSTRACT"));
    }

    #[test]
    fn missing_title_and_year_fall_back_to_generic_phrases() {
        let inputs = ScriptInputs::default();
        let educational = render(&inputs, PodcastStyle::Educational);
        assert!(educational.contains("this research paper"));
        assert!(educational.contains("published in recent"));
    }

    #[test]
    fn no_findings_means_no_findings_block() {
        let inputs = ScriptInputs {
            title: Some("Quiet Paper".to_string()),
            ..Default::default()
        };
        for style in PodcastStyle::ALL {
            let script = render(&inputs, style);
            assert!(!script.contains("Finding number 1"), "style {style}");
            assert!(!script.contains("Discovery 1"), "style {style}");
        }
    }

    #[test]
    fn blocks_are_joined_with_blank_lines() {
        let script = render(&full_inputs(), PodcastStyle::Educational);
        assert!(script.contains("\n\nHere's what the researchers set out to discover:"));
    }
}
