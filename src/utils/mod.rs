use anyhow::Result;
use std::path::Path;

/// Split text into fixed-size slices of at most `max_chars` characters,
/// respecting UTF-8 boundaries. Slicing is not sentence-aware.
pub fn chunk_by_chars(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// First `count` sentences of a text, re-joined with `. ` and a trailing
/// period. Used as the local fallback when a summarization call fails.
pub fn leading_sentences(text: &str, count: usize) -> String {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(count)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    format!("{}.", sentences.join(". "))
}

/// Format duration in human-readable format
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Sanitize filename for safe filesystem usage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            match c {
                // Keep alphanumeric characters, spaces, hyphens, underscores, and dots
                c if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Check if a file exists and is readable
pub fn check_file_accessible(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    // Try to read metadata to check permissions
    std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Cannot access file {}: {}", path.display(), e))?;

    Ok(())
}

/// Generate a unique filename with timestamp
pub fn generate_unique_filename(base_name: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let random_suffix = uuid::Uuid::new_v4().to_string()[..8].to_string();

    format!(
        "{}_{}_{}_{}.{}",
        "smartcast",
        sanitize_filename(base_name),
        timestamp,
        random_suffix,
        extension
    )
}

/// Check if the current environment has required tools
pub async fn check_dependencies() -> Vec<String> {
    let mut missing = Vec::new();

    // Check for yt-dlp
    if !check_command_available("yt-dlp").await {
        missing.push("yt-dlp - required for YouTube audio extraction".to_string());
    }

    // Check for ffmpeg (optional but recommended)
    if !check_command_available("ffmpeg").await {
        missing.push("ffmpeg - recommended for audio conversion".to_string());
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_by_chars() {
        assert_eq!(chunk_by_chars("", 10), Vec::<String>::new());
        assert_eq!(chunk_by_chars("abcdef", 0), Vec::<String>::new());
        assert_eq!(chunk_by_chars("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(chunk_by_chars("abc", 10), vec!["abc"]);
    }

    #[test]
    fn test_chunk_by_chars_respects_multibyte_characters() {
        let chunks = chunk_by_chars("héllo wörld", 3);
        assert_eq!(chunks, vec!["hél", "lo ", "wör", "ld"]);
    }

    #[test]
    fn test_leading_sentences() {
        assert_eq!(
            leading_sentences("One. Two! Three? Four.", 3),
            "One. Two. Three."
        );
        assert_eq!(leading_sentences("Only one here", 3), "Only one here.");
        assert_eq!(leading_sentences("", 3), "");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3661), "1h 1m 1s");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello World!"), "Hello World_");
        assert_eq!(sanitize_filename("test/file?name"), "test_file_name");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
    }

    #[test]
    fn test_generate_unique_filename() {
        let name = generate_unique_filename("My Episode", "mp3");
        assert!(name.starts_with("smartcast_My Episode_"));
        assert!(name.ends_with(".mp3"));
    }
}
