use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::Result;

/// YouTube audio downloader backed by yt-dlp.
pub struct YoutubeDownloader {
    yt_dlp_path: String,
}

impl YoutubeDownloader {
    pub fn new() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> Result<bool> {
        let output = Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        Ok(output.is_ok() && output.unwrap().status.success())
    }

    /// True for the YouTube URL shapes we accept.
    pub fn is_youtube_url(url: &str) -> bool {
        let url_lower = url.to_lowercase();
        url_lower.contains("youtube.com/watch")
            || url_lower.contains("youtu.be/")
            || url_lower.contains("youtube.com/embed/")
            || url_lower.contains("youtube.com/v/")
            || url_lower.contains("m.youtube.com/")
    }

    /// Download the audio track as a low-bitrate mp3. Speech survives the
    /// quality drop and the transcription upload stays small.
    pub async fn download_audio(&self, url: &str, output_path: &Path) -> Result<()> {
        if !self.check_availability().await? {
            anyhow::bail!(
                "yt-dlp is not available. Please install it: https://github.com/yt-dlp/yt-dlp"
            );
        }

        tracing::debug!("Downloading audio for: {url}");

        let output = Command::new(&self.yt_dlp_path)
            .args([
                // Output to specific file
                "--output",
                &output_path.to_string_lossy(),
                // Extract audio in the most efficient format for transcription
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "9",
                // Prioritize smaller/faster formats
                "--format",
                "worstaudio[acodec^=mp4a]/worstaudio[ext=m4a]/worstaudio[ext=mp3]/worstaudio",
                "--no-playlist",
                // Performance optimizations
                "--concurrent-fragments",
                "4",
                "--newline",
                url,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Failed to download audio: {}", error);
        }

        Ok(())
    }
}

impl Default for YoutubeDownloader {
    fn default() -> Self {
        Self::new()
    }
}
