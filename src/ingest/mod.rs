use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

use crate::config::Config;
use crate::utils;
use crate::{DigestorError, Result};

/// Raw document text plus provenance. Created at ingestion, consumed once
/// by the structuring engine, then discarded.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    pub origin: String,
}

/// Where a paper input points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    LocalText(PathBuf),
    LocalPdf(PathBuf),
    Arxiv(String),
}

/// Classify a paper input string. First match wins: URL, arXiv identifier,
/// then local file by extension.
pub fn detect_source(input: &str) -> Result<DocumentSource> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let id = arxiv_id_from_url(input).ok_or_else(|| {
            DigestorError::UnsupportedSource(format!("not an arXiv URL: {input}"))
        })?;
        return Ok(DocumentSource::Arxiv(id));
    }

    if arxiv_id_pattern().is_match(input) {
        return Ok(DocumentSource::Arxiv(input.to_string()));
    }

    let path = PathBuf::from(input);
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("pdf") => Ok(DocumentSource::LocalPdf(path)),
        Some("txt") => Ok(DocumentSource::LocalText(path)),
        _ => Err(DigestorError::UnsupportedSource(format!(
            "expected a .pdf/.txt file, an arXiv id, or an arXiv URL: {input}"
        ))
        .into()),
    }
}

fn arxiv_id_pattern() -> Regex {
    Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").expect("valid arXiv id pattern")
}

/// Pull a modern arXiv identifier out of an abs/pdf URL.
fn arxiv_id_from_url(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    if !url.host_str()?.ends_with("arxiv.org") {
        return None;
    }

    let last_segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let id = last_segment.trim_end_matches(".pdf");

    arxiv_id_pattern().is_match(id).then(|| id.to_string())
}

/// Fetches paper inputs and turns them into raw text.
///
/// Downloads land in an owned temporary directory and disappear with it.
pub struct DocumentIngestor {
    http: reqwest::Client,
    temp_dir: TempDir,
}

impl DocumentIngestor {
    pub fn new(config: &Config) -> Result<Self> {
        let temp_dir = match &config.app.temp_dir {
            Some(dir) => TempDir::new_in(dir),
            None => TempDir::new(),
        }
        .context("Failed to create temporary directory")?;

        Ok(Self {
            http: reqwest::Client::new(),
            temp_dir,
        })
    }

    /// Resolve an input to raw document text.
    pub async fn load(&self, input: &str) -> Result<RawDocument> {
        match detect_source(input)? {
            DocumentSource::LocalText(path) => {
                utils::check_file_accessible(&path)?;
                let text = fs_err::read_to_string(&path)?;
                Ok(RawDocument {
                    text,
                    origin: path.display().to_string(),
                })
            }
            DocumentSource::LocalPdf(path) => {
                utils::check_file_accessible(&path)?;
                let text = extract_pdf_text(&path)?;
                Ok(RawDocument {
                    text,
                    origin: path.display().to_string(),
                })
            }
            DocumentSource::Arxiv(id) => {
                let pdf_path = self.download_arxiv_pdf(&id).await?;
                let text = extract_pdf_text(&pdf_path)?;
                Ok(RawDocument {
                    text,
                    origin: format!("arxiv:{id}"),
                })
            }
        }
    }

    /// Stream an arXiv PDF into the temporary directory.
    async fn download_arxiv_pdf(&self, arxiv_id: &str) -> Result<PathBuf> {
        let url = format!("https://arxiv.org/pdf/{arxiv_id}.pdf");
        let pdf_path = self.temp_dir.path().join(format!("arxiv_{arxiv_id}.pdf"));

        tracing::info!("Downloading arXiv paper {arxiv_id}");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Failed to download arXiv paper: HTTP {}", response.status());
        }

        let progress = ProgressBar::new(response.content_length().unwrap_or(0));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .unwrap(),
        );
        progress.set_message("Downloading paper...");

        let mut file = fs_err::File::create(&pdf_path)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        use std::io::Write;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            progress.set_position(downloaded);
        }

        progress.finish_with_message("Download complete");

        Ok(pdf_path)
    }
}

/// Extract text from a PDF page by page. Pages that fail to decode are
/// skipped with a warning; a wholly unreadable file is an extraction error.
pub fn extract_pdf_text(path: &Path) -> Result<String> {
    tracing::debug!("Extracting text from PDF: {}", path.display());

    let pdf = lopdf::Document::load(path).map_err(|err| {
        DigestorError::ExtractionFailed(format!("could not open {}: {err}", path.display()))
    })?;

    let mut text = String::new();
    for page_number in pdf.get_pages().keys() {
        match pdf.extract_text(&[*page_number]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(err) => tracing::warn!("Skipping PDF page {page_number}: {err}"),
        }
    }

    Ok(text)
}
