use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;

pub mod formatters;

pub use formatters::Renderable;

fn render(artifact: &impl Renderable, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => artifact.to_text(),
        OutputFormat::Json => artifact.to_json()?,
        OutputFormat::Markdown => artifact.to_markdown(),
    })
}

/// Save a rendered artifact to file
pub async fn save_to_file(
    artifact: &impl Renderable,
    path: &Path,
    format: &OutputFormat,
) -> Result<()> {
    let content = render(artifact, format)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print a rendered artifact to the console
pub fn print_to_console(artifact: &impl Renderable, format: &OutputFormat) -> Result<()> {
    let content = render(artifact, format)?;
    println!("{}", content);
    Ok(())
}
