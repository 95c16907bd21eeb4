use anyhow::{Context, Result};
use std::path::Path;
use url::Url;

/// Resolve the URLs to process.
///
/// A single `url` wins over `file`. The file is read as headerless CSV and every
/// non-empty cell, in row order, is taken as a URL.
pub fn parse_urls(url: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    let urls = if let Some(url) = url {
        vec![url.trim().to_string()]
    } else if let Some(path) = file {
        read_url_file(path)?
    } else {
        anyhow::bail!("No URL or file provided");
    };

    for url in &urls {
        validate_url(url)?;
    }
    Ok(urls)
}

fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open URL file: {}", path.display()))?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to parse URL file: {}", path.display()))?;
        urls.extend(
            record
                .iter()
                .filter(|cell| !cell.is_empty())
                .map(|cell| cell.to_string()),
        );
    }

    if urls.is_empty() {
        anyhow::bail!("No URLs found in {}", path.display());
    }
    Ok(urls)
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
    match parsed.scheme() {
        "http" | "https" | "file" => Ok(()),
        other => anyhow::bail!("Unsupported URL scheme '{}' in {}", other, url),
    }
}
