use anyhow::{Context, Result};
use log::warn;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

/// Writes generated page objects to disk
pub struct FileWriter {
    output_dir: PathBuf,
    written: Mutex<HashSet<PathBuf>>,
}

/// A page object file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// An earlier URL of this run wrote the same file, which is now replaced
    pub replaced_earlier: bool,
}

impl FileWriter {
    /// Write into `output_dir`, or the user's Downloads folder when `None`
    pub fn new(output_dir: Option<&Path>) -> Result<Self> {
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => downloads_dir()?,
        };
        Ok(Self {
            output_dir,
            written: Mutex::new(HashSet::new()),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `content` for `url`.
    ///
    /// File names only carry the host, so two URLs on one host share a file and
    /// the later one wins.
    pub fn write(&self, content: &str, url: &str) -> Result<WrittenFile> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;

        let path = self.output_dir.join(file_name_for_url(url));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        let first_write = self
            .written
            .lock()
            .map(|mut written| written.insert(path.clone()))
            .unwrap_or(true);
        if !first_write {
            warn!(
                "{} was already written earlier in this run, overwritten by {}",
                path.display(),
                url
            );
        }

        Ok(WrittenFile {
            path,
            replaced_earlier: !first_write,
        })
    }
}

/// `https://www.example.com/login` becomes `www_example_com_POM.ts`
pub fn file_name_for_url(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "page".to_string());

    format!("{}_POM.ts", host.replace('.', "_"))
}

fn downloads_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::download_dir() {
        return Ok(dir);
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join("Downloads"))
}
