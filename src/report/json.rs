use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use super::types::BatchReport;

/// Write the batch report as pretty JSON
pub fn save(report: &BatchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("JSON report saved to: {}", path.display());

    Ok(())
}
