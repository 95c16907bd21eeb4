use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of generating one URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UrlOutcome {
    Generated {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    Failed {
        url: String,
        error: String,
    },
}

impl UrlOutcome {
    pub fn url(&self) -> &str {
        match self {
            UrlOutcome::Generated { url, .. } | UrlOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UrlOutcome::Failed { .. })
    }
}

/// Batch totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: u32,
    pub generated: u32,
    pub failed: u32,
    /// URLs never attempted because the batch aborted early
    pub skipped: u32,
}

/// Everything that happened in one run, in URL order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub outcomes: Vec<UrlOutcome>,
    pub summary: BatchSummary,
    pub generated_at: String,
}
