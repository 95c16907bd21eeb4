pub mod json;
pub mod types;

use colored::Colorize;

pub use types::{BatchReport, BatchSummary, UrlOutcome};

impl BatchReport {
    /// Build a report for a run over `total` URLs
    pub fn from_outcomes(outcomes: Vec<UrlOutcome>, total: usize) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        let generated = outcomes.len() - failed;

        Self {
            summary: BatchSummary {
                total: total as u32,
                generated: generated as u32,
                failed: failed as u32,
                skipped: total.saturating_sub(outcomes.len()) as u32,
            },
            outcomes,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0 || self.summary.skipped > 0
    }

    /// End-of-run summary, one entry per printed line
    pub fn summary_lines(&self) -> Vec<String> {
        let summary = &self.summary;
        if !self.has_failures() {
            return vec![format!(
                "{} Page Object Models generated successfully! ({} of {})",
                "✓".green().bold(),
                summary.generated,
                summary.total
            )];
        }

        let mut lines = vec![format!(
            "{} Generated {} of {} ({} failed, {} skipped)",
            "✗".red().bold(),
            summary.generated,
            summary.total,
            summary.failed,
            summary.skipped
        )];
        for outcome in &self.outcomes {
            if let UrlOutcome::Failed { url, error } = outcome {
                lines.push(format!("  {} {}: {}", "✗".red(), url, error));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let report = BatchReport::from_outcomes(
            vec![
                UrlOutcome::Generated {
                    url: "https://a.example".into(),
                    path: None,
                    duration_ms: 120,
                },
                UrlOutcome::Failed {
                    url: "https://b.example".into(),
                    error: "Failed to load https://b.example: timeout".into(),
                },
            ],
            4,
        );

        assert_eq!(
            report.summary,
            BatchSummary {
                total: 4,
                generated: 1,
                failed: 1,
                skipped: 2,
            }
        );
        assert!(report.has_failures());
    }

    #[test]
    fn test_report_json_shape() {
        let report = BatchReport::from_outcomes(
            vec![UrlOutcome::Failed {
                url: "https://b.example".into(),
                error: "boom".into(),
            }],
            1,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "failed");
        assert_eq!(json["summary"]["failed"], 1);
        assert!(json["generatedAt"].is_string());
    }

    #[test]
    fn test_summary_lines_list_failures() {
        colored::control::set_override(false);
        let report = BatchReport::from_outcomes(
            vec![UrlOutcome::Failed {
                url: "https://b.example".into(),
                error: "boom".into(),
            }],
            2,
        );

        assert_eq!(
            report.summary_lines(),
            vec![
                "✗ Generated 0 of 2 (1 failed, 1 skipped)".to_string(),
                "  ✗ https://b.example: boom".to_string(),
            ]
        );
    }
}
