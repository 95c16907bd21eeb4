use colored::Colorize;
use log::{error, warn};
use std::fmt::Display;
use std::time::Instant;

use crate::generator::PomGenerator;
use crate::report::{BatchReport, UrlOutcome};
use crate::utils::{Config, FileWriter};

/// Where generated sources end up
pub enum Output<'a> {
    /// Write one file per URL
    Files(&'a FileWriter),
    /// Print to stdout
    Stdout,
}

impl Output<'_> {
    /// Progress goes to stderr whenever stdout carries generated code
    pub fn progress_on_stderr(&self) -> bool {
        matches!(self, Output::Stdout)
    }

    /// Print a progress or summary line
    pub fn status(&self, line: impl Display) {
        if self.progress_on_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Generate page objects for `urls`, one after another.
///
/// By default the first failure stops the batch and the remaining URLs are
/// reported as skipped; with `continue_on_failure` every URL is attempted.
/// Per-URL deadlines are the generator's concern (`PomGenerator::with_timeout`).
pub async fn run_batch(
    generator: &mut PomGenerator,
    urls: &[String],
    config: &Config,
    output: &Output<'_>,
) -> BatchReport {
    let mut outcomes = Vec::with_capacity(urls.len());

    for (index, url) in urls.iter().enumerate() {
        output.status(format!(
            "{} [{}/{}] Generating POM for: {}",
            "▶".green().bold(),
            index + 1,
            urls.len(),
            url.cyan()
        ));

        let outcome = generate_one(generator, url, output).await;
        let failed = outcome.is_failure();
        outcomes.push(outcome);

        if failed && !config.continue_on_failure {
            let remaining = urls.len() - index - 1;
            if remaining > 0 {
                warn!("Stopping batch, {} URL(s) not processed", remaining);
            }
            break;
        }
    }

    BatchReport::from_outcomes(outcomes, urls.len())
}

async fn generate_one(
    generator: &mut PomGenerator,
    url: &str,
    output: &Output<'_>,
) -> UrlOutcome {
    let start = Instant::now();

    let source = match generator.generate(url).await {
        Ok(source) => source,
        Err(e) => return failed(output, url, e.to_string()),
    };

    let path = match output {
        Output::Files(writer) => match writer.write(&source, url) {
            Ok(written) => {
                output.status(format!(
                    "  {} POM file saved to: {}",
                    "✓".green(),
                    written.path.display()
                ));
                Some(written.path)
            }
            Err(e) => return failed(output, url, format!("{:#}", e)),
        },
        Output::Stdout => {
            println!("{}", source);
            None
        }
    };

    UrlOutcome::Generated {
        url: url.to_string(),
        path,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

fn failed(output: &Output<'_>, url: &str, error: String) -> UrlOutcome {
    error!("{}: {}", url, error);
    output.status(format!("  {} {}", "✗".red(), error));
    UrlOutcome::Failed {
        url: url.to_string(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::{FakeBrowserLog, FakeElement, FakeLauncher, FakePage};
    use crate::generator::{ElementCategory, GeneratorState};
    use std::time::Duration;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|u| u.to_string()).collect()
    }

    fn site() -> FakePage {
        FakePage::new("Example Domain")
            .with(ElementCategory::Link, FakeElement::new().text("More information..."))
            .unreachable("https://down.example")
    }

    #[tokio::test]
    async fn test_batch_writes_one_file_per_url() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(Some(dir.path())).unwrap();
        let mut generator = PomGenerator::new(FakeLauncher::new(site()));

        let report = run_batch(
            &mut generator,
            &urls(&["https://example.com", "https://www.example.org"]),
            &Config::default(),
            &Output::Files(&writer),
        )
        .await;

        assert!(!report.has_failures());
        let written = std::fs::read_to_string(dir.path().join("www_example_org_POM.ts")).unwrap();
        assert!(written.contains("export class ExampleDomainPage {"));
        assert!(written.contains("async clickMoreinformationLink()"));
        assert!(dir.path().join("example_com_POM.ts").exists());
    }

    #[tokio::test]
    async fn test_first_failure_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(Some(dir.path())).unwrap();
        let mut generator = PomGenerator::new(FakeLauncher::new(site()));

        let report = run_batch(
            &mut generator,
            &urls(&["https://down.example", "https://example.com"]),
            &Config::default(),
            &Output::Files(&writer),
        )
        .await;

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.outcomes.len(), 1);
        assert!(!dir.path().join("example_com_POM.ts").exists());
    }

    #[tokio::test]
    async fn test_continue_on_failure_isolates_urls() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(Some(dir.path())).unwrap();
        let mut generator = PomGenerator::new(FakeLauncher::new(site()));
        let config = Config {
            continue_on_failure: true,
            ..Config::default()
        };

        let report = run_batch(
            &mut generator,
            &urls(&["https://down.example", "https://example.com"]),
            &config,
            &Output::Files(&writer),
        )
        .await;

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.generated, 1);
        assert_eq!(report.summary.skipped, 0);
        assert_eq!(report.outcomes[0].url(), "https://down.example");
        assert!(dir.path().join("example_com_POM.ts").exists());
    }

    #[tokio::test]
    async fn test_launch_failure_reported() {
        let mut generator = PomGenerator::new(FakeLauncher::failing());

        let report = run_batch(
            &mut generator,
            &urls(&["https://example.com"]),
            &Config::default(),
            &Output::Stdout,
        )
        .await;

        match &report.outcomes[0] {
            UrlOutcome::Failed { error, .. } => {
                assert!(error.starts_with("Failed to initialize browser session"))
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timed_out_urls_release_their_pages() {
        let page = site().hanging("https://slow.example").hanging("https://slower.example");
        let launcher = FakeLauncher::new(page);
        let log = launcher.log();
        let mut generator = PomGenerator::new(launcher)
            .with_fresh_page_per_url(true)
            .with_timeout(Some(Duration::from_millis(50)));
        let config = Config {
            continue_on_failure: true,
            ..Config::default()
        };

        let report = run_batch(
            &mut generator,
            &urls(&["https://slow.example", "https://slower.example"]),
            &config,
            &Output::Stdout,
        )
        .await;

        assert_eq!(report.summary.failed, 2);
        assert_ne!(generator.state(), GeneratorState::Generating);
        assert_eq!(FakeBrowserLog::count(&log.pages_opened), 2);
        assert_eq!(FakeBrowserLog::count(&log.pages_closed), 2);
    }

    #[test]
    fn test_progress_leaves_stdout_to_generated_code() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(Some(dir.path())).unwrap();

        assert!(Output::Stdout.progress_on_stderr());
        assert!(!Output::Files(&writer).progress_on_stderr());
    }
}
