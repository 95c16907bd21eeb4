use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use lumi_pom::driver::web::{BrowserType, WebLauncher};
use lumi_pom::runner::{self, Output};
use lumi_pom::utils::{self, Config, FileWriter};
use lumi_pom::{report, PomGenerator};

#[derive(Parser)]
#[command(name = "lumi-pom")]
#[command(author = "NL Team")]
#[command(version)]
#[command(about = "Generate Playwright/TypeScript Page Object Models from URLs", long_about = None)]
struct Cli {
    /// Single URL to process
    #[arg(short, long, required_unless_present = "file")]
    url: Option<String>,

    /// Path to CSV file containing URLs
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output directory (defaults to the Downloads folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Browser engine (chromium, firefox, webkit)
    #[arg(short, long)]
    browser: Option<BrowserType>,

    /// Show the browser window
    #[arg(long, default_value = "false")]
    headed: bool,

    /// Continue with remaining URLs when one fails
    #[arg(long, default_value = "false")]
    continue_on_failure: bool,

    /// Use a fresh page for every URL
    #[arg(long, default_value = "false")]
    fresh_page: bool,

    /// Per-URL timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print generated code instead of writing files
    #[arg(long, default_value = "false")]
    stdout: bool,
}

impl Cli {
    fn into_config(self) -> (Config, Option<String>, Option<PathBuf>, Option<PathBuf>) {
        let mut config = Config::default();
        config.output_dir = self.output;
        config.continue_on_failure = self.continue_on_failure;
        config.fresh_page_per_url = self.fresh_page;
        config.print_only = self.stdout;
        if self.timeout.is_some() {
            config.timeout_ms = self.timeout;
        }
        if let Some(browser) = self.browser {
            config.web.browser_type = browser;
        }
        if self.headed {
            config.web.headless = false;
        }
        (config, self.url, self.file, self.report)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("lumi_pom=info"))
        .format_timestamp(None)
        .init();

    let (config, url, file, report_path) = Cli::parse().into_config();

    let urls = utils::parse_urls(url.as_deref(), file.as_deref())?;
    let writer = if config.print_only {
        None
    } else {
        Some(FileWriter::new(config.output_dir.as_deref())?)
    };
    let output = match writer {
        Some(ref writer) => Output::Files(writer),
        None => Output::Stdout,
    };

    output.status(format!(
        "{} Generating {} Page Object Model(s)",
        "▶".green().bold(),
        urls.len()
    ));
    if let Some(ref writer) = writer {
        output.status(format!(
            "  Output: {}",
            writer.output_dir().display().to_string().cyan()
        ));
    }
    if config.continue_on_failure {
        output.status(format!("  Continue on failure: {}", "Enabled".yellow()));
    }

    let mut generator = PomGenerator::new(WebLauncher::new(config.web.clone()))
        .with_fresh_page_per_url(config.fresh_page_per_url)
        .with_timeout(config.timeout_ms.map(Duration::from_millis));

    let batch = runner::run_batch(&mut generator, &urls, &config, &output).await;
    generator.cleanup().await;

    output.status("");
    for line in batch.summary_lines() {
        output.status(line);
    }
    if let Some(ref path) = report_path {
        report::json::save(&batch, path)?;
    }

    if batch.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
