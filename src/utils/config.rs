use std::path::PathBuf;

use crate::driver::web::WebDriverConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where generated files go; `None` means the user's Downloads folder
    pub output_dir: Option<PathBuf>,

    /// Keep processing remaining URLs after one fails
    pub continue_on_failure: bool,

    /// Upper bound for one URL's generation (ms), `None` waits forever
    pub timeout_ms: Option<u64>,

    /// Open a new page per URL instead of reusing one
    pub fresh_page_per_url: bool,

    /// Print the generated source instead of writing files
    pub print_only: bool,

    /// Browser launch settings
    pub web: WebDriverConfig,
}

impl Default for Config {
    fn default() -> Self {
        let timeout_ms = std::env::var("LUMI_POM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            output_dir: None,
            continue_on_failure: false,
            timeout_ms,
            fresh_page_per_url: false,
            print_only: false,
            web: WebDriverConfig::default(),
        }
    }
}
