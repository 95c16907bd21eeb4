use std::time::Duration;
use thiserror::Error;

/// Failures that abort generation for a URL.
///
/// Per-element extraction problems never show up here; they degrade to the
/// `Unknown` fallback token instead.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The browser session or its page could not be acquired
    #[error("Failed to initialize browser session: {0}")]
    Initialization(String),

    /// No page capability is available (for example after `cleanup()`)
    #[error("Generator is not ready: {0}")]
    NotReady(&'static str),

    /// Navigation or reading the page title failed
    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// Generation for a URL ran past the configured deadline
    #[error("Timed out after {}ms while generating {url}", .limit.as_millis())]
    Timeout { url: String, limit: Duration },

    /// Any other page-level failure, e.g. an element query rejected by the browser
    #[error("Browser error: {0}")]
    Browser(String),
}

pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;
