//! Playwright-backed browser capability
//!
//! Implements the generator's browser traits on top of the `playwright` crate.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use playwright::api::{Browser, BrowserContext, ElementHandle, Page, Viewport};
use playwright::Playwright;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::driver::traits::{BrowserLauncher, BrowserSession, LiveNode, PageElement, PageHandle};

/// Web browser type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserType {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserType::Chromium),
            "firefox" => Ok(BrowserType::Firefox),
            "webkit" | "safari" => Ok(BrowserType::Webkit),
            _ => anyhow::bail!("Unknown browser: {}", s),
        }
    }
}

/// Web Driver configuration
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub browser_type: BrowserType,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit browser binary, otherwise discovered or left to Playwright
    pub executable: Option<PathBuf>,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        let headless = std::env::var("LUMI_HEADLESS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let browser_type = std::env::var("LUMI_BROWSER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let executable = std::env::var("PLAYWRIGHT_CHROMIUM_EXECUTABLE_PATH")
            .ok()
            .map(PathBuf::from);

        Self {
            browser_type,
            headless,
            viewport_width: 1280,
            viewport_height: 720,
            executable,
        }
    }
}

/// Launches browsers through Playwright
pub struct WebLauncher {
    config: WebDriverConfig,
}

impl WebLauncher {
    pub fn new(config: WebDriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for WebLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let playwright = Playwright::initialize()
            .await
            .context("Failed to initialize Playwright")?;

        let browser = match self.config.browser_type {
            BrowserType::Chromium => {
                launch_chromium_browser(&playwright.chromium(), &self.config).await?
            }
            BrowserType::Firefox => playwright
                .firefox()
                .launcher()
                .headless(self.config.headless)
                .launch()
                .await
                .context("Failed to launch Firefox")?,
            BrowserType::Webkit => playwright
                .webkit()
                .launcher()
                .headless(self.config.headless)
                .launch()
                .await
                .context("Failed to launch WebKit")?,
        };

        let context = browser
            .context_builder()
            .build()
            .await
            .context("Failed to create browser context")?;

        info!("Launched {:?} (headless: {})", self.config.browser_type, self.config.headless);

        Ok(Box::new(WebSession {
            playwright: Arc::new(playwright),
            browser: Arc::new(browser),
            context: Arc::new(context),
            viewport: (self.config.viewport_width as i32, self.config.viewport_height as i32),
        }))
    }
}

/// A launched browser with a single context
pub struct WebSession {
    #[allow(dead_code)]
    playwright: Arc<Playwright>,
    browser: Arc<Browser>,
    context: Arc<BrowserContext>,
    viewport: (i32, i32),
}

#[async_trait]
impl BrowserSession for WebSession {
    async fn new_page(&self) -> Result<Box<dyn PageHandle>> {
        let page = self
            .context
            .new_page()
            .await
            .context("Failed to open page")?;

        let (width, height) = self.viewport;
        page.set_viewport_size(Viewport { width, height }).await?;

        Ok(Box::new(WebPage {
            page: Arc::new(Mutex::new(page)),
        }))
    }

    async fn close(&self) -> Result<()> {
        self.browser.close().await.context("Failed to close browser")?;
        Ok(())
    }
}

/// A Playwright page
pub struct WebPage {
    page: Arc<Mutex<Page>>,
}

#[async_trait]
impl PageHandle for WebPage {
    async fn goto(&self, url: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.goto_builder(url)
            .goto()
            .await
            .context("Failed to navigate to URL")?;
        Ok(())
    }

    async fn title(&self) -> Result<String> {
        let page = self.page.lock().await;
        Ok(page.title().await?)
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>> {
        let page = self.page.lock().await;
        let handles = page
            .query_selector_all(selector)
            .await
            .with_context(|| format!("Failed to query '{}'", selector))?;
        debug!("'{}' matched {} elements", selector, handles.len());

        Ok(handles
            .into_iter()
            .map(|handle| {
                Box::new(WebElement {
                    handle,
                    page: self.page.clone(),
                }) as Box<dyn PageElement>
            })
            .collect())
    }

    async fn close(&self) -> Result<()> {
        let page = self.page.lock().await;
        page.close(None).await?;
        Ok(())
    }
}

/// Element handle bound to the page it lives in
pub struct WebElement {
    handle: ElementHandle,
    page: Arc<Mutex<Page>>,
}

#[async_trait]
impl LiveNode for WebElement {
    async fn evaluate(&self, script: &str) -> Result<Value> {
        let page = self.page.lock().await;
        let value: Value = page.evaluate(script, &self.handle).await?;
        Ok(value)
    }
}

#[async_trait]
impl PageElement for WebElement {
    async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.handle.get_attribute(name).await?)
    }

    async fn inner_text(&self) -> Result<String> {
        Ok(self.handle.inner_text().await?)
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(self.handle.is_visible().await?)
    }
}

/// Launch Chromium, preferring an explicit or system-installed binary
async fn launch_chromium_browser(
    chromium: &playwright::api::BrowserType,
    config: &WebDriverConfig,
) -> Result<Browser> {
    let mut launcher = chromium.launcher();
    launcher = launcher.headless(config.headless);

    let executable = config.executable.clone().or_else(find_system_browser);
    if let Some(ref path) = executable {
        info!("Using browser executable: {}", path.display());
        launcher = launcher.executable(path);
    } else {
        debug!("No browser executable found, using Playwright's bundled Chromium");
    }

    let args: Vec<String> = vec![
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    launcher = launcher.args(&args);

    launcher.launch().await.context("Failed to launch Chromium")
}

fn find_system_browser() -> Option<PathBuf> {
    let common_paths = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    common_paths
        .iter()
        .map(std::path::Path::new)
        .find(|p| p.exists())
        .map(|p| p.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_type_from_str() {
        assert_eq!("chromium".parse::<BrowserType>().unwrap(), BrowserType::Chromium);
        assert_eq!("Firefox".parse::<BrowserType>().unwrap(), BrowserType::Firefox);
        assert_eq!("safari".parse::<BrowserType>().unwrap(), BrowserType::Webkit);
        assert!("netscape".parse::<BrowserType>().is_err());
    }
}
