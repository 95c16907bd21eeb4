use log::{debug, info, warn};
use std::time::Duration;

use super::collector::{collect_elements, CollectedElement};
use super::locator::derive_locator;
use super::naming::{name_for_element, NameRegistry};
use super::types::{GeneratedModel, PageObjectRecord};
use crate::driver::traits::{BrowserLauncher, BrowserSession, PageHandle};
use crate::error::{GeneratorError, GeneratorResult};

/// Lifecycle of a [`PomGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Uninitialized,
    Initialized,
    Generating,
    Done,
    Closed,
}

/// Turns URLs into page object source text, reusing one browser session.
///
/// `generate` takes `&mut self`, so a single generator can never run two
/// generations against the same page at once.
pub struct PomGenerator {
    launcher: Box<dyn BrowserLauncher>,
    session: Option<Box<dyn BrowserSession>>,
    page: Option<Box<dyn PageHandle>>,
    state: GeneratorState,
    fresh_page_per_url: bool,
    timeout: Option<Duration>,
}

impl PomGenerator {
    pub fn new(launcher: impl BrowserLauncher + 'static) -> Self {
        Self {
            launcher: Box::new(launcher),
            session: None,
            page: None,
            state: GeneratorState::Uninitialized,
            fresh_page_per_url: false,
            timeout: None,
        }
    }

    /// Open a new page for every URL instead of sharing one across generations.
    /// Avoids cookies and history leaking from one page object into the next.
    pub fn with_fresh_page_per_url(mut self, enabled: bool) -> Self {
        self.fresh_page_per_url = enabled;
        self
    }

    /// Bound each URL's navigation and extraction; `None` waits indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Acquire the browser session (and the shared page unless pages are per URL)
    pub async fn initialize(&mut self) -> GeneratorResult<()> {
        match self.state {
            GeneratorState::Closed => {
                return Err(GeneratorError::NotReady("generator has been cleaned up"));
            }
            GeneratorState::Uninitialized => {}
            _ => return Ok(()),
        }

        info!("Launching browser session");
        let session = self
            .launcher
            .launch()
            .await
            .map_err(|e| GeneratorError::Initialization(format!("{:#}", e)))?;

        if !self.fresh_page_per_url {
            match session.new_page().await {
                Ok(page) => self.page = Some(page),
                Err(e) => {
                    if let Err(close_err) = session.close().await {
                        debug!("Failed to close half-initialized session: {:#}", close_err);
                    }
                    return Err(GeneratorError::Initialization(format!(
                        "could not open page: {:#}",
                        e
                    )));
                }
            }
        }

        self.session = Some(session);
        self.state = GeneratorState::Initialized;
        Ok(())
    }

    /// Generate the page object source for `url`.
    ///
    /// Initializes the session on first use. With a deadline set, only the
    /// navigate/collect/render part is bounded; the page bookkeeping after it
    /// always runs.
    pub async fn generate(&mut self, url: &str) -> GeneratorResult<String> {
        match self.state {
            GeneratorState::Uninitialized => self.initialize().await?,
            GeneratorState::Closed => {
                return Err(GeneratorError::NotReady("generator has been cleaned up"));
            }
            GeneratorState::Generating => self.recover_interrupted().await,
            GeneratorState::Initialized | GeneratorState::Done => {}
        }

        self.state = GeneratorState::Generating;
        let result = self.generate_with_page(url).await;
        if self.fresh_page_per_url {
            self.close_page(url).await;
        }
        self.state = if result.is_ok() {
            GeneratorState::Done
        } else {
            GeneratorState::Initialized
        };
        result
    }

    async fn generate_with_page(&mut self, url: &str) -> GeneratorResult<String> {
        if self.fresh_page_per_url {
            let session = self
                .session
                .as_deref()
                .ok_or(GeneratorError::NotReady("no browser session"))?;
            let page = session.new_page().await.map_err(|e| {
                GeneratorError::Initialization(format!("could not open page: {:#}", e))
            })?;
            self.page = Some(page);
        }

        let page = self
            .page
            .as_deref()
            .ok_or(GeneratorError::NotReady("no page after initialization"))?;

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, generate_on_page(page, url))
                .await
                .map_err(|_| GeneratorError::Timeout {
                    url: url.to_string(),
                    limit,
                })?,
            None => generate_on_page(page, url).await,
        }
    }

    /// A caller dropped a previous `generate` before it finished
    async fn recover_interrupted(&mut self) {
        warn!("Previous generation was interrupted, resetting page state");
        if self.fresh_page_per_url {
            self.close_page("interrupted generation").await;
        }
        self.state = GeneratorState::Initialized;
    }

    async fn close_page(&mut self, context: &str) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!("Failed to close page for {}: {:#}", context, e);
            }
        }
    }

    /// Release the browser session. Safe to call repeatedly.
    pub async fn cleanup(&mut self) {
        if self.state == GeneratorState::Closed {
            return;
        }

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {:#}", e);
            }
        }
        if let Some(session) = self.session.take() {
            info!("Closing browser session");
            if let Err(e) = session.close().await {
                warn!("Failed to close browser session: {:#}", e);
            }
        }
        self.state = GeneratorState::Closed;
    }
}

/// Navigate, collect and render on an already open page
async fn generate_on_page(page: &dyn PageHandle, url: &str) -> GeneratorResult<String> {
    info!("Navigating to {}", url);
    page.goto(url).await.map_err(|e| GeneratorError::Navigation {
        url: url.to_string(),
        message: format!("{:#}", e),
    })?;

    let title = page.title().await.map_err(|e| GeneratorError::Navigation {
        url: url.to_string(),
        message: format!("could not read title: {:#}", e),
    })?;

    let elements = collect_elements(Some(page)).await?;
    let records = resolve_records(&elements).await;
    let model = GeneratedModel::new(&title, url, records);
    info!(
        "Generated {} with {} elements",
        model.class_name,
        model.records.len()
    );

    Ok(model.render())
}

/// Name and locate every collected element, one at a time, in collection order
pub async fn resolve_records(elements: &[CollectedElement]) -> Vec<PageObjectRecord> {
    let mut registry = NameRegistry::new();
    let mut records = Vec::with_capacity(elements.len());

    for collected in elements {
        let element = collected.element.as_ref();
        let name = registry.claim(&name_for_element(element, collected.category).await);
        let locator = derive_locator(element).await;
        debug!("{} {} -> {}", collected.category, name, locator);
        records.push(PageObjectRecord::new(name, collected.category, locator));
    }

    records
}
