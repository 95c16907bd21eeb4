//! In-memory browser used by the generator tests

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::types::ElementCategory;
use crate::driver::traits::{BrowserLauncher, BrowserSession, LiveNode, PageElement, PageHandle};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    text: String,
    hidden: bool,
    detached: bool,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.detached {
            anyhow::bail!("Element is not attached to the DOM");
        }
        Ok(())
    }
}

#[async_trait]
impl LiveNode for FakeElement {
    /// Mirrors the in-page locator rule
    async fn evaluate(&self, _script: &str) -> Result<Value> {
        self.ensure_attached()?;
        if let Some(id) = self.attributes.get("id").filter(|v| !v.is_empty()) {
            return Ok(json!({ "kind": "id", "value": id }));
        }
        if !self.classes.is_empty() {
            return Ok(json!({ "kind": "class", "value": self.classes }));
        }
        let text = self.text.trim();
        if !text.is_empty() {
            return Ok(json!({ "kind": "text", "value": text }));
        }
        if let Some(role) = self.attributes.get("role").filter(|v| !v.is_empty()) {
            return Ok(json!({ "kind": "role", "value": role }));
        }
        Ok(Value::Null)
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        self.ensure_attached()?;
        if name == "class" && !self.classes.is_empty() {
            return Ok(Some(self.classes.join(" ")));
        }
        Ok(self.attributes.get(name).cloned())
    }

    async fn inner_text(&self) -> Result<String> {
        self.ensure_attached()?;
        Ok(self.text.clone())
    }

    async fn is_visible(&self) -> Result<bool> {
        self.ensure_attached()?;
        Ok(!self.hidden)
    }
}

/// Shared log of what the fake browser was asked to do
#[derive(Debug, Default)]
pub struct FakeBrowserLog {
    pub launches: AtomicUsize,
    pub pages_opened: AtomicUsize,
    pub pages_closed: AtomicUsize,
    pub sessions_closed: AtomicUsize,
    pub visited: Mutex<Vec<String>>,
}

impl FakeBrowserLog {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone)]
pub struct FakePage {
    title: String,
    elements: Vec<(ElementCategory, FakeElement)>,
    unreachable: HashSet<String>,
    hanging: HashSet<String>,
    failing_queries: bool,
    log: Arc<FakeBrowserLog>,
}

impl FakePage {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            elements: Vec::new(),
            unreachable: HashSet::new(),
            hanging: HashSet::new(),
            failing_queries: false,
            log: Arc::new(FakeBrowserLog::default()),
        }
    }

    pub fn with(mut self, category: ElementCategory, element: FakeElement) -> Self {
        self.elements.push((category, element));
        self
    }

    /// Navigation to `url` fails
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    /// Navigation to `url` never completes
    pub fn hanging(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.failing_queries = true;
        self
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        if self.unreachable.contains(url) {
            anyhow::bail!("net::ERR_NAME_NOT_RESOLVED at {}", url);
        }
        if self.hanging.contains(url) {
            std::future::pending::<()>().await;
        }
        self.log.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.title.clone())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>> {
        if self.failing_queries {
            anyhow::bail!("Execution context was destroyed");
        }
        let category = ElementCategory::ALL
            .into_iter()
            .find(|c| c.query() == selector);

        Ok(self
            .elements
            .iter()
            .filter(|(c, _)| Some(*c) == category)
            .map(|(_, e)| Box::new(e.clone()) as Box<dyn PageElement>)
            .collect())
    }

    async fn close(&self) -> Result<()> {
        self.log.pages_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakeSession {
    page: FakePage,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn new_page(&self) -> Result<Box<dyn PageHandle>> {
        self.page.log.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.page.clone()))
    }

    async fn close(&self) -> Result<()> {
        self.page.log.sessions_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Launcher handing out sessions whose pages all look like `page`
pub struct FakeLauncher {
    page: FakePage,
    fail: bool,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self { page, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            page: FakePage::new(""),
            fail: true,
        }
    }

    pub fn log(&self) -> Arc<FakeBrowserLog> {
        self.page.log.clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        if self.fail {
            anyhow::bail!("Executable doesn't exist at /ms-playwright/chromium/chrome");
        }
        self.page.log.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            page: self.page.clone(),
        }))
    }
}
