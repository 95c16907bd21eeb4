use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Starts a browser and hands back a live session.
///
/// The generator only ever talks to a browser through these traits, so the
/// Playwright backend can be swapped for an in-memory fake in tests.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch (or connect to) a browser
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A running browser with its own context
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Open a new page (tab) in the session context
    async fn new_page(&self) -> Result<Box<dyn PageHandle>>;

    /// Release the browser. Implementations must tolerate repeated calls.
    async fn close(&self) -> Result<()>;
}

/// The page capability used by the collector and the orchestrator
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Navigate to a URL and wait for the load event
    async fn goto(&self, url: &str) -> Result<()>;

    /// Current document title
    async fn title(&self) -> Result<String>;

    /// All elements matching `selector`, in document order.
    ///
    /// The returned handles are a snapshot; issue a new query to re-observe the page.
    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>>;

    /// Close the page
    async fn close(&self) -> Result<()>;
}

/// Runs a pure extraction function against a live DOM node inside the page.
///
/// `script` is a JavaScript function expression taking the node as its only
/// argument; its JSON-serializable return value is handed back as-is.
#[async_trait]
pub trait LiveNode: Send + Sync {
    async fn evaluate(&self, script: &str) -> Result<Value>;
}

/// An element handle returned by [`PageHandle::query_all`]
#[async_trait]
pub trait PageElement: LiveNode {
    /// Attribute value, `None` when the attribute is absent
    async fn get_attribute(&self, name: &str) -> Result<Option<String>>;

    /// Rendered text (`innerText`)
    async fn inner_text(&self) -> Result<String>;

    /// Whether the element is currently rendered perceivable
    async fn is_visible(&self) -> Result<bool>;
}
