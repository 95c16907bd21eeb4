pub mod traits;
pub mod web;

pub use traits::{BrowserLauncher, BrowserSession, LiveNode, PageElement, PageHandle};
