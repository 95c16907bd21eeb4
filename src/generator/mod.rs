//! Page object generation pipeline
//!
//! - Element collection: visible inputs, buttons and links
//! - Locator derivation, evaluated against the live node in the page
//! - Name synthesis with per-page collision suffixes
//! - TypeScript emission for `@playwright/test`

pub mod collector;
pub mod emitter;
pub mod locator;
pub mod naming;
pub mod orchestrator;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::{GeneratorState, PomGenerator};
pub use types::{ElementCategory, GeneratedModel, PageObjectRecord, FALLBACK_TOKEN};
