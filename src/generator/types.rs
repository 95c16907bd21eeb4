use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used whenever a locator or a name cannot be derived
pub const FALLBACK_TOKEN: &str = "Unknown";

/// Kind of interactive element; decides which methods get emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    Input,
    Button,
    Link,
}

impl ElementCategory {
    /// Collection order used by the collector
    pub const ALL: [ElementCategory; 3] = [
        ElementCategory::Input,
        ElementCategory::Button,
        ElementCategory::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Input => "input",
            ElementCategory::Button => "button",
            ElementCategory::Link => "link",
        }
    }

    /// Category name with the first letter upper-cased, used as name suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            ElementCategory::Input => "Input",
            ElementCategory::Button => "Button",
            ElementCategory::Link => "Link",
        }
    }

    /// CSS selector used to find candidates of this category
    pub fn query(&self) -> &'static str {
        match self {
            ElementCategory::Input => "input, textarea",
            ElementCategory::Button => r#"button, input[type="button"], input[type="submit"]"#,
            ElementCategory::Link => "a[href]",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interactive element resolved to a name and a locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageObjectRecord {
    pub name: String,
    pub category: ElementCategory,
    pub locator: String,
}

impl PageObjectRecord {
    /// Build a record, substituting the fallback token for empty fields
    pub fn new(
        name: impl Into<String>,
        category: ElementCategory,
        locator: impl Into<String>,
    ) -> Self {
        let name = non_empty_or_fallback(name.into());
        let locator = non_empty_or_fallback(locator.into());
        Self {
            name,
            category,
            locator,
        }
    }
}

fn non_empty_or_fallback(value: String) -> String {
    if value.is_empty() {
        FALLBACK_TOKEN.to_string()
    } else {
        value
    }
}

/// Everything the emitter needs to render one page object class
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedModel {
    pub class_name: String,
    pub url: String,
    pub records: Vec<PageObjectRecord>,
}
