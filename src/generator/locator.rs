//! Locator derivation
//!
//! Priority order, checked against the live node inside the page:
//! id > class list > trimmed text > role > `Unknown`
//!
//! The whole rule runs as one function in the page so that the checks see the
//! same DOM state and cost a single round-trip. The page hands back a tagged
//! hint and the selector string is built here.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use super::types::FALLBACK_TOKEN;
use crate::driver::traits::LiveNode;

/// In-page extraction rule. First match wins.
pub const LOCATOR_SCRIPT: &str = r#"
el => {
    const id = el.getAttribute('id');
    if (id) return { kind: 'id', value: id };
    const classes = Array.from(el.classList || []).filter(c => c);
    if (classes.length) return { kind: 'class', value: classes };
    const text = (el.textContent || '').trim();
    if (text) return { kind: 'text', value: text };
    const role = el.getAttribute('role');
    if (role) return { kind: 'role', value: role };
    return null;
}
"#;

/// Result of [`LOCATOR_SCRIPT`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LocatorHint {
    Id(String),
    Class(Vec<String>),
    Text(String),
    Role(String),
}

impl LocatorHint {
    /// Selector string for this hint, `None` if the hint carries nothing usable
    pub fn to_selector(&self) -> Option<String> {
        match self {
            LocatorHint::Id(id) if !id.is_empty() => Some(format!("#{}", id)),
            LocatorHint::Class(classes) => {
                let classes: Vec<&str> = classes
                    .iter()
                    .map(|c| c.trim())
                    .filter(|c| !c.is_empty())
                    .collect();
                if classes.is_empty() {
                    None
                } else {
                    Some(format!(".{}", classes.join(".")))
                }
            }
            LocatorHint::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| format!("text={}", text))
            }
            LocatorHint::Role(role) if !role.is_empty() => Some(format!("[role=\"{}\"]", role)),
            _ => None,
        }
    }
}

/// Turn the raw value returned by the page into a selector or the fallback token
pub fn selector_from_value(value: Value) -> String {
    if value.is_null() {
        return FALLBACK_TOKEN.to_string();
    }

    match serde_json::from_value::<LocatorHint>(value) {
        Ok(hint) => hint
            .to_selector()
            .unwrap_or_else(|| FALLBACK_TOKEN.to_string()),
        Err(e) => {
            debug!("Unexpected locator hint shape: {}", e);
            FALLBACK_TOKEN.to_string()
        }
    }
}

/// Derive a reusable selector for `node`.
///
/// Never fails: a detached node, a navigation in flight or a script error all
/// yield the fallback token.
pub async fn derive_locator<N>(node: &N) -> String
where
    N: LiveNode + ?Sized,
{
    match node.evaluate(LOCATOR_SCRIPT).await {
        Ok(value) => selector_from_value(value),
        Err(e) => {
            debug!("Locator evaluation failed, using fallback: {:#}", e);
            FALLBACK_TOKEN.to_string()
        }
    }
}
