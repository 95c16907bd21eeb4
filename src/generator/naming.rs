//! Property/method name synthesis

use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::types::{ElementCategory, FALLBACK_TOKEN};
use crate::driver::traits::PageElement;

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

/// Strip every character that is not an ASCII letter or digit
pub fn sanitize_identifier(raw: &str) -> String {
    NON_ALPHANUMERIC.replace_all(raw, "").into_owned()
}

/// Build a name such as `usernameInput` from a base string and a category.
///
/// A base that sanitizes to nothing is replaced by the fallback token.
pub fn synthesize_name(base: &str, category: ElementCategory) -> String {
    let mut name = sanitize_identifier(base);
    if name.is_empty() {
        name.push_str(FALLBACK_TOKEN);
    }
    name.push_str(category.suffix());
    name
}

/// Pick the base for a name: `id`, then `name`, then trimmed text
pub fn pick_base<'a>(id: Option<&'a str>, name: Option<&'a str>, text: Option<&'a str>) -> &'a str {
    [id, name, text.map(str::trim)]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .unwrap_or(FALLBACK_TOKEN)
}

/// Read the identity hints of a live element and synthesize its name.
///
/// Read failures count as absent values.
pub async fn name_for_element<E>(element: &E, category: ElementCategory) -> String
where
    E: PageElement + ?Sized,
{
    let id = read_attribute(element, "id").await;
    let name = read_attribute(element, "name").await;
    let text = if id.as_deref().is_some_and(|v| !v.is_empty())
        || name.as_deref().is_some_and(|v| !v.is_empty())
    {
        None
    } else {
        match element.inner_text().await {
            Ok(t) => Some(t),
            Err(e) => {
                debug!("Failed to read element text: {:#}", e);
                None
            }
        }
    };

    synthesize_name(
        pick_base(id.as_deref(), name.as_deref(), text.as_deref()),
        category,
    )
}

async fn read_attribute<E>(element: &E, attribute: &str) -> Option<String>
where
    E: PageElement + ?Sized,
{
    match element.get_attribute(attribute).await {
        Ok(value) => value,
        Err(e) => {
            debug!("Failed to read attribute '{}': {:#}", attribute, e);
            None
        }
    }
}

/// Hands out unique names within one generation pass.
///
/// The first occurrence of a name is kept as-is, later ones get `2`, `3`, ...
#[derive(Debug, Default)]
pub struct NameRegistry {
    next_suffix: HashMap<String, u32>,
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, returning it or a suffixed variant if already taken
    pub fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_string()) {
            self.next_suffix.insert(name.to_string(), 2);
            return name.to_string();
        }

        let next = self.next_suffix.entry(name.to_string()).or_insert(2);
        loop {
            let candidate = format!("{}{}", name, next);
            *next += 1;
            if self.taken.insert(candidate.clone()) {
                debug!("Name '{}' already used, renamed to '{}'", name, candidate);
                return candidate;
            }
        }
    }
}
