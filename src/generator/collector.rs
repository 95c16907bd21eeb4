use log::{debug, info};

use super::types::ElementCategory;
use crate::driver::traits::{PageElement, PageHandle};
use crate::error::{GeneratorError, GeneratorResult};

/// A visible element together with the category whose query found it
pub struct CollectedElement {
    pub category: ElementCategory,
    pub element: Box<dyn PageElement>,
}

/// Query the page for inputs, buttons and links, keeping visible ones only.
///
/// Categories come back in the order input, button, link; each in document order.
/// Nothing is deduplicated: an `input[type=submit]` is both an input and a button.
pub async fn collect_elements(
    page: Option<&dyn PageHandle>,
) -> GeneratorResult<Vec<CollectedElement>> {
    let page = page.ok_or_else(|| {
        GeneratorError::Initialization("no page available for element collection".into())
    })?;

    let mut collected = Vec::new();
    for category in ElementCategory::ALL {
        let candidates = page
            .query_all(category.query())
            .await
            .map_err(|e| GeneratorError::Browser(format!("{} query failed: {:#}", category, e)))?;

        let total = candidates.len();
        let mut visible = 0;
        for element in candidates {
            if is_visible(element.as_ref()).await {
                visible += 1;
                collected.push(CollectedElement { category, element });
            }
        }
        info!("Found {} visible {} elements ({} matched)", visible, category, total);
    }

    Ok(collected)
}

async fn is_visible(element: &dyn PageElement) -> bool {
    match element.is_visible().await {
        Ok(visible) => visible,
        Err(e) => {
            debug!("Visibility check failed, skipping element: {:#}", e);
            false
        }
    }
}
