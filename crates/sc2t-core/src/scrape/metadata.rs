//! List name and description from the listing root page.

use chrono::NaiveDateTime;
use scraper::{Html, Selector};

use super::Selectors;
use crate::http::{self, Transport};

/// Name, description and origin of a scraped list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDescriptor {
    pub name: String,
    pub description: String,
    pub source_url: String,
}

impl ListDescriptor {
    /// Description sent to the list service: scraped text, source URL, sync time and footer.
    pub fn compose_description(&self, now: NaiveDateTime, footer: &str) -> String {
        format!(
            "{}\n\nSource URL: {}\n\nThis list was last updated on {}\n{}",
            self.description,
            self.source_url,
            now.format("%Y-%m-%d %H:%M:%S"),
            footer
        )
    }
}

/// Parse the root page. `None` when the document has no non-empty `<title>`.
pub fn parse_list_info(html: &str, url: &str, selectors: &Selectors) -> Option<ListDescriptor> {
    let document = Html::parse_document(html);
    let title = Selector::parse("title").ok()?;
    let name = document
        .select(&title)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())?;
    let description = document
        .select(&selectors.description)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    Some(ListDescriptor {
        name,
        description,
        source_url: url.to_string(),
    })
}

/// Fetch the root page once and read its list info. Failures are logged and yield `None`.
pub fn extract_list_info<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    selectors: &Selectors,
) -> Option<ListDescriptor> {
    let html = match http::get_text(transport, url) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("failed to fetch list page {}: {:#}", url, e);
            return None;
        }
    };
    let info = parse_list_info(&html, url, selectors);
    match &info {
        Some(d) => tracing::info!(name = %d.name, "extracted list info"),
        None => tracing::error!("list page {} has no usable <title>", url),
    }
    info
}
