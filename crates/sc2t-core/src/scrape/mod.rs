//! Paginated listing scraper.
//!
//! Requests `base?page=1`, `base?page=2`, ... and collects the normalized
//! titles of every matching anchor. Stops at the first page with no match, or
//! at the first failure, keeping whatever was collected before it.

mod metadata;
mod parse;

pub use metadata::{extract_list_info, parse_list_info, ListDescriptor};
pub use parse::{extract_titles, normalize_title, normalize_ws};

use anyhow::{Context, Result};
use scraper::Selector;
use url::Url;

use crate::config::SourceConfig;
use crate::http::{self, Transport};

/// Compiled CSS selectors for the listing markup.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub title: Selector,
    pub description: Selector,
}

impl Selectors {
    pub fn from_config(cfg: &SourceConfig) -> Result<Self> {
        Ok(Self {
            title: parse_selector(&cfg.title_selector).context("source.title_selector")?,
            description: parse_selector(&cfg.description_selector)
                .context("source.description_selector")?,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow::anyhow!("invalid CSS selector {:?}: {:?}", s, e))
}

/// Why scraping stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEnd {
    /// `empty_page` returned no matching elements: end of data.
    Exhausted { empty_page: u32 },
    /// Fetching `page` failed; titles from earlier pages are kept.
    Interrupted { page: u32, error: String },
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub titles: Vec<String>,
    pub end: ScrapeEnd,
}

impl ScrapeOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.end, ScrapeEnd::Exhausted { .. })
    }
}

/// URL of listing page `page`: `base` with its `page` query parameter set.
pub fn page_url(base: &str, page: u32) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("invalid listing URL {:?}", base))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Scrape every page of `base_url` until one has no matching title element.
pub fn scrape_titles<T: Transport + ?Sized>(
    transport: &T,
    base_url: &str,
    selector: &Selector,
) -> ScrapeOutcome {
    let mut titles = Vec::new();
    let mut page = 1u32;

    loop {
        let html = match page_url(base_url, page)
            .and_then(|url| http::get_text(transport, url.as_str()))
        {
            Ok(html) => html,
            Err(e) => {
                let error = format!("{:#}", e);
                tracing::warn!(
                    page,
                    kept = titles.len(),
                    "error while scraping page {}: {}",
                    page,
                    error
                );
                return ScrapeOutcome {
                    titles,
                    end: ScrapeEnd::Interrupted { page, error },
                };
            }
        };

        let found = extract_titles(&html, selector);
        if found.is_empty() {
            tracing::info!(pages = page - 1, titles = titles.len(), "scrape finished");
            return ScrapeOutcome {
                titles,
                end: ScrapeEnd::Exhausted { empty_page: page },
            };
        }
        tracing::debug!(page, count = found.len(), "scraped page");
        titles.extend(found.into_iter().filter(|t| !t.is_empty()));
        page += 1;
    }
}
