//! One sync run: titles, then list info, then the remote list.

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::cache::TitleCache;
use crate::config::Sc2tConfig;
use crate::http::Transport;
use crate::scrape::{self, ListDescriptor, ScrapeEnd, ScrapeOutcome, Selectors};
use crate::trakt::{sync_list, SyncMode, SyncOutcome, TraktClient};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Reuse a non-empty cache instead of resetting it and scraping.
    pub from_cache: bool,
    pub mode: SyncMode,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub titles: Vec<String>,
    /// How scraping ended; `None` when titles came from the cache.
    pub scrape: Option<ScrapeEnd>,
    /// `None` when the list name could not be extracted; sync is then skipped.
    pub list: Option<ListDescriptor>,
    pub sync: Option<SyncOutcome>,
}

/// Reset the cache, scrape every page of `url` and store the titles in the cache.
pub fn scrape_to_cache<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    selectors: &Selectors,
    cache: &TitleCache,
) -> Result<ScrapeOutcome> {
    cache.reset()?;
    let outcome = scrape::scrape_titles(transport, url, &selectors.title);
    cache.write(&outcome.titles)?;
    Ok(outcome)
}

fn collect_titles<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    selectors: &Selectors,
    cache: &TitleCache,
    from_cache: bool,
) -> Result<(Vec<String>, Option<ScrapeEnd>)> {
    if from_cache {
        let cached = cache.read()?;
        if !cached.is_empty() {
            tracing::info!(
                count = cached.len(),
                "using cached titles from {}",
                cache.path().display()
            );
            return Ok((cached, None));
        }
    }
    let outcome = scrape_to_cache(transport, url, selectors, cache)?;
    Ok((outcome.titles, Some(outcome.end)))
}

/// Scrape (or read the cache), extract list info, then sync the remote list.
///
/// `Err` is reserved for local failures (bad selectors, cache I/O). Network
/// and service failures are logged and reported in the returned [`RunReport`].
pub fn run<T: Transport>(
    transport: &T,
    cfg: &Sc2tConfig,
    cache: &TitleCache,
    opts: &RunOptions,
    now: NaiveDateTime,
) -> Result<RunReport> {
    let url = cfg.source.url.as_str();
    let selectors = Selectors::from_config(&cfg.source)?;

    let (titles, scrape) = collect_titles(transport, url, &selectors, cache, opts.from_cache)?;
    if let Some(ScrapeEnd::Interrupted { page, .. }) = &scrape {
        tracing::warn!(
            "scrape stopped early at page {}; syncing {} titles",
            page,
            titles.len()
        );
    }

    let Some(list) = scrape::extract_list_info(transport, url, &selectors) else {
        tracing::error!("failed to extract the name of the list from {}", url);
        return Ok(RunReport {
            titles,
            scrape,
            list: None,
            sync: None,
        });
    };

    let client = TraktClient::new(transport, &cfg.trakt);
    let sync = sync_list(&client, &list, &titles, now, opts.mode);

    Ok(RunReport {
        titles,
        scrape,
        list: Some(list),
        sync: Some(sync),
    })
}
