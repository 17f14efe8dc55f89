//! `sc2t scrape` – scrape only; titles go to stdout and the cache.

use anyhow::Result;
use sc2t_core::cache::TitleCache;
use sc2t_core::config::Sc2tConfig;
use sc2t_core::http::CurlTransport;
use sc2t_core::pipeline;
use sc2t_core::scrape::{ScrapeEnd, Selectors};

pub fn run_scrape(cfg: &Sc2tConfig) -> Result<()> {
    cfg.validate_source()?;
    let selectors = Selectors::from_config(&cfg.source)?;
    let cache = TitleCache::new(cfg.cache_path()?);
    let transport = CurlTransport::new(&cfg.http);

    let outcome = pipeline::scrape_to_cache(&transport, &cfg.source.url, &selectors, &cache)?;
    for t in &outcome.titles {
        println!("{t}");
    }
    match &outcome.end {
        ScrapeEnd::Exhausted { empty_page } => eprintln!(
            "{} titles from {} page(s), cached at {}",
            outcome.titles.len(),
            empty_page - 1,
            cache.path().display()
        ),
        ScrapeEnd::Interrupted { page, error } => eprintln!(
            "scrape stopped at page {page}: {error} ({} titles kept)",
            outcome.titles.len()
        ),
    }
    Ok(())
}
