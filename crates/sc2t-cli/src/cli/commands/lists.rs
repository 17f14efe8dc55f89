//! `sc2t lists` – show the caller's remote lists.

use anyhow::Result;
use sc2t_core::config::Sc2tConfig;
use sc2t_core::http::CurlTransport;
use sc2t_core::trakt::TraktClient;

pub fn run_lists(cfg: &Sc2tConfig) -> Result<()> {
    cfg.validate_trakt()?;
    let client = TraktClient::new(CurlTransport::new(&cfg.http), &cfg.trakt);
    let lists = client.lists()?;
    if lists.is_empty() {
        println!("No lists.");
    } else {
        println!("{:<10} {}", "ID", "NAME");
        for l in lists {
            println!("{:<10} {}", l.id(), l.name);
        }
    }
    Ok(())
}
