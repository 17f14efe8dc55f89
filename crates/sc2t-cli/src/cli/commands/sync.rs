//! `sc2t sync` – scrape the listing and sync the remote list.

use anyhow::Result;
use sc2t_core::cache::TitleCache;
use sc2t_core::config::Sc2tConfig;
use sc2t_core::http::CurlTransport;
use sc2t_core::pipeline::{self, RunOptions, RunReport};
use sc2t_core::scrape::ScrapeEnd;
use sc2t_core::trakt::{ListAction, SyncMode, SyncOutcome};

pub fn run_sync(cfg: &Sc2tConfig, from_cache: bool, dry_run: bool) -> Result<()> {
    cfg.validate()?;
    let cache = TitleCache::new(cfg.cache_path()?);
    let transport = CurlTransport::new(&cfg.http);
    let opts = RunOptions {
        from_cache,
        mode: if dry_run {
            SyncMode::DryRun
        } else {
            SyncMode::Apply
        },
    };

    let now = chrono::Local::now().naive_local();
    let report = pipeline::run(&transport, cfg, &cache, &opts, now)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    match &report.scrape {
        None => println!("Using {} cached titles.", report.titles.len()),
        Some(ScrapeEnd::Exhausted { .. }) => println!("Scraped {} titles.", report.titles.len()),
        Some(ScrapeEnd::Interrupted { page, error }) => println!(
            "Scraped {} titles; stopped at page {page}: {error}",
            report.titles.len()
        ),
    }

    let Some(list) = &report.list else {
        println!("Failed to extract the name of the list; nothing synced.");
        return;
    };

    match &report.sync {
        Some(SyncOutcome::Synced {
            list_id,
            action,
            items,
        }) => {
            let verb = match action {
                ListAction::Created => "Created",
                ListAction::Updated => "Updated",
            };
            println!("{verb} list '{}' (id {list_id}).", list.name);
            match items {
                None => println!("No titles to add."),
                Some(items) => {
                    let added = items
                        .added
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    println!("Submitted {} shows, {added} added.", items.submitted);
                    for t in &items.not_found {
                        println!("  not found: {t}");
                    }
                }
            }
        }
        Some(SyncOutcome::Planned {
            existing_id,
            titles,
        }) => match existing_id {
            Some(id) => println!(
                "Would update list '{}' (id {id}) and add {titles} shows.",
                list.name
            ),
            None => println!("Would create list '{}' and add {titles} shows.", list.name),
        },
        Some(SyncOutcome::Failed {
            stage, message, ..
        }) => println!("Sync of '{}' failed at {:?}: {message}", list.name, stage),
        None => {}
    }
}
