//! CLI for sc2t.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sc2t_core::config::{self, Sc2tConfig};

use commands::{run_config_path, run_lists, run_scrape, run_sync};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sc2t")]
#[command(about = "sc2t: sync a scraped title list into a remote list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scrape the listing and create or update the remote list.
    Sync {
        /// Listing URL to scrape instead of `source.url` from the config.
        #[arg(long)]
        url: Option<String>,
        /// Reuse titles from the cache file when it is not empty.
        #[arg(long)]
        from_cache: bool,
        /// Look up the remote list but do not create, update or add anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Scrape the listing, print the titles and write them to the cache.
    Scrape {
        /// Listing URL to scrape instead of `source.url` from the config.
        #[arg(long)]
        url: Option<String>,
    },

    /// Show the remote lists of the authenticated user.
    Lists,

    /// Print the location of the config file.
    ConfigPath,
}

/// `--url` replaces `source.url`; every command reads the listing URL from there.
fn apply_url_override(cfg: &mut Sc2tConfig, url: Option<String>) {
    if let Some(url) = url {
        cfg.source.url = url;
    }
}

fn load_config(url: Option<String>) -> Result<Sc2tConfig> {
    let mut cfg = config::load_or_init()?;
    apply_url_override(&mut cfg, url);
    tracing::debug!("loaded config: {:?}", cfg.source);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Sync {
                url,
                from_cache,
                dry_run,
            } => run_sync(&load_config(url)?, from_cache, dry_run)?,
            CliCommand::Scrape { url } => run_scrape(&load_config(url)?)?,
            CliCommand::Lists => run_lists(&load_config(None)?)?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
