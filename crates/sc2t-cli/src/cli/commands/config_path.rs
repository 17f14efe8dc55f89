//! `sc2t config-path` – print where the config file lives.

use anyhow::Result;
use sc2t_core::config;

pub fn run_config_path() -> Result<()> {
    let path = config::config_path()?;
    println!("{}", path.display());
    if !path.exists() {
        println!("(not created yet; any other command writes the defaults there)");
    }
    Ok(())
}
