//! CLI command handlers, one file per subcommand.

mod config_path;
mod lists;
mod scrape;
mod sync;

pub use config_path::run_config_path;
pub use lists::run_lists;
pub use scrape::run_scrape;
pub use sync::run_sync;
