pub mod config;
pub mod logging;

pub mod cache;
pub mod http;
pub mod pipeline;
pub mod scrape;
pub mod trakt;
