use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Selector matching title anchors on the listing site (exact class signature).
pub const DEFAULT_TITLE_SELECTOR: &str =
    "a.sc-e6f263fc-0.sc-a0949da7-1.cTitej.eGjRhz.sc-4495ecbb-3.hCRsTs";

/// Selector for the list description block on the listing root page.
pub const DEFAULT_DESCRIPTION_SELECTOR: &str = "div.sc-9aba2448-0.elZUSK";

pub const DEFAULT_TRAKT_BASE_URL: &str = "https://api.trakt.tv";

/// Where titles are scraped from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root URL of the listing, e.g. `https://www.senscritique.com/liste/<slug>/<id>`.
    pub url: String,
    /// CSS selector for the title anchors on each page.
    pub title_selector: String,
    /// CSS selector for the list description element.
    pub description_selector: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            title_selector: DEFAULT_TITLE_SELECTOR.to_string(),
            description_selector: DEFAULT_DESCRIPTION_SELECTOR.to_string(),
        }
    }
}

/// Visibility of a list created on the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
    Friends,
}

/// Remote list service credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraktConfig {
    pub base_url: String,
    /// Application client id, sent as `trakt-api-key`.
    pub client_id: String,
    /// OAuth bearer token of the list owner.
    pub access_token: String,
    pub api_version: String,
    pub privacy: Privacy,
    /// Last line appended to every synced description.
    pub description_footer: String,
}

impl Default for TraktConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRAKT_BASE_URL.to_string(),
            client_id: String::new(),
            access_token: String::new(),
            api_version: "2".to_string(),
            privacy: Privacy::Public,
            description_footer: "(synced with sc2t)".to_string(),
        }
    }
}

/// Location of the local title snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Explicit path; defaults to `~/.cache/sc2t/titles.txt`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// HTTP client knobs. Unset timeouts leave libcurl defaults in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("sc2t/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

/// Global configuration loaded from `~/.config/sc2t/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sc2tConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Sc2tConfig {
    /// Reject configs that cannot possibly sync, before touching the network.
    pub fn validate(&self) -> Result<()> {
        self.validate_source()?;
        self.validate_trakt()
    }

    pub fn validate_source(&self) -> Result<()> {
        if self.source.url.trim().is_empty() {
            anyhow::bail!("source.url is not set");
        }
        Ok(())
    }

    pub fn validate_trakt(&self) -> Result<()> {
        if self.trakt.client_id.trim().is_empty() {
            anyhow::bail!("trakt.client_id is not set");
        }
        if self.trakt.access_token.trim().is_empty() {
            anyhow::bail!("trakt.access_token is not set");
        }
        Ok(())
    }

    /// Cache file path: explicit `[cache] path` or the XDG cache default.
    pub fn cache_path(&self) -> Result<PathBuf> {
        match &self.cache.path {
            Some(p) => Ok(p.clone()),
            None => default_cache_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sc2t")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn default_cache_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sc2t")?;
    Ok(xdg_dirs.place_cache_file("titles.txt")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Sc2tConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<Sc2tConfig> {
    if !path.exists() {
        let default_cfg = Sc2tConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: Sc2tConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
