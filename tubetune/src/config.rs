//! Startup configuration for the catalog client.

use eyre::Context;
use reqwest::Url;
use std::fmt;

/// Environment variable holding the catalog API key.
pub const API_KEY_VAR: &str = "TUBETUNE_API_KEY";
/// Environment variable holding the catalog API base URL.
pub const BASE_URL_VAR: &str = "TUBETUNE_BASE_URL";
/// Environment variable overriding [`DEFAULT_REGION_CODE`].
pub const REGION_VAR: &str = "TUBETUNE_REGION";

/// Region used for charts and category listings unless configured otherwise.
pub const DEFAULT_REGION_CODE: &str = "US";
/// Upstream category id for music.
pub const MUSIC_CATEGORY_ID: &str = "10";

/// Where and how to reach the catalog API.
///
/// The key and base URL have no defaults; both must be supplied at startup.
#[derive(Clone)]
pub struct CatalogConfig {
    api_key: String,
    base_url: Url,
    region_code: String,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            region_code: DEFAULT_REGION_CODE.to_string(),
        }
    }

    /// Like [`Self::new`], but rejects a blank key and a base URL that endpoint
    /// paths cannot be appended to.
    pub fn try_new(api_key: impl Into<String>, base_url: Url) -> eyre::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            eyre::bail!("the catalog API key must not be blank");
        }
        if base_url.cannot_be_a_base() {
            eyre::bail!("{base_url} cannot be used as a base URL");
        }
        Ok(Self::new(api_key, base_url))
    }

    pub fn with_region_code(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = region_code.into();
        self
    }

    /// Reads [`API_KEY_VAR`], [`BASE_URL_VAR`] and optionally [`REGION_VAR`].
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`], but with variables resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| eyre::eyre!("{API_KEY_VAR} must be set"))?;
        let base_url =
            lookup(BASE_URL_VAR).ok_or_else(|| eyre::eyre!("{BASE_URL_VAR} must be set"))?;
        let base_url = Url::parse(&base_url).with_context(|| format!("parse {BASE_URL_VAR}"))?;

        let mut config = Self::try_new(api_key, base_url)
            .with_context(|| format!("check {API_KEY_VAR} and {BASE_URL_VAR}"))?;
        if let Some(region_code) = lookup(REGION_VAR).filter(|r| !r.trim().is_empty()) {
            config = config.with_region_code(region_code);
        }
        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }
}

// Keep the key out of logs.
impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("region_code", &self.region_code)
            .finish()
    }
}
