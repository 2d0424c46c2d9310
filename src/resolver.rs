// src/resolver.rs

//! Three-tier per-field resolution: valid incoming value, then previously
//! cached value, then compiled default. Pure functions of their inputs so
//! the fallback chain is testable without storage or network.

use crate::document::ConfigDocument;
use once_cell::sync::Lazy;
use url::Url;

static DEFAULT_ENDPOINT: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://remote-config.example.workers.dev/")
        .expect("compiled default endpoint must parse")
});

static DEFAULT_HOME_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://app.example.com/").expect("compiled default home URL must parse")
});

const DEFAULT_USER_AGENT: &str = "RemoteConfigSync/0.1";
const DEFAULT_EXTERNAL_APP_URL: &str = "example-app://";

/// Compiled-in defaults, the last tier of every fallback chain.
///
/// `Default::default()` carries the crate's own constants; an embedding
/// application normally supplies its own endpoint, home URL and user agent.
#[derive(Debug, Clone)]
pub struct Defaults {
    /// Endpoint the fetcher targets when no override is stored.
    pub endpoint: Url,
    /// Home URL used when neither the server nor the cache supplies one.
    pub home_url: Url,
    pub user_agent: String,
    pub external_app_url: String,
    pub show_share_options: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.clone(),
            home_url: DEFAULT_HOME_URL.clone(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            external_app_url: DEFAULT_EXTERNAL_APP_URL.to_string(),
            show_share_options: true,
        }
    }
}

/// The authoritative configuration. Every field is guaranteed populated
/// after resolution: default, cached, or fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub home_url: Url,
    pub user_agent: String,
    pub show_share_options: bool,
    pub external_app_url: String,
}

/// Snapshot of the cached tier, read from the persistent store before a
/// resolution. Absent or never-written keys stay `None`.
#[derive(Debug, Clone, Default)]
pub struct CachedFields {
    pub home_url: Option<String>,
    pub user_agent: Option<String>,
    pub show_share_options: Option<bool>,
    pub external_app_url: Option<String>,
}

/// Resolve a full document against the cached tier and compiled defaults.
pub fn resolve(doc: &ConfigDocument, cached: &CachedFields, defaults: &Defaults) -> ResolvedConfig {
    ResolvedConfig {
        home_url: resolve_home_url(
            doc.home_url.as_deref(),
            cached.home_url.as_deref(),
            &defaults.home_url,
        ),
        user_agent: resolve_text(
            doc.user_agent.as_deref(),
            cached.user_agent.as_deref(),
            &defaults.user_agent,
        ),
        show_share_options: doc
            .show_share_options
            .or(cached.show_share_options)
            .unwrap_or(defaults.show_share_options),
        external_app_url: resolve_text(
            doc.external_app_url.as_deref(),
            cached.external_app_url.as_deref(),
            &defaults.external_app_url,
        ),
    }
}

/// Unlike the text fields, `home_url` must parse as an absolute URL; an
/// incoming string that does not parse behaves exactly like an absent field.
pub fn resolve_home_url(incoming: Option<&str>, cached: Option<&str>, fallback: &Url) -> Url {
    incoming
        .and_then(|raw| Url::parse(raw).ok())
        .or_else(|| cached.and_then(|raw| Url::parse(raw).ok()))
        .unwrap_or_else(|| fallback.clone())
}

/// Shared chain for `user_agent` and `external_app_url`: first non-empty
/// trimmed string wins.
pub fn resolve_text(incoming: Option<&str>, cached: Option<&str>, default: &str) -> String {
    non_empty_trimmed(incoming)
        .or_else(|| non_empty_trimmed(cached))
        .unwrap_or_else(|| default.to_string())
}

fn non_empty_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
