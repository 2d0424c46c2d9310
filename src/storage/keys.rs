// src/storage/keys.rs

//! Logical names of the persisted values. Physical storage is up to the
//! `ConfigStore` implementation.

/// Last resolved home URL.
pub const CACHED_HOME_URL: &str = "remote_home_url";

/// Last resolved user agent string.
pub const CACHED_USER_AGENT: &str = "cached_user_agent";

/// Last resolved share-menu visibility flag.
pub const SHOW_SHARE_OPTIONS: &str = "remote_show_share_options";

/// Last resolved external-app URL.
pub const EXTERNAL_APP_URL: &str = "remote_external_app_url";

/// User-supplied endpoint override, stored independently of the
/// resolved configuration.
pub const ENDPOINT_OVERRIDE: &str = "remote_endpoint_override";
