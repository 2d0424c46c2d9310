// src/endpoint.rs

use crate::error::{ConfigError, Result};
use crate::events::{ConfigEvent, EventBus};
use crate::storage::{keys, ConfigStore};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Decides which URL the fetcher targets: a user-supplied override when a
/// valid one is stored, otherwise the compiled default endpoint.
pub struct EndpointResolver {
    store: Arc<dyn ConfigStore>,
    events: EventBus,
    default_endpoint: Url,
}

impl EndpointResolver {
    pub fn new(store: Arc<dyn ConfigStore>, events: EventBus, default_endpoint: Url) -> Self {
        Self {
            store,
            events,
            default_endpoint,
        }
    }

    /// Resolve the effective endpoint. Infallible: an unreadable or
    /// unparsable override falls back to the default.
    pub async fn resolve(&self) -> Url {
        match self.store.get_string(keys::ENDPOINT_OVERRIDE).await {
            Ok(Some(raw)) => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    if let Ok(url) = Url::parse(trimmed) {
                        return url;
                    }
                    warn!(override = %trimmed, "Stored endpoint override no longer parses, using default");
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read endpoint override, using default"),
        }
        self.default_endpoint.clone()
    }

    /// Set or clear the endpoint override. `None` or a blank string clears
    /// the override ("cleared" counts as success). An input that does not
    /// parse as an absolute URL is rejected and leaves stored state
    /// untouched. Emits `EndpointChanged` with the now-effective endpoint
    /// on every successful call.
    pub async fn set_override(&self, raw: Option<&str>) -> bool {
        match self.apply_override(raw).await {
            Ok(endpoint) => {
                info!(endpoint = %endpoint, "Endpoint override updated");
                self.events.emit(ConfigEvent::EndpointChanged { endpoint });
                true
            }
            Err(e) => {
                warn!(error = %e, "Endpoint override not applied");
                false
            }
        }
    }

    async fn apply_override(&self, raw: Option<&str>) -> Result<Url> {
        let trimmed = raw.map(str::trim).unwrap_or("");
        if trimmed.is_empty() {
            self.store.remove(keys::ENDPOINT_OVERRIDE).await?;
            return Ok(self.default_endpoint.clone());
        }

        // Url::parse only succeeds for absolute URLs, so a successful
        // parse implies a non-empty scheme.
        let url =
            Url::parse(trimmed).map_err(|_| ConfigError::override_rejected(trimmed))?;
        self.store.set_string(keys::ENDPOINT_OVERRIDE, trimmed).await?;
        Ok(url)
    }

    /// The stored override string, if any (diagnostic surface).
    pub async fn stored_override(&self) -> Result<Option<String>> {
        self.store.get_string(keys::ENDPOINT_OVERRIDE).await
    }
}
