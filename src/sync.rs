// src/sync.rs

use crate::document::ConfigDocument;
use crate::endpoint::EndpointResolver;
use crate::error::Result;
use crate::events::{ConfigEvent, EventBus, RestartNotice};
use crate::fetcher::ConfigFetcher;
use crate::resolver::{self, CachedFields, Defaults, ResolvedConfig};
use crate::storage::{keys, ConfigStore};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use url::Url;

/// Raw document of the last successful fetch plus its timestamp, kept for
/// the diagnostic surface only; resolution never reads it back.
#[derive(Debug, Clone)]
pub struct FetchSnapshot {
    pub document: ConfigDocument,
    pub fetched_at: DateTime<Utc>,
}

struct SyncState {
    resolved: ResolvedConfig,
    /// Generation of the last applied fetch; completions older than this
    /// are discarded so a reordered response cannot overwrite newer state.
    applied_generation: u64,
    last_fetch: Option<FetchSnapshot>,
}

/// The configuration synchronizer.
///
/// Owns the persistent store, the HTTP fetcher, the event channel and the
/// resolved state. Cheap to share via `Arc`; consumers read resolved
/// values through accessors and subscribe for change events, never through
/// shared mutable state.
pub struct RemoteConfig {
    store: Arc<dyn ConfigStore>,
    fetcher: ConfigFetcher,
    endpoint: EndpointResolver,
    events: EventBus,
    defaults: Defaults,
    state: Mutex<SyncState>,
    generation: AtomicU64,
}

impl RemoteConfig {
    /// Build a synchronizer with the crate's compiled defaults.
    pub async fn new(store: Arc<dyn ConfigStore>) -> Result<Arc<Self>> {
        Self::with_defaults(store, Defaults::default()).await
    }

    /// Build a synchronizer with application-supplied defaults.
    ///
    /// Resolved state starts from the persistent store, falling back to
    /// the defaults for never-written fields. Initialization only reads;
    /// the first write-through happens on the first successful refresh.
    pub async fn with_defaults(store: Arc<dyn ConfigStore>, defaults: Defaults) -> Result<Arc<Self>> {
        let events = EventBus::default();
        let endpoint =
            EndpointResolver::new(store.clone(), events.clone(), defaults.endpoint.clone());
        let fetcher = ConfigFetcher::new()?;

        let cached = load_cached(store.as_ref()).await;
        let resolved = resolver::resolve(&ConfigDocument::default(), &cached, &defaults);
        info!(home_url = %resolved.home_url, "Resolved configuration initialized from store");

        Ok(Arc::new(Self {
            store,
            fetcher,
            endpoint,
            events,
            defaults,
            state: Mutex::new(SyncState {
                resolved,
                applied_generation: 0,
                last_fetch: None,
            }),
            generation: AtomicU64::new(0),
        }))
    }

    /// Subscribe to configuration change events.
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.events.subscribe()
    }

    /// Fetch, decode, resolve, persist and notify, once.
    ///
    /// Transport and decode failures return the error with no state
    /// change; callers invoking this from lifecycle hooks are expected to
    /// log and keep the stale values (see [`RemoteConfig::spawn_refresh`]).
    pub async fn refresh(&self) -> Result<ResolvedConfig> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let endpoint = self.endpoint.resolve().await;
        let body = self.fetcher.fetch(&endpoint).await?;
        let document = ConfigDocument::decode(&body)?;
        self.apply(document, generation).await
    }

    /// Fire-and-forget refresh for lifecycle hooks (app start, foreground
    /// transition, explicit user refresh). Failures are logged and
    /// swallowed: staleness is preferable to erroring out the client.
    pub fn spawn_refresh(self: &Arc<Self>) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.refresh().await {
                debug!(error = %e, "Config refresh failed, keeping stale values");
            }
        });
    }

    /// Apply a decoded document. Resolution, persistence and the
    /// previous-value diff all happen inside one critical section, so
    /// observers never see a torn `ResolvedConfig`.
    pub(crate) async fn apply(
        &self,
        document: ConfigDocument,
        generation: u64,
    ) -> Result<ResolvedConfig> {
        let mut state = self.state.lock().await;
        if generation <= state.applied_generation {
            debug!(
                generation,
                applied = state.applied_generation,
                "Discarding stale fetch result"
            );
            return Ok(state.resolved.clone());
        }

        let cached = load_cached(self.store.as_ref()).await;
        let previous_home = state.resolved.home_url.clone();
        let resolved = resolver::resolve(&document, &cached, &self.defaults);

        self.persist(&resolved).await?;

        state.resolved = resolved.clone();
        state.applied_generation = generation;
        state.last_fetch = Some(FetchSnapshot {
            document,
            fetched_at: Utc::now(),
        });

        if previous_home.as_str() != resolved.home_url.as_str() {
            info!(
                previous = %previous_home,
                current = %resolved.home_url,
                "Home URL changed, restart required to apply"
            );
            self.events.emit(ConfigEvent::HomeChanged {
                home_url: resolved.home_url.clone(),
                notice: RestartNotice::home_changed(),
            });
        }
        self.events.emit(ConfigEvent::UserAgentUpdated {
            user_agent: resolved.user_agent.clone(),
        });
        self.events.emit(ConfigEvent::UiFlagsUpdated {
            show_share_options: resolved.show_share_options,
            external_app_url: resolved.external_app_url.clone(),
        });

        Ok(resolved)
    }

    /// Write every resolved field through to the store, regardless of
    /// which tier supplied it, so the cache always reflects the last
    /// resolved value.
    async fn persist(&self, resolved: &ResolvedConfig) -> Result<()> {
        self.store
            .set_string(keys::CACHED_HOME_URL, resolved.home_url.as_str())
            .await?;
        self.store
            .set_string(keys::CACHED_USER_AGENT, &resolved.user_agent)
            .await?;
        self.store
            .set_bool(keys::SHOW_SHARE_OPTIONS, resolved.show_share_options)
            .await?;
        self.store
            .set_string(keys::EXTERNAL_APP_URL, &resolved.external_app_url)
            .await?;
        Ok(())
    }

    // --- Accessors ---

    /// Current resolved configuration (cloned snapshot).
    pub async fn resolved(&self) -> ResolvedConfig {
        self.state.lock().await.resolved.clone()
    }

    /// Resolved home URL, read by the browser host for navigation.
    pub async fn home_url(&self) -> Url {
        self.state.lock().await.resolved.home_url.clone()
    }

    /// Resolved user agent, read by the browser host before page load.
    pub async fn user_agent(&self) -> String {
        self.state.lock().await.resolved.user_agent.clone()
    }

    /// Share-menu visibility flag, read by UI menu logic.
    pub async fn show_share_options(&self) -> bool {
        self.state.lock().await.resolved.show_share_options
    }

    /// External application URL, read by UI menu logic.
    pub async fn external_app_url(&self) -> String {
        self.state.lock().await.resolved.external_app_url.clone()
    }

    /// Last successful fetch (diagnostic surface), if any this run.
    pub async fn last_fetch(&self) -> Option<FetchSnapshot> {
        self.state.lock().await.last_fetch.clone()
    }

    /// Effective fetch endpoint.
    pub async fn resolve_endpoint(&self) -> Url {
        self.endpoint.resolve().await
    }

    /// Set or clear the endpoint override; see
    /// [`EndpointResolver::set_override`].
    pub async fn set_endpoint_override(&self, raw: Option<&str>) -> bool {
        self.endpoint.set_override(raw).await
    }

    /// Stored endpoint override string, if any (diagnostic surface).
    pub async fn stored_endpoint_override(&self) -> Option<String> {
        self.endpoint.stored_override().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read endpoint override");
            None
        })
    }
}

/// Read the cached tier, treating storage failures as never-written keys.
async fn load_cached(store: &dyn ConfigStore) -> CachedFields {
    CachedFields {
        home_url: read_string(store, keys::CACHED_HOME_URL).await,
        user_agent: read_string(store, keys::CACHED_USER_AGENT).await,
        show_share_options: match store.get_bool(keys::SHOW_SHARE_OPTIONS).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = keys::SHOW_SHARE_OPTIONS, error = %e, "Cache read failed");
                None
            }
        },
        external_app_url: read_string(store, keys::EXTERNAL_APP_URL).await,
    }
}

async fn read_string(store: &dyn ConfigStore, key: &str) -> Option<String> {
    match store.get_string(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Cache read failed");
            None
        }
    }
}
