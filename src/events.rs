// src/events.rs

use tokio::sync::broadcast;
use tracing::trace;
use url::Url;

/// User-facing notification request attached to a home URL change. The
/// presentation layer decides whether this becomes a toast or a local
/// notification; the synchronizer only supplies the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartNotice {
    pub title: String,
    pub body: String,
    /// Icon identifier for the notification surface.
    pub symbol: String,
}

impl RestartNotice {
    /// Notice shown when the home URL changed. A restart is required
    /// instead of hot-swapping the active browsing session's origin.
    pub fn home_changed() -> Self {
        Self {
            title: "New content available".to_string(),
            body: "Restart the app to apply the updated configuration".to_string(),
            symbol: "gear.badge.checkmark".to_string(),
        }
    }
}

/// Discrete change events emitted by the synchronizer.
///
/// `UserAgentUpdated` and `UiFlagsUpdated` fire on every successful
/// resolution, changed or not; consumers are expected to no-op on
/// unchanged values. `HomeChanged` fires only on an actual change.
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    HomeChanged { home_url: Url, notice: RestartNotice },
    UserAgentUpdated { user_agent: String },
    UiFlagsUpdated {
        show_share_options: bool,
        external_app_url: String,
    },
    EndpointChanged { endpoint: Url },
}

/// Typed event channel owned by the synchronizer. Subscribers get their
/// own broadcast receiver; delivery order matches emission order and a
/// lagging subscriber only affects itself.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ConfigEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.sender.subscribe()
    }

    pub(crate) fn emit(&self, event: ConfigEvent) {
        // A send error only means nobody is subscribed right now.
        if self.sender.send(event).is_err() {
            trace!("Config event dropped: no active subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(32)
    }
}
