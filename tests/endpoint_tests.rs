// tests/endpoint_tests.rs

use remote_config_sync::endpoint::EndpointResolver;
use remote_config_sync::events::{ConfigEvent, EventBus};
use remote_config_sync::storage::{keys, ConfigStore, MemoryStore};
use std::sync::Arc;
use url::Url;

fn default_endpoint() -> Url {
    Url::parse("https://default.example.workers.dev/").unwrap()
}

fn resolver_with_store() -> (EndpointResolver, Arc<MemoryStore>, EventBus) {
    let store = Arc::new(MemoryStore::new());
    let events = EventBus::default();
    let resolver = EndpointResolver::new(store.clone(), events.clone(), default_endpoint());
    (resolver, store, events)
}

#[tokio::test]
async fn resolves_default_when_no_override_stored() {
    let (resolver, _, _) = resolver_with_store();
    assert_eq!(resolver.resolve().await, default_endpoint());
}

#[tokio::test]
async fn valid_override_is_persisted_and_resolved() {
    let (resolver, store, _) = resolver_with_store();

    assert!(resolver.set_override(Some("https://custom.example.dev/")).await);
    assert_eq!(
        resolver.resolve().await.as_str(),
        "https://custom.example.dev/"
    );
    assert_eq!(
        store.get_string(keys::ENDPOINT_OVERRIDE).await.unwrap(),
        Some("https://custom.example.dev/".to_string())
    );
}

#[tokio::test]
async fn override_input_is_trimmed_before_storing() {
    let (resolver, store, _) = resolver_with_store();

    assert!(resolver.set_override(Some("  https://custom.example.dev/  ")).await);
    assert_eq!(
        store.get_string(keys::ENDPOINT_OVERRIDE).await.unwrap(),
        Some("https://custom.example.dev/".to_string())
    );
}

#[tokio::test]
async fn blank_override_clears_stored_value() {
    let (resolver, store, _) = resolver_with_store();
    assert!(resolver.set_override(Some("https://custom.example.dev/")).await);

    // Whitespace-only input counts as "clear", and clearing succeeds.
    assert!(resolver.set_override(Some("   ")).await);
    assert_eq!(store.get_string(keys::ENDPOINT_OVERRIDE).await.unwrap(), None);
    assert_eq!(resolver.resolve().await, default_endpoint());

    assert!(resolver.set_override(Some("https://custom.example.dev/")).await);
    assert!(resolver.set_override(None).await);
    assert_eq!(resolver.resolve().await, default_endpoint());
}

#[tokio::test]
async fn invalid_override_is_rejected_and_state_unchanged() {
    let (resolver, store, _) = resolver_with_store();
    assert!(resolver.set_override(Some("https://previous.example.dev/")).await);

    // No scheme, not an absolute URL.
    assert!(!resolver.set_override(Some("nonsense")).await);

    assert_eq!(
        store.get_string(keys::ENDPOINT_OVERRIDE).await.unwrap(),
        Some("https://previous.example.dev/".to_string())
    );
    assert_eq!(
        resolver.resolve().await.as_str(),
        "https://previous.example.dev/"
    );
}

#[tokio::test]
async fn invalid_override_with_no_prior_state_leaves_default() {
    let (resolver, store, _) = resolver_with_store();

    assert!(!resolver.set_override(Some("nonsense")).await);
    assert_eq!(store.get_string(keys::ENDPOINT_OVERRIDE).await.unwrap(), None);
    assert_eq!(resolver.resolve().await, default_endpoint());
}

#[tokio::test]
async fn successful_set_and_clear_emit_endpoint_changed() {
    let (resolver, _, events) = resolver_with_store();
    let mut rx = events.subscribe();

    assert!(resolver.set_override(Some("https://custom.example.dev/")).await);
    match rx.try_recv().unwrap() {
        ConfigEvent::EndpointChanged { endpoint } => {
            assert_eq!(endpoint.as_str(), "https://custom.example.dev/");
        }
        other => panic!("unexpected event: {other:?}"),
    }

    assert!(resolver.set_override(None).await);
    match rx.try_recv().unwrap() {
        ConfigEvent::EndpointChanged { endpoint } => {
            assert_eq!(endpoint, default_endpoint());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_override_emits_no_event() {
    let (resolver, _, events) = resolver_with_store();
    let mut rx = events.subscribe();

    assert!(!resolver.set_override(Some("nonsense")).await);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn stored_override_that_stopped_parsing_falls_back_to_default() {
    let (resolver, store, _) = resolver_with_store();

    // Written behind the resolver's back, e.g. by an older app version.
    store
        .set_string(keys::ENDPOINT_OVERRIDE, "no longer a url")
        .await
        .unwrap();
    assert_eq!(resolver.resolve().await, default_endpoint());
}
