// tests/resolver_tests.rs

use remote_config_sync::document::ConfigDocument;
use remote_config_sync::resolver::{resolve, resolve_home_url, resolve_text, CachedFields, Defaults};
use url::Url;

fn defaults() -> Defaults {
    Defaults::default()
}

#[test]
fn empty_document_and_empty_cache_yield_compiled_defaults() {
    let d = defaults();
    let resolved = resolve(&ConfigDocument::default(), &CachedFields::default(), &d);

    assert_eq!(resolved.home_url, d.home_url);
    assert_eq!(resolved.user_agent, d.user_agent);
    assert_eq!(resolved.show_share_options, d.show_share_options);
    assert_eq!(resolved.external_app_url, d.external_app_url);
}

#[test]
fn incoming_home_url_wins_over_cache() {
    let doc = ConfigDocument {
        home_url: Some("https://fresh.example.com/".to_string()),
        ..ConfigDocument::default()
    };
    let cached = CachedFields {
        home_url: Some("https://old.com/".to_string()),
        ..CachedFields::default()
    };
    let resolved = resolve(&doc, &cached, &defaults());
    assert_eq!(resolved.home_url.as_str(), "https://fresh.example.com/");
}

#[test]
fn absent_home_url_retains_cached_value() {
    let cached = CachedFields {
        home_url: Some("https://old.com/".to_string()),
        ..CachedFields::default()
    };
    let resolved = resolve(&ConfigDocument::default(), &cached, &defaults());
    assert_eq!(resolved.home_url.as_str(), "https://old.com/");
}

#[test]
fn unparsable_incoming_home_url_behaves_like_absent() {
    let doc = ConfigDocument {
        home_url: Some("not a url".to_string()),
        ..ConfigDocument::default()
    };

    // No cache: compiled default, not the invalid string.
    let d = defaults();
    let resolved = resolve(&doc, &CachedFields::default(), &d);
    assert_eq!(resolved.home_url, d.home_url);

    // With cache: cached value.
    let cached = CachedFields {
        home_url: Some("https://old.com/".to_string()),
        ..CachedFields::default()
    };
    let resolved = resolve(&doc, &cached, &d);
    assert_eq!(resolved.home_url.as_str(), "https://old.com/");
}

#[test]
fn unparsable_cached_home_url_falls_through_to_default() {
    let fallback = Url::parse("https://fallback.example.com/").unwrap();
    let url = resolve_home_url(None, Some("garbage"), &fallback);
    assert_eq!(url, fallback);
}

#[test]
fn user_agent_is_trimmed_and_blank_counts_as_absent() {
    assert_eq!(
        resolve_text(Some("  Agent/1.0  "), None, "Default/1.0"),
        "Agent/1.0"
    );
    assert_eq!(resolve_text(Some("   "), None, "Default/1.0"), "Default/1.0");
    assert_eq!(
        resolve_text(Some(""), Some("Cached/1.0"), "Default/1.0"),
        "Cached/1.0"
    );
}

#[test]
fn share_options_cached_false_beats_default_true() {
    let cached = CachedFields {
        show_share_options: Some(false),
        ..CachedFields::default()
    };
    let resolved = resolve(&ConfigDocument::default(), &cached, &defaults());
    assert!(!resolved.show_share_options);
}

#[test]
fn incoming_share_options_overrides_cache() {
    let doc = ConfigDocument {
        show_share_options: Some(true),
        ..ConfigDocument::default()
    };
    let cached = CachedFields {
        show_share_options: Some(false),
        ..CachedFields::default()
    };
    let resolved = resolve(&doc, &cached, &defaults());
    assert!(resolved.show_share_options);
}

#[test]
fn resolution_is_idempotent_over_its_own_output() {
    let doc = ConfigDocument {
        home_url: Some("https://a.example.com/".to_string()),
        user_agent: Some("Agent/3.0".to_string()),
        show_share_options: Some(false),
        external_app_url: Some("myapp://".to_string()),
        version: Some(7),
    };
    let d = defaults();
    let first = resolve(&doc, &CachedFields::default(), &d);

    // Simulate the write-through: the cache now holds the resolved values.
    let cached = CachedFields {
        home_url: Some(first.home_url.to_string()),
        user_agent: Some(first.user_agent.clone()),
        show_share_options: Some(first.show_share_options),
        external_app_url: Some(first.external_app_url.clone()),
    };
    let second = resolve(&ConfigDocument::default(), &cached, &d);
    assert_eq!(first, second);
}

// --- Document decoding ---

#[test]
fn decode_rejects_non_object_bodies() {
    assert!(ConfigDocument::decode(b"[1, 2, 3]").is_err());
    assert!(ConfigDocument::decode(b"\"just a string\"").is_err());
    assert!(ConfigDocument::decode(b"not json at all").is_err());
}

#[test]
fn decode_treats_type_mismatch_as_absent() {
    let body = br#"{
        "home_url": true,
        "user_agent": 42,
        "show_share_options": "yes",
        "external_app_url": {"nested": 1},
        "version": "v1"
    }"#;
    let doc = ConfigDocument::decode(body).unwrap();
    assert!(doc.is_empty());
}

#[test]
fn decode_ignores_unknown_keys() {
    let body = br#"{"home_url": "https://a.example.com/", "future_field": [1]}"#;
    let doc = ConfigDocument::decode(body).unwrap();
    assert_eq!(doc.home_url.as_deref(), Some("https://a.example.com/"));
    assert_eq!(doc.user_agent, None);
}

#[test]
fn decode_accepts_partial_documents() {
    let doc = ConfigDocument::decode(b"{}").unwrap();
    assert!(doc.is_empty());

    let doc = ConfigDocument::decode(br#"{"version": 3}"#).unwrap();
    assert_eq!(doc.version, Some(3));
    assert_eq!(doc.home_url, None);
}
