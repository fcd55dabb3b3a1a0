//! Reveal toggle, clipboard copy and the copied marker.

mod common;

use std::time::{Duration, Instant};

use common::{client, RecordingClipboard, ScriptedTransport};
use passwordy::api::Method;
use passwordy::errors::PasswordyError;
use passwordy::vault::{copy_secret, CopyTracker, RevealCache, Visibility, MASK};
use serde_json::json;
use uuid::Uuid;

#[test]
fn toggle_reveals_then_masks_without_refetching() {
    let transport = ScriptedTransport::new();
    transport.respond(200, json!({"password": "hunter2"}));
    let api = client(&transport);
    let id = Uuid::new_v4();

    let mut cache = RevealCache::new();
    assert_eq!(cache.toggle(&api, id).unwrap(), Visibility::Revealed);
    assert_eq!(cache.display(id), "hunter2");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, format!("/api/v1/vault/{id}/reveal"));

    assert_eq!(cache.toggle(&api, id).unwrap(), Visibility::Masked);
    assert_eq!(cache.display(id), MASK);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn revealing_again_fetches_again() {
    let transport = ScriptedTransport::new();
    transport
        .respond(200, json!({"password": "old"}))
        .respond(200, json!({"password": "new"}));
    let api = client(&transport);
    let id = Uuid::new_v4();

    let mut cache = RevealCache::new();
    cache.toggle(&api, id).unwrap();
    cache.toggle(&api, id).unwrap();
    cache.toggle(&api, id).unwrap();
    assert_eq!(cache.get(id), Some("new"));
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn failed_reveal_stays_masked() {
    let transport = ScriptedTransport::new();
    transport.respond_raw(500, "Internal Server Error");
    let api = client(&transport);
    let id = Uuid::new_v4();

    let mut cache = RevealCache::new();
    assert!(cache.toggle(&api, id).is_err());
    assert!(!cache.is_revealed(id));
    assert_eq!(cache.display(id), MASK);
}

#[test]
fn copy_of_masked_item_does_not_reveal_it() {
    let transport = ScriptedTransport::new();
    transport.respond(200, json!({"password": "s3cret"}));
    let api = client(&transport);
    let id = Uuid::new_v4();

    let cache = RevealCache::new();
    let mut tracker = CopyTracker::new(Duration::from_secs(2));
    let mut clipboard = RecordingClipboard::default();
    let now = Instant::now();

    copy_secret(&api, &cache, &mut tracker, &mut clipboard, id, now).unwrap();

    assert_eq!(clipboard.copied, ["s3cret"]);
    assert!(!cache.is_revealed(id));
    assert!(tracker.is_copied(id, now));
    assert!(!tracker.is_copied(id, now + Duration::from_secs(2)));
}

#[test]
fn copy_of_revealed_item_uses_cached_plaintext() {
    let transport = ScriptedTransport::new();
    transport.respond(200, json!({"password": "cached"}));
    let api = client(&transport);
    let id = Uuid::new_v4();

    let mut cache = RevealCache::new();
    cache.toggle(&api, id).unwrap();

    let mut tracker = CopyTracker::new(Duration::from_secs(2));
    let mut clipboard = RecordingClipboard::default();
    copy_secret(&api, &cache, &mut tracker, &mut clipboard, id, Instant::now()).unwrap();

    assert_eq!(clipboard.copied, ["cached"]);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn clipboard_failure_is_reported_and_not_marked() {
    let transport = ScriptedTransport::new();
    transport.respond(200, json!({"password": "s3cret"}));
    let api = client(&transport);
    let id = Uuid::new_v4();

    let mut tracker = CopyTracker::new(Duration::from_secs(2));
    let mut clipboard = RecordingClipboard {
        broken: true,
        ..RecordingClipboard::default()
    };
    let now = Instant::now();

    let err = copy_secret(&api, &RevealCache::new(), &mut tracker, &mut clipboard, id, now)
        .unwrap_err();
    assert!(matches!(err, PasswordyError::Clipboard(_)));
    assert_eq!(tracker.copied_at(now), None);
}

#[test]
fn failed_fetch_for_copy_leaves_clipboard_alone() {
    let transport = ScriptedTransport::new();
    transport.respond(404, json!({"detail": "Item not found"}));
    let api = client(&transport);

    let mut tracker = CopyTracker::new(Duration::from_secs(2));
    let mut clipboard = RecordingClipboard::default();
    let result = copy_secret(
        &api,
        &RevealCache::new(),
        &mut tracker,
        &mut clipboard,
        Uuid::new_v4(),
        Instant::now(),
    );

    assert!(matches!(result, Err(PasswordyError::Api { status: 404, .. })));
    assert!(clipboard.copied.is_empty());
}
