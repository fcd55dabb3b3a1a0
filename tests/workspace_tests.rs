//! Workspace lifetime: a session the server drops clears what was on
//! screen, and deleting an item forgets its revealed password.

mod common;

use std::time::{Duration, Instant};

use common::{client, item_json, token_json, user_json, ScriptedTransport};
use passwordy::api::{ApiClient, Method};
use passwordy::session::{ExpiryWatch, SessionManager};
use passwordy::vault::{FetchOutcome, Workspace};
use serde_json::json;
use uuid::Uuid;

fn watched<'a>(
    transport: &'a ScriptedTransport,
    watch: &ExpiryWatch,
) -> ApiClient<&'a ScriptedTransport> {
    client(transport).with_unauthorized_hook(watch.hook())
}

/// Log in as alice, load one item and reveal its password.
fn signed_in_with_reveal(
    transport: &ScriptedTransport,
    api: &ApiClient<&ScriptedTransport>,
    id: Uuid,
) -> (SessionManager, Workspace) {
    transport
        .respond(200, token_json())
        .respond(200, user_json("alice"))
        .respond(200, json!([item_json(id, "GitHub")]))
        .respond(200, json!({"password": "hunter2"}));

    let mut session = SessionManager::new();
    session.login(api, "alice", "pw").unwrap();

    let mut vault = Workspace::new(Duration::from_secs(2));
    assert_eq!(vault.list.refresh(api), FetchOutcome::Applied);
    vault.reveals.toggle(api, id).unwrap();
    vault.copies.mark(id, Instant::now());
    (session, vault)
}

#[test]
fn lapsed_session_clears_items_and_reveals() {
    let transport = ScriptedTransport::new();
    let watch = ExpiryWatch::new();
    let api = watched(&transport, &watch);
    let id = Uuid::new_v4();
    let (mut session, mut vault) = signed_in_with_reveal(&transport, &api, id);

    transport
        .respond(401, json!({"detail": "Not authenticated"}))
        .respond(401, json!({"detail": "Not authenticated"}));

    assert_eq!(vault.list.refresh(&api), FetchOutcome::Failed);
    assert_eq!(vault.list.items().len(), 1);

    assert!(vault.drop_if_expired(&api, &mut session, &watch));
    assert!(!session.is_authenticated());
    assert!(vault.list.items().is_empty());
    assert!(vault.reveals.is_empty());
    assert_eq!(vault.copies.copied_at(Instant::now()), None);

    let last = transport.last_request();
    assert_eq!(last.method, Method::Get);
    assert_eq!(last.path, "/api/v1/auth/me");
    assert!(!watch.take());
}

#[test]
fn rejected_request_with_live_session_keeps_everything() {
    let transport = ScriptedTransport::new();
    let watch = ExpiryWatch::new();
    let api = watched(&transport, &watch);
    let id = Uuid::new_v4();
    let (mut session, mut vault) = signed_in_with_reveal(&transport, &api, id);

    transport
        .respond(401, json!({"detail": "Not authenticated"}))
        .respond(200, user_json("alice"));
    assert!(vault.reveals.toggle(&api, id).is_ok());
    assert!(vault.reveals.toggle(&api, id).is_err());

    assert!(!vault.drop_if_expired(&api, &mut session, &watch));
    assert!(session.is_authenticated());
    assert_eq!(vault.list.items().len(), 1);
}

#[test]
fn nothing_is_checked_without_a_rejection() {
    let transport = ScriptedTransport::new();
    let watch = ExpiryWatch::new();
    let api = watched(&transport, &watch);
    let id = Uuid::new_v4();
    let (mut session, mut vault) = signed_in_with_reveal(&transport, &api, id);
    let sent = transport.request_count();

    assert!(!vault.drop_if_expired(&api, &mut session, &watch));
    assert_eq!(transport.request_count(), sent);
    assert_eq!(vault.reveals.get(id), Some("hunter2"));
}

#[test]
fn delete_forgets_revealed_password() {
    let transport = ScriptedTransport::new();
    let (keep, gone) = (Uuid::new_v4(), Uuid::new_v4());
    transport
        .respond(200, json!([item_json(keep, "Bank"), item_json(gone, "Old forum")]))
        .respond(200, json!({"password": "bank-pw"}))
        .respond(200, json!({"password": "forum-pw"}));
    let api = client(&transport);

    let mut vault = Workspace::new(Duration::from_secs(2));
    vault.list.refresh(&api);
    vault.reveals.toggle(&api, keep).unwrap();
    vault.reveals.toggle(&api, gone).unwrap();

    vault.list.open_delete(gone).unwrap();
    transport
        .respond(200, json!({"msg": "Item deleted"}))
        .respond(200, json!([item_json(keep, "Bank")]));

    assert_eq!(vault.delete(&api).unwrap(), gone);
    assert!(!vault.reveals.is_revealed(gone));
    assert_eq!(vault.reveals.get(keep), Some("bank-pw"));
    assert!(vault.list.find(gone).is_none());
}

#[test]
fn failed_delete_keeps_revealed_password() {
    let transport = ScriptedTransport::new();
    let id = Uuid::new_v4();
    transport
        .respond(200, json!([item_json(id, "Bank")]))
        .respond(200, json!({"password": "bank-pw"}));
    let api = client(&transport);

    let mut vault = Workspace::new(Duration::from_secs(2));
    vault.list.refresh(&api);
    vault.reveals.toggle(&api, id).unwrap();

    vault.list.open_delete(id).unwrap();
    transport.respond(404, json!({"detail": "Item not found"}));

    assert!(vault.delete(&api).is_err());
    assert_eq!(vault.reveals.get(id), Some("bank-pw"));
}
