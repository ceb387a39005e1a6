use super::*;
use crate::store::MemoryStore;

fn demo_record() -> SessionRecord {
    SessionRecord {
        user: User {
            id: 1,
            username: "demo".into(),
            email: "demo@example.com".into(),
            first_name: Some("Demo".into()),
            last_name: Some("User".into()),
        },
        access_token: "mock-access-token-aa".into(),
        refresh_token: Some("mock-refresh-token-bb".into()),
    }
}

// =============================================================================
// save_record / load_record
// =============================================================================

#[test]
fn save_writes_all_three_keys() {
    let store = MemoryStore::new();
    save_record(&store, &demo_record()).unwrap();

    assert_eq!(store.keys().len(), 3);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("mock-access-token-aa"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("mock-refresh-token-bb"));
}

#[test]
fn saved_user_is_json() {
    let store = MemoryStore::new();
    save_record(&store, &demo_record()).unwrap();

    let raw = store.get(USER_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["username"], "demo");
    assert_eq!(value["id"], 1);
}

#[test]
fn save_then_load_round_trips() {
    let store = MemoryStore::new();
    save_record(&store, &demo_record()).unwrap();

    assert_eq!(load_record(&store).unwrap(), StoredSession::Complete(demo_record()));
}

#[test]
fn save_without_refresh_writes_two_keys() {
    let store = MemoryStore::new();
    let record = SessionRecord { refresh_token: None, ..demo_record() };
    save_record(&store, &record).unwrap();

    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    assert_eq!(store.keys().len(), 2);
}

#[test]
fn load_empty_store() {
    assert_eq!(load_record(&MemoryStore::new()).unwrap(), StoredSession::Empty);
}

#[test]
fn load_tokens_without_user_is_partial() {
    let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r")]);
    assert_eq!(load_record(&store).unwrap(), StoredSession::Partial);
}

#[test]
fn load_lone_refresh_token_is_partial() {
    let store = MemoryStore::with_entries([(REFRESH_TOKEN_KEY, "r")]);
    assert_eq!(load_record(&store).unwrap(), StoredSession::Partial);
}

#[test]
fn load_unrelated_keys_is_empty() {
    let store = MemoryStore::with_entries([("theme", "dark")]);
    assert_eq!(load_record(&store).unwrap(), StoredSession::Empty);
}

#[test]
fn load_user_without_access_token_is_partial() {
    let store = MemoryStore::with_entries([(USER_KEY, r#"{"id":1,"username":"u","email":"u@x.io"}"#)]);
    assert_eq!(load_record(&store).unwrap(), StoredSession::Partial);
}

#[test]
fn load_missing_refresh_token_is_still_complete() {
    let store = MemoryStore::with_entries([
        (USER_KEY, r#"{"id":1,"username":"u","email":"u@x.io"}"#),
        (ACCESS_TOKEN_KEY, "a"),
    ]);
    let StoredSession::Complete(record) = load_record(&store).unwrap() else {
        panic!("expected complete record");
    };
    assert_eq!(record.refresh_token, None);
    assert_eq!(record.access_token, "a");
}

#[test]
fn load_malformed_user_is_corrupt() {
    let store = MemoryStore::with_entries([(USER_KEY, "{not json"), (ACCESS_TOKEN_KEY, "a")]);
    assert!(matches!(load_record(&store), Err(AuthError::CorruptRecord(_))));
}

// =============================================================================
// clear_record
// =============================================================================

#[test]
fn clear_removes_only_session_keys() {
    let store = MemoryStore::new();
    save_record(&store, &demo_record()).unwrap();
    store.set_many(&[("theme", "dark")]).unwrap();

    clear_record(&store).unwrap();
    assert_eq!(store.keys(), vec!["theme".to_owned()]);
}

// =============================================================================
// rehydrate
// =============================================================================

#[test]
fn rehydrate_complete_record() {
    let store = MemoryStore::new();
    save_record(&store, &demo_record()).unwrap();

    let record = rehydrate(&store, RehydratePolicy::FailClosed).unwrap();
    assert_eq!(record, Some(demo_record()));
}

#[test]
fn rehydrate_fail_closed_clears_corrupt_record() {
    let store = MemoryStore::with_entries([(USER_KEY, "garbage"), (ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r")]);

    let record = rehydrate(&store, RehydratePolicy::FailClosed).unwrap();
    assert_eq!(record, None);
    assert!(store.keys().is_empty());
}

#[test]
fn rehydrate_strict_surfaces_corrupt_record() {
    let store = MemoryStore::with_entries([(USER_KEY, "garbage"), (ACCESS_TOKEN_KEY, "a")]);

    let err = rehydrate(&store, RehydratePolicy::Strict).unwrap_err();
    assert!(matches!(err, AuthError::CorruptRecord(_)));
    assert_eq!(store.keys().len(), 2, "strict mode leaves the record for inspection");
}

#[test]
fn rehydrate_partial_record_is_cleared() {
    let store = MemoryStore::with_entries([(USER_KEY, r#"{"id":1,"username":"u","email":"u@x.io"}"#)]);

    assert_eq!(rehydrate(&store, RehydratePolicy::Strict).unwrap(), None);
    assert!(store.keys().is_empty());
}

#[test]
fn rehydrate_policy_defaults_to_fail_closed() {
    assert_eq!(RehydratePolicy::default(), RehydratePolicy::FailClosed);
}

#[test]
fn rehydrate_clears_tokens_without_user() {
    let store = MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r"), ("theme", "dark")]);

    assert_eq!(rehydrate(&store, RehydratePolicy::FailClosed).unwrap(), None);
    assert_eq!(store.keys(), vec!["theme".to_owned()]);
}

// =============================================================================
// rehydrate over an unparseable file
// =============================================================================

#[test]
fn rehydrate_fail_closed_resets_unparseable_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = crate::store::FileStore::new(&path);

    assert_eq!(rehydrate(&store, RehydratePolicy::FailClosed).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);

    save_record(&store, &demo_record()).unwrap();
    assert_eq!(load_record(&store).unwrap(), StoredSession::Complete(demo_record()));
}

#[test]
fn rehydrate_strict_leaves_unparseable_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = crate::store::FileStore::new(&path);

    let err = rehydrate(&store, RehydratePolicy::Strict).unwrap_err();
    assert!(matches!(err, AuthError::Store(StoreError::Format(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}
