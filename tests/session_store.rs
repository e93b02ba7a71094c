use econdash_rs::SessionStore;
use tempfile::tempdir;

#[test]
fn starts_unauthenticated_without_a_token_file() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path().join("token"));
    assert!(!store.is_authenticated());
    assert_eq!(store.token(), None);
}

#[test]
fn login_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");

    let store = SessionStore::open(&path);
    store.login("tok-123").unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("tok-123"));

    // A later process adopts the persisted token without server validation.
    let reopened = SessionStore::open(&path);
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.token().as_deref(), Some("tok-123"));
}

#[test]
fn login_overwrites_the_single_slot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    let store = SessionStore::open(&path);
    store.login("first").unwrap();
    store.login("second").unwrap();
    assert_eq!(store.token().as_deref(), Some("second"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn logout_clears_token_and_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    let store = SessionStore::open(&path);
    store.login("tok").unwrap();
    store.logout().unwrap();
    assert!(!store.is_authenticated());
    assert!(!path.exists());
    // Logging out twice is fine.
    store.logout().unwrap();
}

#[test]
fn expire_clears_current_generation() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path().join("token"));
    store.login("tok").unwrap();
    let generation = store.generation();

    // The 401 handler for a request issued under this generation.
    store.expire(generation);
    assert!(!store.is_authenticated());
}

#[test]
fn stale_generation_401_does_not_clobber_fresh_login() {
    let dir = tempdir().unwrap();
    let store = SessionStore::open(dir.path().join("token"));
    store.login("old").unwrap();
    let stale = store.generation();

    // A fresh login lands while the old request is still in flight.
    store.login("new").unwrap();

    // The old request's 401 arrives late and must be ignored.
    store.expire(stale);
    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("new"));
}

#[test]
fn whitespace_only_token_file_counts_as_unauthenticated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "  \n").unwrap();
    let store = SessionStore::open(&path);
    assert!(!store.is_authenticated());
}
