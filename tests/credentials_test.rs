use trackrec::management::{
    ACCESS_TOKEN_KEY, CredentialStore, EXPIRY_KEY, FileStore, KeyValueStore, MemoryStore,
    REFRESH_TOKEN_KEY,
};
use trackrec::types::Credential;
use trackrec::utils::now_millis;

async fn store_with_expiry(expiry: i64) -> CredentialStore<MemoryStore> {
    let mut store = MemoryStore::new();
    store.set(ACCESS_TOKEN_KEY, "a").await.unwrap();
    store.set(REFRESH_TOKEN_KEY, "r").await.unwrap();
    store.set(EXPIRY_KEY, &expiry.to_string()).await.unwrap();
    CredentialStore::new(store)
}

#[tokio::test]
async fn test_is_expired_without_expiry() {
    let credentials = CredentialStore::new(MemoryStore::new());
    assert!(credentials.is_expired().await.unwrap());
}

#[tokio::test]
async fn test_is_expired_with_garbage_expiry() {
    let mut store = MemoryStore::new();
    store.set(EXPIRY_KEY, "tomorrow").await.unwrap();
    let credentials = CredentialStore::new(store);
    assert!(credentials.is_expired().await.unwrap());
}

#[tokio::test]
async fn test_is_expired_respects_buffer() {
    let now = 1_728_300_000_000;

    let past = store_with_expiry(now - 1).await;
    assert!(past.is_expired_at(now).await.unwrap());

    let fresh = store_with_expiry(now + 120_000).await;
    assert!(!fresh.is_expired_at(now).await.unwrap());

    // inside the 60s buffer
    let closing = store_with_expiry(now + 30_000).await;
    assert!(closing.is_expired_at(now).await.unwrap());

    // exactly at the buffer edge the token is still usable
    let edge = store_with_expiry(now + 60_000).await;
    assert!(!edge.is_expired_at(now).await.unwrap());
}

#[tokio::test]
async fn test_is_expired_with_wall_clock() {
    let now = now_millis();
    assert!(store_with_expiry(now - 1).await.is_expired().await.unwrap());
    assert!(!store_with_expiry(now + 120_000).await.is_expired().await.unwrap());
    assert!(store_with_expiry(now + 30_000).await.is_expired().await.unwrap());
}

#[tokio::test]
async fn test_save_without_refresh_token_keeps_existing() {
    let mut credentials = store_with_expiry(0).await;

    let before = now_millis();
    credentials.save("new-access", None, 3600).await.unwrap();
    let after = now_millis();

    assert_eq!(
        credentials.access_token().await.unwrap().as_deref(),
        Some("new-access")
    );
    assert_eq!(credentials.refresh_token().await.unwrap().as_deref(), Some("r"));

    let expiry = credentials.expiry().await.unwrap().unwrap();
    assert!(expiry >= before + 3_600_000);
    assert!(expiry <= after + 3_600_000);
}

#[tokio::test]
async fn test_save_with_rotated_refresh_token() {
    let mut credentials = store_with_expiry(0).await;
    credentials
        .save("new-access", Some("new-refresh"), 60)
        .await
        .unwrap();

    assert_eq!(
        credentials.refresh_token().await.unwrap().as_deref(),
        Some("new-refresh")
    );
}

#[tokio::test]
async fn test_clear_removes_all_keys() {
    let mut credentials = store_with_expiry(now_millis() + 600_000).await;
    credentials.clear().await.unwrap();

    assert!(credentials.access_token().await.unwrap().is_none());
    assert!(credentials.refresh_token().await.unwrap().is_none());
    assert!(credentials.expiry().await.unwrap().is_none());
    assert!(credentials.inner().is_empty());
}

#[tokio::test]
async fn test_discard_access_token_keeps_refresh() {
    let mut credentials = store_with_expiry(now_millis() + 600_000).await;
    credentials.discard_access_token().await.unwrap();

    assert!(credentials.access_token().await.unwrap().is_none());
    assert_eq!(credentials.refresh_token().await.unwrap().as_deref(), Some("r"));
    assert!(credentials.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_login_and_load() {
    let mut credentials = CredentialStore::new(MemoryStore::new());
    let credential = Credential {
        access_token: "acc".to_string(),
        refresh_token: "ref".to_string(),
        expiry: 1_728_303_600_000,
    };

    credentials.store_login(&credential).await.unwrap();

    assert_eq!(credentials.load().await.unwrap(), Some(credential));
    assert_eq!(
        credentials.inner().get(EXPIRY_KEY).await.unwrap().as_deref(),
        Some("1728303600000")
    );
}

#[tokio::test]
async fn test_file_store_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let mut credentials = CredentialStore::new(FileStore::open(path.clone()).await.unwrap());
        credentials.save("acc", Some("ref"), 3600).await.unwrap();
    }

    let credentials = CredentialStore::new(FileStore::open(path.clone()).await.unwrap());
    assert_eq!(credentials.access_token().await.unwrap().as_deref(), Some("acc"));
    assert_eq!(credentials.refresh_token().await.unwrap().as_deref(), Some("ref"));
    assert!(!credentials.is_expired().await.unwrap());

    let raw = std::fs::read_to_string(&path).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(map.get("access_token").is_some());
    assert!(map.get("refresh_token").is_some());
    assert!(map.get("expiry_time").is_some());
}

#[tokio::test]
async fn test_file_store_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let mut credentials = CredentialStore::new(FileStore::open(path.clone()).await.unwrap());
    credentials.save("acc", Some("ref"), 3600).await.unwrap();
    credentials.clear().await.unwrap();

    let reopened = FileStore::open(path).await.unwrap();
    assert!(reopened.get(ACCESS_TOKEN_KEY).await.unwrap().is_none());
    assert!(reopened.get(REFRESH_TOKEN_KEY).await.unwrap().is_none());
    assert!(reopened.get(EXPIRY_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(FileStore::open(path).await.is_err());
}
