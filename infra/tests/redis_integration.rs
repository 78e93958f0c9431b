//! Integration tests for the Redis refresh token store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p wdc_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use wdc_core::repositories::RefreshTokenStore;
use wdc_infra::cache::{CacheConfig, RedisClient, RedisRefreshTokenStore};

async fn store(prefix: &str) -> RedisRefreshTokenStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(&CacheConfig::redis(url))
        .await
        .expect("Failed to connect to Redis");
    RedisRefreshTokenStore::new(client, prefix)
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_ping() {
    let store = store("test:ping:").await;
    assert!(store.client().ping().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_set_get_remove() {
    let store = store("test:basic:").await;
    let subject = "mung@dogcat.kr";

    store.set_jti(subject, "jti-1", Duration::from_secs(60)).await.unwrap();
    assert_eq!(store.get_jti(subject).await.unwrap(), Some("jti-1".to_string()));

    assert!(store.remove(subject).await.unwrap());
    assert!(!store.remove(subject).await.unwrap());
    assert_eq!(store.get_jti(subject).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_record_key_matches_subject_jti_layout() {
    let store = store("test:layout:").await;
    let subject = "layout@dogcat.kr";

    store.set_jti(subject, "jti-1", Duration::from_secs(60)).await.unwrap();
    let raw = store
        .client()
        .get("test:layout:layout@dogcat.kr_jti")
        .await
        .unwrap();
    assert_eq!(raw, Some("jti-1".to_string()));

    store.remove(subject).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_record_expires() {
    let store = store("test:expiry:").await;
    let subject = "expiry@dogcat.kr";

    store.set_jti(subject, "jti-1", Duration::from_secs(1)).await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(store.get_jti(subject).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_compare_and_set() {
    let store = store("test:cas:").await;
    let subject = "cas@dogcat.kr";
    let ttl = Duration::from_secs(60);

    store.set_jti(subject, "jti-1", ttl).await.unwrap();
    assert!(!store.compare_and_set(subject, "stale", "jti-2", ttl).await.unwrap());
    assert!(store.compare_and_set(subject, "jti-1", "jti-2", ttl).await.unwrap());
    assert_eq!(store.get_jti(subject).await.unwrap(), Some("jti-2".to_string()));

    store.remove(subject).await.unwrap();
    assert!(!store.compare_and_set(subject, "jti-2", "jti-3", ttl).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis server
async fn test_concurrent_compare_and_set() {
    let store = Arc::new(store("test:race:").await);
    let subject = "race@dogcat.kr";
    let ttl = Duration::from_secs(60);
    store.set_jti(subject, "jti-0", ttl).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .compare_and_set(subject, "jti-0", &format!("jti-{}", i + 1), ttl)
                .await
                .unwrap()
        }));
    }

    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);

    store.remove(subject).await.unwrap();
}
