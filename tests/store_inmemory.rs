// crates.io
use time::Duration;
// self
use token_broker::{
	grant::{AccessToken, Action, UsageCounter},
	key::{KeyDigest, StorageKey},
	store::{ExpiringStore, MemoryStore},
};

fn build_key(token: &str) -> StorageKey {
	let action = Action::new("checkout").expect("Failed to build action fixture.");
	let token = AccessToken::new(token).expect("Failed to build token fixture.");

	KeyDigest::Sha256.derive_key(&action, &token)
}

#[tokio::test]
async fn set_and_get_round_trip() {
	let store = MemoryStore::default();
	let key = build_key("token-1");

	store
		.set(&key, UsageCounter::for_retries(3), Duration::minutes(5))
		.await
		.expect("Setting a counter into the memory store should succeed.");

	let fetched = store
		.get(&key)
		.await
		.expect("Reading the counter from the memory store should succeed.");

	assert_eq!(fetched, Some(UsageCounter::for_retries(3)));
}

#[tokio::test]
async fn zero_ttl_entries_read_as_absent() {
	let store = MemoryStore::default();
	let key = build_key("token-lapsed");

	store
		.set(&key, UsageCounter::for_retries(3), Duration::ZERO)
		.await
		.expect("Setting a zero-TTL counter should succeed.");

	assert_eq!(
		store.get(&key).await.expect("Reading the lapsed counter should succeed."),
		None,
		"An entry is absent the instant its TTL lapses.",
	);
	assert_eq!(store.expires_at(&key), None, "Lazy pruning should have dropped the entry.");
}

#[tokio::test]
async fn update_preserves_the_ttl_window() {
	let store = MemoryStore::default();
	let key = build_key("token-2");

	store
		.set(&key, UsageCounter::for_retries(2), Duration::minutes(5))
		.await
		.expect("Setting the initial counter should succeed.");

	let before = store.expires_at(&key).expect("Fresh entry should carry an expiry instant.");

	store
		.update(&key, UsageCounter::for_retries(1))
		.await
		.expect("Updating the counter should succeed.");

	assert_eq!(
		store.get(&key).await.expect("Reading the updated counter should succeed."),
		Some(UsageCounter::for_retries(1)),
	);
	assert_eq!(
		store.expires_at(&key).expect("Updated entry should remain live."),
		before,
		"An update must not restart the TTL window.",
	);
}

#[tokio::test]
async fn set_restarts_the_ttl_window() {
	let store = MemoryStore::default();
	let key = build_key("token-3");

	store
		.set(&key, UsageCounter::for_retries(1), Duration::minutes(1))
		.await
		.expect("Setting the initial counter should succeed.");

	let before = store.expires_at(&key).expect("Fresh entry should carry an expiry instant.");

	store
		.set(&key, UsageCounter::for_retries(1), Duration::minutes(10))
		.await
		.expect("Overwriting the counter should succeed.");

	let after = store.expires_at(&key).expect("Overwritten entry should remain live.");

	assert!(after > before, "A set must restart the TTL window from now.");
}

#[tokio::test]
async fn update_on_an_absent_key_is_a_no_op() {
	let store = MemoryStore::default();
	let key = build_key("token-missing");

	store
		.update(&key, UsageCounter::for_retries(1))
		.await
		.expect("Updating a missing key should not error.");

	assert_eq!(
		store.get(&key).await.expect("Reading the missing key should succeed."),
		None,
		"An update must never resurrect an absent entry.",
	);
}

#[tokio::test]
async fn delete_is_idempotent() {
	let store = MemoryStore::default();
	let key = build_key("token-4");

	store
		.set(&key, UsageCounter::unlimited(), Duration::minutes(5))
		.await
		.expect("Setting the counter should succeed.");
	store.delete(&key).await.expect("First delete should succeed.");

	assert_eq!(store.get(&key).await.expect("Reading after delete should succeed."), None);

	store.delete(&key).await.expect("Deleting an absent key should not error.");
}
