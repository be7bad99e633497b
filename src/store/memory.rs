//! Thread-safe in-memory [`ExpiringStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	grant::UsageCounter,
	key::StorageKey,
	store::{ExpiringStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<StorageKey, Entry>>>;

#[derive(Clone, Copy, Debug)]
struct Entry {
	value: UsageCounter,
	expires_at: OffsetDateTime,
}
impl Entry {
	fn expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}

/// Thread-safe storage backend that keeps counters in-process for tests and demos.
///
/// Expiry is lazy: reads treat past-expiry entries as absent and prune them on the spot, so the
/// map never serves a lapsed grant even though no sweeper runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Expiry instant currently recorded for `key`, if the entry is live.
	///
	/// Diagnostic accessor; the service never reads it. Useful for asserting that updates
	/// preserve the TTL window.
	pub fn expires_at(&self, key: &StorageKey) -> Option<OffsetDateTime> {
		let now = OffsetDateTime::now_utc();

		self.0.read().get(key).filter(|entry| !entry.expired_at(now)).map(|entry| entry.expires_at)
	}

	fn set_now(map: StoreMap, key: StorageKey, value: UsageCounter, ttl: Duration) {
		let expires_at = OffsetDateTime::now_utc() + ttl;

		map.write().insert(key, Entry { value, expires_at });
	}

	fn get_now(map: StoreMap, key: StorageKey) -> Option<UsageCounter> {
		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();

		match guard.get(&key).copied() {
			Some(entry) if entry.expired_at(now) => {
				guard.remove(&key);

				None
			},
			Some(entry) => Some(entry.value),
			None => None,
		}
	}

	fn update_now(map: StoreMap, key: StorageKey, value: UsageCounter) {
		let now = OffsetDateTime::now_utc();
		let mut guard = map.write();

		match guard.get(&key).copied() {
			Some(entry) if entry.expired_at(now) => {
				guard.remove(&key);
			},
			Some(entry) => {
				guard.insert(key, Entry { value, expires_at: entry.expires_at });
			},
			None => (),
		}
	}

	fn delete_now(map: StoreMap, key: StorageKey) {
		map.write().remove(&key);
	}
}
impl ExpiringStore for MemoryStore {
	fn set<'a>(
		&'a self,
		key: &'a StorageKey,
		value: UsageCounter,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::set_now(map, key, value, ttl);

			Ok(())
		})
	}

	fn get<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, Option<UsageCounter>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn update<'a>(&'a self, key: &'a StorageKey, value: UsageCounter) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::update_now(map, key, value);

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move {
			Self::delete_now(map, key);

			Ok(())
		})
	}
}
