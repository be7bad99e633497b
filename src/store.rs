//! Storage contracts and built-in store implementations for grant counters.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, grant::UsageCounter, key::StorageKey};

/// Maximum key length the reference deployment's store accepts.
///
/// Backends must accept keys at least this long; service construction checks the configured
/// digest's encoded length against it once.
pub const MAX_KEY_LEN: usize = 45;

/// Boxed future returned by [`ExpiringStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Expiring key-value contract consumed by the token service.
///
/// All grant state lives behind this trait; the service itself holds none. Consistency reduces
/// to the backend's: the bundled backends are last-writer-wins, so cross-process callers racing
/// on the same key can lose a decrement. Within one process the service serializes same-key
/// validations; see [`TokenService`](crate::service::TokenService).
pub trait ExpiringStore
where
	Self: Send + Sync,
{
	/// Creates or overwrites the counter at `key`, restarting its TTL window.
	fn set<'a>(
		&'a self,
		key: &'a StorageKey,
		value: UsageCounter,
		ttl: Duration,
	) -> StoreFuture<'a, ()>;

	/// Reads the counter at `key`; `None` once the TTL lapsed, the key was deleted, or it was
	/// never set.
	fn get<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, Option<UsageCounter>>;

	/// Overwrites the counter at `key` without touching its TTL window.
	///
	/// A no-op when the key is absent: the entry may expire between a read and the write-back,
	/// and recreating it would extend the grant past its TTL.
	fn update<'a>(&'a self, key: &'a StorageKey, value: UsageCounter) -> StoreFuture<'a, ()>;

	/// Removes the key immediately; idempotent.
	fn delete<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`ExpiringStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
