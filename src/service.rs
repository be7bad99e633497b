//! The token-service façade coordinating issuance, validation, and revocation.

mod issue;
mod metrics;
mod revoke;
mod validate;

pub use metrics::ServiceMetrics;

// self
use crate::{
	_prelude::*,
	key::{KeyDigest, StorageKey},
	store::{self, ExpiringStore},
};

/// Coordinates the grant lifecycle against a single expiring store.
///
/// The service owns no token state; everything lives behind the store, so one instance is safe to
/// share across any number of callers. Construct one per configuration and inject it; there is no
/// ambient global. The per-key guard map serializes same-key validations so concurrent retries in
/// one process cannot lose a decrement; across processes the guarantee degrades to the store's.
#[derive(Clone)]
pub struct TokenService {
	/// Store implementation that holds issued counters.
	pub store: Arc<dyn ExpiringStore>,
	/// Digest choice fixed at construction; already checked against the store key bound.
	pub digest: KeyDigest,
	/// Shared attempt/success/failure/denial counters across all operations.
	pub metrics: Arc<ServiceMetrics>,
	op_guards: Arc<Mutex<HashMap<StorageKey, Arc<AsyncMutex<()>>>>>,
}
impl TokenService {
	/// Creates a service over the provided store, validating the digest's encoded length against
	/// the store key bound exactly once.
	pub fn new(store: Arc<dyn ExpiringStore>, digest: KeyDigest) -> Result<Self> {
		digest.ensure_fits(store::MAX_KEY_LEN)?;

		Ok(Self {
			store,
			digest,
			metrics: Default::default(),
			op_guards: Default::default(),
		})
	}

	/// Returns (and creates on demand) the singleflight guard for a storage key.
	pub(crate) fn op_guard(&self, key: &StorageKey) -> Arc<AsyncMutex<()>> {
		let mut guards = self.op_guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}

	/// Drops the guard entry once no validation is in flight for the key.
	pub(crate) fn release_op_guard(&self, key: &StorageKey) {
		let mut guards = self.op_guards.lock();

		// The map is the only long-lived holder; strong_count == 1 means no caller still waits.
		if let Some(guard) = guards.get(key)
			&& Arc::strong_count(guard) == 1
		{
			guards.remove(key);
		}
	}
}
impl Debug for TokenService {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenService")
			.field("digest", &self.digest)
			.field("in_flight_keys", &self.op_guards.lock().len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::ConfigError, store::MemoryStore};

	#[test]
	fn construction_validates_the_digest_against_the_key_bound() {
		let store = Arc::new(MemoryStore::default());

		assert!(TokenService::new(store.clone(), KeyDigest::Sha256).is_ok());

		let err = TokenService::new(store, KeyDigest::Sha256Hex)
			.expect_err("Hex digest should be rejected at construction.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::DigestExceedsKeyBound { produced: 64, limit: 45, .. })
		));
	}

	#[test]
	fn guards_are_shared_per_key_and_released_when_idle() {
		let service = TokenService::new(Arc::new(MemoryStore::default()), KeyDigest::Sha256)
			.expect("Service fixture should construct.");
		let action = crate::grant::Action::new("checkout").expect("Action fixture should be valid.");
		let token = crate::grant::AccessToken::mint();
		let key = service.digest.derive_key(&action, &token);
		let lhs = service.op_guard(&key);
		let rhs = service.op_guard(&key);

		assert!(Arc::ptr_eq(&lhs, &rhs), "Same key must share one guard.");

		drop(lhs);
		drop(rhs);
		service.release_op_guard(&key);

		assert_eq!(service.op_guards.lock().len(), 0);
	}
}
