//! Validation and use consumption for issued grants.

// self
use crate::{
	_prelude::*,
	grant::{AccessToken, Action, UsageOutcome},
	key::StorageKey,
	obs::{self, OpKind, OpOutcome, OpSpan},
	service::TokenService,
};

impl TokenService {
	/// Validates `token` against the action it was issued for, consuming one use.
	///
	/// Answers `false` when the grant is absent (expired, revoked, or never issued; the cases are
	/// indistinguishable by design) and `true` otherwise. A `true` answer is side-effecting
	/// exactly once: the last permitted use deletes the entry, earlier uses write the decremented
	/// counter back without touching the TTL window, and the unlimited sentinel mutates nothing.
	///
	/// Same-key calls serialize on a per-key guard, so concurrent retries within this process
	/// each consume a distinct use.
	pub async fn validate(&self, action: &Action, token: &AccessToken) -> Result<bool> {
		const KIND: OpKind = OpKind::Validate;

		let span = OpSpan::new(KIND, "validate");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.metrics.record_attempt();

				let key = self.digest.derive_key(action, token);
				let guard = self.op_guard(&key);
				let outcome = {
					let _singleflight = guard.lock().await;

					self.consume_locked(&key).await
				};

				drop(guard);
				self.release_op_guard(&key);

				match outcome {
					Ok(valid) => {
						self.metrics.record_success();

						if !valid {
							self.metrics.record_denial();
						}

						Ok(valid)
					},
					Err(err) => {
						self.metrics.record_failure();

						Err(err)
					},
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	/// Read-decide-write section; callers hold the key's singleflight guard.
	async fn consume_locked(&self, key: &StorageKey) -> Result<bool> {
		let Some(counter) = self.store.get(key).await? else {
			return Ok(false);
		};

		match counter.consume() {
			UsageOutcome::Unlimited => (),
			UsageOutcome::Spent => self.store.delete(key).await?,
			UsageOutcome::Decremented(next) => self.store.update(key, next).await?,
		}

		Ok(true)
	}
}
