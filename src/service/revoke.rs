//! Early revocation of issued grants.

// self
use crate::{
	_prelude::*,
	grant::{AccessToken, Action},
	obs::{self, OpKind, OpOutcome, OpSpan},
	service::TokenService,
};

impl TokenService {
	/// Removes the grant for `(action, token)` before its TTL lapses.
	///
	/// Deletion is confirmed by re-validating: absence short-circuits the validation before any
	/// mutation, so the confirmation is read-only. A grant the store still serves after the
	/// delete surfaces as a store-inconsistency error rather than being silently swallowed.
	/// Revoking an already-absent grant answers `Ok(true)`, so the call is idempotent over an
	/// idempotent store delete.
	pub async fn revoke(&self, action: &Action, token: &AccessToken) -> Result<bool> {
		const KIND: OpKind = OpKind::Revoke;

		let span = OpSpan::new(KIND, "revoke");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.metrics.record_attempt();

				let key = self.digest.derive_key(action, token);

				if let Err(err) = self.store.delete(&key).await {
					self.metrics.record_failure();

					return Err(Error::from(err));
				}
				if self.validate(action, token).await? {
					self.metrics.record_failure();

					return Err(Error::StoreInconsistency { key });
				}

				self.metrics.record_success();

				Ok(true)
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}
}
