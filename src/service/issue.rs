//! Issuance of fresh action-scoped grants.

// self
use crate::{
	_prelude::*,
	error::InvalidArgumentError,
	grant::{AccessToken, Action, UsageCounter},
	obs::{self, OpKind, OpOutcome, OpSpan},
	service::TokenService,
};

impl TokenService {
	/// Mints a fresh token authorizing `action` for `ttl_minutes` and a budget of `retries`
	/// validations.
	///
	/// `retries == 0` means the token validates without limit until its TTL lapses; positive
	/// budgets are consumed one validation at a time. The returned token, combined with the
	/// original action, is the only credential that can later validate or revoke the grant.
	///
	/// Fails with an invalid-argument error for a non-positive TTL or a negative retry budget,
	/// echoing the offending value. One store write on success.
	pub async fn issue(
		&self,
		action: &Action,
		ttl_minutes: i64,
		retries: i64,
	) -> Result<AccessToken> {
		const KIND: OpKind = OpKind::Issue;

		let span = OpSpan::new(KIND, "issue");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.metrics.record_attempt();

				if ttl_minutes <= 0 {
					self.metrics.record_failure();

					return Err(InvalidArgumentError::NonPositiveTtl { minutes: ttl_minutes }.into());
				}
				if retries < 0 {
					self.metrics.record_failure();

					return Err(InvalidArgumentError::NegativeRetries { retries }.into());
				}

				let token = AccessToken::mint();
				let key = self.digest.derive_key(action, &token);

				self.store
					.set(&key, UsageCounter::for_retries(retries), Duration::minutes(ttl_minutes))
					.await
					.map_err(|err| {
						self.metrics.record_failure();

						Error::from(err)
					})?;

				self.metrics.record_success();

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}
}
