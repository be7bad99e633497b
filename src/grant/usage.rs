//! Signed usage accounting for issued grants.
//!
//! The counter stored behind a grant encodes remaining validations in its sign:
//!
//! - `-n` (n > 1): n more validations remain after the current one.
//! - `-1`: the last permitted validation; consuming it removes the grant.
//! - `0` or positive: present but not a retry counter; the grant validates without mutation until
//!   its TTL lapses. Issuance produces `0` only for the unlimited sentinel (`retries == 0`).
//!
//! Absence of the counter altogether means the grant expired, was revoked, or never existed;
//! the three cases are indistinguishable on purpose.

// self
use crate::_prelude::*;

/// Signed counter encoding how many validations a grant has left.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageCounter(i64);
impl UsageCounter {
	/// Encodes a retry budget as a stored counter.
	///
	/// `retries == 0` yields the unlimited sentinel; positive budgets negate into the counting
	/// range. Callers validate the sign beforehand; the service rejects negative budgets with an
	/// invalid-argument error.
	pub fn for_retries(retries: i64) -> Self {
		Self(-retries)
	}

	/// The unlimited sentinel: valid until TTL expiry, never decremented.
	pub const fn unlimited() -> Self {
		Self(0)
	}

	/// Raw stored value.
	pub const fn get(self) -> i64 {
		self.0
	}

	/// Remaining validations, or `None` when the counter is not counting (unlimited sentinel or
	/// a foreign non-negative value).
	pub const fn remaining_uses(self) -> Option<u64> {
		if self.0 < 0 { Some(self.0.unsigned_abs()) } else { None }
	}

	/// Applies one validation to the counter and reports what the caller must do with the
	/// stored entry.
	pub const fn consume(self) -> UsageOutcome {
		if self.0 >= 0 {
			UsageOutcome::Unlimited
		} else if self.0 == -1 {
			UsageOutcome::Spent
		} else {
			UsageOutcome::Decremented(Self(self.0 + 1))
		}
	}
}
impl Debug for UsageCounter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "UsageCounter({})", self.0)
	}
}
impl Display for UsageCounter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)
	}
}

/// Effect of consuming one validation from a [`UsageCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageOutcome {
	/// The counter is not counting; the grant validates with no mutation.
	Unlimited,
	/// The last permitted use was consumed; the stored entry must be deleted.
	Spent,
	/// A use was consumed; the new counter must be written back without touching the TTL.
	Decremented(UsageCounter),
}
