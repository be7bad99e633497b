//! Broker-level error types shared across the service, key derivation, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller-supplied input violated a precondition.
	#[error(transparent)]
	InvalidArgument(#[from] InvalidArgumentError),

	/// Revocation was requested but the store still serves the grant.
	#[error("Store failed to remove key `{key}`; the grant still validates.")]
	StoreInconsistency {
		/// Storage key whose deletion did not take effect.
		key: crate::key::StorageKey,
	},
}

/// Configuration and construction-time validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ConfigError {
	/// Chosen digest encodes to more characters than the store accepts per key.
	#[error("Digest `{algorithm}` encodes to {produced} characters, exceeding the store key bound of {limit}.")]
	DigestExceedsKeyBound {
		/// Stable label of the offending digest choice.
		algorithm: &'static str,
		/// Encoded output length the digest produces.
		produced: usize,
		/// Maximum key length the store supports.
		limit: usize,
	},
}

/// Precondition violations on caller-supplied inputs.
///
/// Always recoverable by correcting the input; never retried internally. Each variant echoes the
/// offending value for caller-side diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum InvalidArgumentError {
	/// Action identifiers must keep at least four characters after trimming.
	#[error("Action must be at least {min} characters after trimming; you passed `{action}`.")]
	ActionTooShort {
		/// The rejected action string.
		action: String,
		/// Minimum trimmed length.
		min: usize,
	},
	/// Presented tokens cannot be empty or whitespace-only.
	#[error("Token cannot be an empty string.")]
	EmptyToken,
	/// Grants must live for at least one minute.
	#[error("Time to live must be a positive number of minutes; you passed `{minutes}`.")]
	NonPositiveTtl {
		/// The rejected TTL value.
		minutes: i64,
	},
	/// Retry budgets cannot be negative; zero means unlimited until expiry.
	#[error("Number of retries cannot be negative; you passed `{retries}`.")]
	NegativeRetries {
		/// The rejected retry count.
		retries: i64,
	},
}
