//! Opaque access-token credentials with redacted formatting.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, error::InvalidArgumentError};

/// Character count of freshly minted tokens.
///
/// Sized to the SHA-256 output space so the credential carries no less entropy than the storage
/// key derived from it.
pub const TOKEN_LEN: usize = 43;

/// Opaque credential returned at issuance and presented later to validate or revoke.
///
/// Formatting redacts the value; use [`expose`](Self::expose) where the raw credential is
/// genuinely needed and keep it out of logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a caller-presented token after validation.
	pub fn new(value: impl Into<String>) -> Result<Self, InvalidArgumentError> {
		let owned = value.into();

		if owned.trim().is_empty() {
			return Err(InvalidArgumentError::EmptyToken);
		}

		Ok(Self(owned))
	}

	/// Mints a fresh credential from the thread-local CSPRNG.
	pub fn mint() -> Self {
		Self(rand::rng().sample_iter(Alphanumeric).take(TOKEN_LEN).map(char::from).collect())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
