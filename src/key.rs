//! Deterministic storage-key derivation for issued grants.
//!
//! A grant is addressed by the digest of `action + ":" + token`, so the store never sees either
//! credential in the clear and issuance/validation agree on the key by construction. The digest
//! and its text encoding are fixed at service construction; see [`KeyDigest`].

// std
use std::fmt::Write;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	grant::{AccessToken, Action},
};

/// Digest and text-encoding choice used to derive storage keys.
///
/// Immutable once the service is constructed; the encoded output length is checked against the
/// store's key bound exactly once there, never per call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDigest {
	/// SHA-256 encoded as unpadded base64; 43 characters.
	#[default]
	Sha256,
	/// SHA-256 encoded as lowercase hex; 64 characters.
	///
	/// Kept for stores that only accept hex keys. Exceeds the 45-character reference bound, so
	/// constructing a service over the bundled backends with this variant fails.
	Sha256Hex,
}
impl KeyDigest {
	/// Returns a stable label suitable for error and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			KeyDigest::Sha256 => "sha256",
			KeyDigest::Sha256Hex => "sha256-hex",
		}
	}

	/// Character count of the encoded digest output.
	pub const fn encoded_len(self) -> usize {
		match self {
			// ceil(32 / 3) * 4 without padding.
			KeyDigest::Sha256 => 43,
			KeyDigest::Sha256Hex => 64,
		}
	}

	/// Validates the encoded output length against a store's key bound.
	pub fn ensure_fits(self, limit: usize) -> Result<(), ConfigError> {
		let produced = self.encoded_len();

		if produced > limit {
			return Err(ConfigError::DigestExceedsKeyBound {
				algorithm: self.as_str(),
				produced,
				limit,
			});
		}

		Ok(())
	}

	/// Derives the storage key addressing the grant for `(action, token)`.
	pub fn derive_key(self, action: &Action, token: &AccessToken) -> StorageKey {
		let mut hasher = Sha256::new();

		hasher.update(action.as_ref().as_bytes());
		hasher.update(b":");
		hasher.update(token.expose().as_bytes());

		let digest = hasher.finalize();
		let encoded = match self {
			KeyDigest::Sha256 => STANDARD_NO_PAD.encode(digest),
			KeyDigest::Sha256Hex => digest.iter().fold(String::with_capacity(64), |mut buf, b| {
				let _ = write!(buf, "{b:02x}");

				buf
			}),
		};

		StorageKey(encoded)
	}
}
impl Display for KeyDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Deterministic digest of `action:token` used to address the store.
///
/// Not a secret (the key is a one-way fingerprint), so it formats plainly and may appear in
/// errors and spans.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);
impl StorageKey {
	/// Encoded character count.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the key is empty; derivation never produces one.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for StorageKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "StorageKey({})", self.0)
	}
}
impl Display for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
