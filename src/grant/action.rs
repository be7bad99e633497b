//! Strongly typed action identifiers that grants are scoped to.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, error::InvalidArgumentError};

/// Minimum character count an action must keep after trimming.
pub const ACTION_MIN_LEN: usize = 4;

/// Named operation a token authorizes, validated at construction.
///
/// Construction trims surrounding whitespace so both issuance and validation derive the same
/// storage key for a given caller-supplied string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Action(String);
impl Action {
	/// Creates a new action identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, InvalidArgumentError> {
		let view = value.as_ref().trim();

		if view.chars().count() < ACTION_MIN_LEN {
			return Err(InvalidArgumentError::ActionTooShort {
				action: value.as_ref().to_owned(),
				min: ACTION_MIN_LEN,
			});
		}

		Ok(Self(view.to_owned()))
	}
}
impl Deref for Action {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Action {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for Action {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<Action> for String {
	fn from(value: Action) -> Self {
		value.0
	}
}
impl TryFrom<String> for Action {
	type Error = InvalidArgumentError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for Action {
	type Err = InvalidArgumentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for Action {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Action({})", self.0)
	}
}
impl Display for Action {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
