use serde::{Deserialize, Serialize};

/// Caller resolved from a bearer credential.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UserIdentity {
	pub user_id: u64,
}

/// Claims carried by the credentials the identity subsystem issues.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
	pub authorized: bool,
	pub user_id: u64,
	/// Expiration (unix timestamp).
	pub exp: i64,
}

impl From<&Claims> for UserIdentity {
	fn from(value: &Claims) -> Self {
		Self { user_id: value.user_id }
	}
}
