use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's endorsement of one post. Unique per (`user_id`, `post_id`).
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Like {
	pub id: u64,
	pub user_id: u64,
	pub post_id: u64,
	pub create_dt: DateTime<Utc>,
}

/// Pair the uniqueness invariant is keyed on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct LikeKey {
	pub user_id: u64,
	pub post_id: u64,
}

impl LikeKey {
	pub fn new(
		user_id: u64,
		post_id: u64,
	) -> Self {
		Self { user_id, post_id }
	}
}
