use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::like::{Like, LikeKey};

use super::{LikeStore, StoreError};

#[derive(Default)]
struct MemoryState {
	posts: HashSet<u64>,
	likes: Vec<Like>,
	index: HashMap<LikeKey, u64>,
	last_id: u64,
}

/// In-process store. Every instance is its own arena, so tests never share
/// rows.
///
/// Posts have to be registered before they can be liked; users are not
/// tracked because their identity comes from an already verified credential.
#[derive(Default)]
pub struct MemoryLikeRepository {
	state: Mutex<MemoryState>,
}

impl MemoryLikeRepository {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn with_posts(posts: impl IntoIterator<Item = u64>) -> Self {
		Self {
			state: Mutex::new(MemoryState {
				posts: posts.into_iter().collect(),
				..Default::default()
			}),
		}
	}

	pub async fn register_post(
		&self,
		post_id: u64,
	) {
		self.state.lock().await.posts.insert(post_id);
	}

	pub async fn count(&self) -> usize {
		self.state.lock().await.likes.len()
	}
}

#[async_trait]
impl LikeStore for MemoryLikeRepository {
	async fn exists(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<bool, StoreError> {
		Ok(self.state.lock().await.index.contains_key(&LikeKey::new(user_id, post_id)))
	}

	async fn create(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<Like, StoreError> {
		// Lookup and insert happen under the same guard.
		let mut state = self.state.lock().await;
		if !state.posts.contains(&post_id) {
			return Err(StoreError::PostNotFound);
		}
		let key = LikeKey::new(user_id, post_id);
		if state.index.contains_key(&key) {
			return Err(StoreError::DuplicateLike);
		}

		state.last_id += 1;
		let like = Like {
			id: state.last_id,
			user_id,
			post_id,
			create_dt: Utc::now(),
		};
		state.index.insert(key, like.id);
		state.likes.push(like.clone());
		Ok(like)
	}

	async fn list_by_post(
		&self,
		post_id: u64,
	) -> Result<Vec<Like>, StoreError> {
		let state = self.state.lock().await;
		Ok(state.likes.iter().filter(|like| like.post_id == post_id).cloned().collect())
	}
}
