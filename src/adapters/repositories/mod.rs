pub(crate) mod like_repository;
pub(crate) mod memory_repository;

pub use like_repository::PgLikeRepository;
pub use memory_repository::MemoryLikeRepository;

use std::fmt::Display;

use async_trait::async_trait;

use crate::{domain::like::Like, services::response::AnyError};

/// Persistence for like records.
///
/// `create` must reject a second like for the same (user, post) pair on its
/// own, even when two inserts race; callers may not rely on `exists` for that.
#[async_trait]
pub trait LikeStore: Send + Sync {
	async fn exists(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<bool, StoreError>;

	async fn create(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<Like, StoreError>;

	/// Likes of `post_id` in creation order. Empty when there are none.
	async fn list_by_post(
		&self,
		post_id: u64,
	) -> Result<Vec<Like>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
	DuplicateLike,
	PostNotFound,
	UserNotFound,
	Storage(Box<AnyError>),
}

impl Display for StoreError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		match self {
			StoreError::DuplicateLike => write!(f, "DuplicateLike"),
			StoreError::PostNotFound => write!(f, "PostNotFound"),
			StoreError::UserNotFound => write!(f, "UserNotFound"),
			StoreError::Storage(err) => write!(f, "{}", err),
		}
	}
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
	fn from(value: sqlx::Error) -> Self {
		StoreError::Storage(Box::new(value))
	}
}
