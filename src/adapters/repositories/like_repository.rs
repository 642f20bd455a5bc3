use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::like::Like;

use super::{LikeStore, StoreError};

const USER_FOREIGN_KEY: &str = "likes_user_id_fkey";

/// PostgreSQL backed store. Uniqueness rests on the `likes_user_post_key`
/// constraint, so concurrent inserts of the same pair cannot both land.
#[derive(Clone)]
pub struct PgLikeRepository {
	pool: PgPool,
}

impl PgLikeRepository {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[derive(sqlx::FromRow)]
struct LikeRow {
	id: i64,
	user_id: i64,
	post_id: i64,
	create_dt: DateTime<Utc>,
}

impl TryFrom<LikeRow> for Like {
	type Error = StoreError;
	fn try_from(value: LikeRow) -> Result<Self, Self::Error> {
		let column = |v: i64| u64::try_from(v).map_err(|err| StoreError::Storage(Box::new(err)));
		Ok(Like {
			id: column(value.id)?,
			user_id: column(value.user_id)?,
			post_id: column(value.post_id)?,
			create_dt: value.create_dt,
		})
	}
}

// Ids above i64::MAX cannot exist in a BIGINT column.
fn to_column(id: u64) -> Option<i64> {
	i64::try_from(id).ok()
}

fn classify(err: sqlx::Error) -> StoreError {
	if let sqlx::Error::Database(db_err) = &err {
		if db_err.is_unique_violation() {
			return StoreError::DuplicateLike;
		}
		if db_err.is_foreign_key_violation() {
			return match db_err.constraint() {
				Some(USER_FOREIGN_KEY) => StoreError::UserNotFound,
				_ => StoreError::PostNotFound,
			};
		}
	}
	err.into()
}

#[async_trait]
impl LikeStore for PgLikeRepository {
	async fn exists(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<bool, StoreError> {
		let (Some(user_id), Some(post_id)) = (to_column(user_id), to_column(post_id)) else {
			return Ok(false);
		};
		let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)")
			.bind(user_id)
			.bind(post_id)
			.fetch_one(&self.pool)
			.await?;
		Ok(exists)
	}

	async fn create(
		&self,
		user_id: u64,
		post_id: u64,
	) -> Result<Like, StoreError> {
		let user_id = to_column(user_id).ok_or(StoreError::UserNotFound)?;
		let post_id = to_column(post_id).ok_or(StoreError::PostNotFound)?;

		let row = sqlx::query_as::<_, LikeRow>(
			"INSERT INTO likes (user_id, post_id) VALUES ($1, $2) RETURNING id, user_id, post_id, create_dt",
		)
		.bind(user_id)
		.bind(post_id)
		.fetch_one(&self.pool)
		.await
		.map_err(classify)?;

		row.try_into()
	}

	async fn list_by_post(
		&self,
		post_id: u64,
	) -> Result<Vec<Like>, StoreError> {
		let Some(post_id) = to_column(post_id) else {
			return Ok(vec![]);
		};
		sqlx::query_as::<_, LikeRow>("SELECT id, user_id, post_id, create_dt FROM likes WHERE post_id = $1 ORDER BY id")
			.bind(post_id)
			.fetch_all(&self.pool)
			.await?
			.into_iter()
			.map(Like::try_from)
			.collect()
	}
}
