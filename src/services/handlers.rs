use std::sync::Arc;

use crate::{
	adapters::{
		identity::IdentityVerifier,
		repositories::{LikeStore, StoreError},
	},
	domain::like::Like,
};

use super::response::ServiceError;

/// Like a post, list a post's likes. Holds no state of its own.
#[derive(Clone)]
pub struct LikeService {
	verifier: Arc<dyn IdentityVerifier>,
	store: Arc<dyn LikeStore>,
}

impl LikeService {
	pub fn new(
		verifier: Arc<dyn IdentityVerifier>,
		store: Arc<dyn LikeStore>,
	) -> Self {
		Self { verifier, store }
	}

	pub async fn like_post(
		&self,
		credential: &str,
		post_id: u64,
	) -> Result<Like, ServiceError> {
		let identity = self.verifier.resolve(credential)?;

		// A repeat surfaces as `DuplicateLike` from the insert itself.
		let like = self.store.create(identity.user_id, post_id).await.map_err(Self::translate)?;
		tracing::info!(like_id = like.id, user_id = like.user_id, post_id = like.post_id, "Post liked");
		Ok(like)
	}

	pub async fn get_likes(
		&self,
		post_id: u64,
	) -> Result<Vec<Like>, ServiceError> {
		self.store.list_by_post(post_id).await.map_err(Self::translate)
	}

	fn translate(err: StoreError) -> ServiceError {
		match err {
			StoreError::DuplicateLike => ServiceError::DoubleLike,
			StoreError::PostNotFound => ServiceError::PostNotFound,
			// the credential outlived its user
			StoreError::UserNotFound => ServiceError::Unauthorized,
			StoreError::Storage(err) => {
				tracing::error!("Like storage failure : {:?}", err);
				ServiceError::StorageError(err)
			}
		}
	}
}

#[cfg(test)]
mod test {
	use std::sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	};

	use async_trait::async_trait;
	use rand::Rng;

	use crate::{
		adapters::{
			identity::JwtService,
			repositories::{LikeStore, MemoryLikeRepository, StoreError},
		},
		domain::like::Like,
		services::{handlers::LikeService, response::ServiceError},
	};

	const SECRET: &str = "likes-test-secret";

	fn set_up(posts: impl IntoIterator<Item = u64>) -> (LikeService, Arc<MemoryLikeRepository>, JwtService) {
		let jwt = JwtService::new(SECRET, 3600);
		let store = Arc::new(MemoryLikeRepository::with_posts(posts));
		(LikeService::new(Arc::new(jwt.clone()), store.clone()), store, jwt)
	}

	#[tokio::test]
	async fn test_like_scenario() {
		'_given: {
			let (service, store, jwt) = set_up([10]);
			let first = jwt.issue(1).unwrap();
			let second = jwt.issue(2).unwrap();

			'_when: {
				let like = service.like_post(&first, 10).await.unwrap();
				assert_eq!((like.user_id, like.post_id), (1, 10));

				let like = service.like_post(&second, 10).await.unwrap();
				assert_eq!((like.user_id, like.post_id), (2, 10));

				assert!(matches!(service.like_post(&first, 10).await, Err(ServiceError::DoubleLike)));
				assert!(matches!(service.like_post("", 10).await, Err(ServiceError::Unauthorized)));

				assert_eq!(service.get_likes(10).await.unwrap().len(), 2);
				assert_eq!(store.count().await, 2);
			}
		}
	}

	#[tokio::test]
	async fn test_repeat_is_always_rejected() {
		let (service, store, jwt) = set_up([5]);
		let token = jwt.issue(9).unwrap();

		service.like_post(&token, 5).await.unwrap();
		for _ in 0..3 {
			assert!(matches!(service.like_post(&token, 5).await, Err(ServiceError::DoubleLike)));
		}
		assert_eq!(store.count().await, 1);
	}

	#[tokio::test]
	async fn test_bad_credentials_write_nothing() {
		let (service, store, _) = set_up([5]);
		let foreign = JwtService::new("not-our-secret", 3600).issue(1).unwrap();

		for credential in ["", "This is an incorrect token", foreign.as_str()] {
			assert!(matches!(service.like_post(credential, 5).await, Err(ServiceError::Unauthorized)));
		}
		assert_eq!(store.count().await, 0);
	}

	#[tokio::test]
	async fn test_unknown_post() {
		let (service, store, jwt) = set_up(std::iter::empty());
		let token = jwt.issue(1).unwrap();

		assert!(matches!(service.like_post(&token, 404).await, Err(ServiceError::PostNotFound)));
		assert_eq!(store.count().await, 0);
	}

	#[tokio::test]
	async fn test_get_likes_counts() {
		let mut rng = rand::thread_rng();
		let post_id = rng.gen_range(1..u64::MAX);
		let likers = rng.gen_range(1..20u64);
		let (service, _, jwt) = set_up([post_id]);

		assert!(service.get_likes(post_id).await.unwrap().is_empty());
		for user_id in 0..likers {
			service.like_post(&jwt.issue(user_id).unwrap(), post_id).await.unwrap();
		}

		let likes = service.get_likes(post_id).await.unwrap();
		assert_eq!(likes.len() as u64, likers);
		assert!(likes.iter().all(|like| like.post_id == post_id));
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_likes_single_winner() {
		let (service, store, jwt) = set_up([10]);
		let token = jwt.issue(1).unwrap();

		let attempts = (0..16).map(|_| {
			let service = service.clone();
			let token = token.clone();
			tokio::spawn(async move { service.like_post(&token, 10).await })
		});
		let results = futures::future::join_all(attempts).await;

		let created = results.iter().filter(|res| matches!(res, Ok(Ok(_)))).count();
		let doubled = results.iter().filter(|res| matches!(res, Ok(Err(ServiceError::DoubleLike)))).count();
		assert_eq!(created, 1);
		assert_eq!(doubled, 15);
		assert_eq!(store.count().await, 1);
	}

	/// Counts storage calls made through it.
	#[derive(Default)]
	struct CountingStore {
		inner: MemoryLikeRepository,
		exists_calls: AtomicUsize,
		create_calls: AtomicUsize,
	}

	#[async_trait]
	impl LikeStore for CountingStore {
		async fn exists(
			&self,
			user_id: u64,
			post_id: u64,
		) -> Result<bool, StoreError> {
			self.exists_calls.fetch_add(1, Ordering::SeqCst);
			self.inner.exists(user_id, post_id).await
		}
		async fn create(
			&self,
			user_id: u64,
			post_id: u64,
		) -> Result<Like, StoreError> {
			self.create_calls.fetch_add(1, Ordering::SeqCst);
			self.inner.create(user_id, post_id).await
		}
		async fn list_by_post(
			&self,
			post_id: u64,
		) -> Result<Vec<Like>, StoreError> {
			self.inner.list_by_post(post_id).await
		}
	}

	#[tokio::test]
	async fn test_like_post_is_a_single_insert() {
		'_given: {
			let jwt = JwtService::new(SECRET, 3600);
			let store = Arc::new(CountingStore::default());
			store.inner.register_post(10).await;
			let service = LikeService::new(Arc::new(jwt.clone()), store.clone());
			let token = jwt.issue(1).unwrap();

			'_when: {
				service.like_post(&token, 10).await.unwrap();
				assert_eq!(store.exists_calls.load(Ordering::SeqCst), 0);
				assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);

				// the repeat is rejected by the insert, not by a lookup
				assert!(matches!(service.like_post(&token, 10).await, Err(ServiceError::DoubleLike)));
				assert_eq!(store.exists_calls.load(Ordering::SeqCst), 0);
				assert_eq!(store.create_calls.load(Ordering::SeqCst), 2);
				assert_eq!(store.inner.count().await, 1);
			}
		}
	}

	struct BrokenStore;

	#[async_trait]
	impl LikeStore for BrokenStore {
		async fn exists(
			&self,
			_user_id: u64,
			_post_id: u64,
		) -> Result<bool, StoreError> {
			Ok(false)
		}
		async fn create(
			&self,
			_user_id: u64,
			_post_id: u64,
		) -> Result<Like, StoreError> {
			Err(StoreError::Storage("connection reset".into()))
		}
		async fn list_by_post(
			&self,
			_post_id: u64,
		) -> Result<Vec<Like>, StoreError> {
			Err(StoreError::UserNotFound)
		}
	}

	#[tokio::test]
	async fn test_store_errors_are_translated() {
		let jwt = JwtService::new(SECRET, 3600);
		let service = LikeService::new(Arc::new(jwt.clone()), Arc::new(BrokenStore));

		let err = service.like_post(&jwt.issue(1).unwrap(), 1).await.unwrap_err();
		assert!(matches!(err, ServiceError::StorageError(_)));
		assert_eq!(err.to_string(), "connection reset");
		assert!(matches!(service.get_likes(1).await, Err(ServiceError::Unauthorized)));
	}
}
