use crate::{
	dependencies::{config, connection_pool, identity_verifier, like_store},
	services::{handlers::LikeService, response::AnyError},
};

pub struct Bootstrap;
impl Bootstrap {
	/// Wire the service against PostgreSQL, running pending migrations first.
	pub async fn like_service() -> Result<LikeService, Box<AnyError>> {
		let config = config()?;
		let pool = connection_pool(config).await?;
		Ok(LikeService::new(identity_verifier(config), like_store(pool)))
	}
}
