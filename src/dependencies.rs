use std::sync::{Arc, OnceLock};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
	adapters::{identity::JwtService, repositories::PgLikeRepository},
	config::{Config, ConfigError},
};

pub fn config() -> Result<&'static Config, ConfigError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}

pub async fn connection_pool(config: &Config) -> Result<&'static PgPool, sqlx::Error> {
	static POOL: OnceLock<PgPool> = OnceLock::new();

	let p = match POOL.get() {
		None => {
			let pool = PgPoolOptions::new()
				.max_connections(config.database_max_connections)
				.connect(&config.database_url)
				.await?;
			sqlx::migrate!().run(&pool).await?;
			POOL.get_or_init(|| pool)
		}
		Some(pool) => pool,
	};
	Ok(p)
}

pub fn identity_verifier(config: &Config) -> Arc<JwtService> {
	Arc::new(JwtService::new(&config.api_secret, config.token_ttl_secs))
}

pub fn like_store(pool: &PgPool) -> Arc<PgLikeRepository> {
	Arc::new(PgLikeRepository::new(pool.clone()))
}
