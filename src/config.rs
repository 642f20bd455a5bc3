use std::fmt::Display;

pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	/// Port server is listening to
	pub server_ip_port: String,
	pub database_url: String,
	pub database_max_connections: u32,
	pub allow_origins: String,

	/// HMAC secret shared with the identity service
	pub api_secret: String,
	/// Lifetime of credentials minted by `JwtService::issue`
	pub token_ttl_secs: i64,
}

impl Config {
	pub fn new() -> Result<Config, ConfigError> {
		dotenv::dotenv().ok();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or("warn".to_string());
		let server_ip_port = std::env::var("SERVER_IP_PORT").unwrap_or("0.0.0.0:80".into());
		let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
		let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 30)?;
		let allow_origins = std::env::var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000".to_string());
		let api_secret = std::env::var("API_SECRET").map_err(|_| ConfigError::Missing("API_SECRET"))?;
		let token_ttl_secs = parse_or("TOKEN_TTL_SECS", 3600)?;

		if api_secret.is_empty() {
			return Err(ConfigError::Invalid("API_SECRET"));
		}

		Ok(Config {
			log_level,
			server_ip_port,
			database_url,
			database_max_connections,
			allow_origins,
			api_secret,
			token_ttl_secs,
		})
	}
}

fn parse_or<T: std::str::FromStr>(
	key: &'static str,
	default: T,
) -> Result<T, ConfigError> {
	match std::env::var(key) {
		Ok(value) => value.parse().map_err(|_| ConfigError::Invalid(key)),
		Err(_) => Ok(default),
	}
}

#[derive(Debug)]
pub enum ConfigError {
	Missing(&'static str),
	Invalid(&'static str),
}

impl Display for ConfigError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		match self {
			ConfigError::Missing(key) => write!(f, "{} must be set", key),
			ConfigError::Invalid(key) => write!(f, "{} has an invalid value", key),
		}
	}
}

impl std::error::Error for ConfigError {}
