//! Bearer credential verification.
//!
//! Credentials are HS256 JWTs minted by the identity service with a secret
//! shared with this one. Only `resolve` is needed to serve requests; `issue`
//! exists for tooling and tests that need a caller.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use crate::{
	domain::identity::{Claims, UserIdentity},
	services::response::ServiceError,
};

pub trait IdentityVerifier: Send + Sync {
	/// Resolve the caller behind `credential`. Any failure is `Unauthorized`.
	fn resolve(
		&self,
		credential: &str,
	) -> Result<UserIdentity, ServiceError>;
}

#[derive(Clone)]
pub struct JwtService {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
	expire_secs: i64,
}

impl JwtService {
	pub fn new(
		secret: &str,
		expire_secs: i64,
	) -> Self {
		Self {
			encoding_key: EncodingKey::from_secret(secret.as_bytes()),
			decoding_key: DecodingKey::from_secret(secret.as_bytes()),
			validation: Validation::default(),
			expire_secs,
		}
	}

	pub fn issue(
		&self,
		user_id: u64,
	) -> Result<String, jsonwebtoken::errors::Error> {
		let claims = Claims {
			authorized: true,
			user_id,
			exp: Utc::now().timestamp() + self.expire_secs,
		};
		jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
	}
}

impl IdentityVerifier for JwtService {
	fn resolve(
		&self,
		credential: &str,
	) -> Result<UserIdentity, ServiceError> {
		if credential.is_empty() {
			tracing::debug!("Empty credential rejected");
			return Err(ServiceError::Unauthorized);
		}

		let claims = jsonwebtoken::decode::<Claims>(credential, &self.decoding_key, &self.validation)
			.map(|data| data.claims)
			.map_err(|err| {
				tracing::debug!("Credential rejected : {}", err);
				ServiceError::Unauthorized
			})?;

		if !claims.authorized {
			tracing::debug!("Credential for user {} is not authorized", claims.user_id);
			return Err(ServiceError::Unauthorized);
		}
		Ok((&claims).into())
	}
}
