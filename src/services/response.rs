use std::fmt::Display;

pub type AnyError = dyn std::error::Error + Send + Sync + 'static;

/// Outcome of a failed like operation. Transport mapping happens in `routes`.
#[derive(Debug)]
pub enum ServiceError {
	Unauthorized,
	DoubleLike,
	PostNotFound,
	InvalidRequest,
	StorageError(Box<AnyError>),
}

impl Display for ServiceError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		match self {
			ServiceError::Unauthorized => write!(f, "Unauthorized"),
			ServiceError::DoubleLike => write!(f, "You cannot like this post twice"),
			ServiceError::PostNotFound => write!(f, "No post found"),
			ServiceError::InvalidRequest => write!(f, "Invalid Request"),
			ServiceError::StorageError(err) => write!(f, "{}", err),
		}
	}
}

impl std::error::Error for ServiceError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ServiceError::StorageError(err) => Some(err.as_ref()),
			_ => None,
		}
	}
}
