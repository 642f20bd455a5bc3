use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::services::response::ServiceError;

/// Success body: `{"response": ..}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
	pub response: T,
}

impl ServiceError {
	fn status_and_key(&self) -> (StatusCode, &'static str) {
		match self {
			ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
			ServiceError::DoubleLike => (StatusCode::CONFLICT, "Double_like"),
			ServiceError::PostNotFound => (StatusCode::NOT_FOUND, "No_post"),
			ServiceError::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid_request"),
			ServiceError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal_error"),
		}
	}
}

/// Error body: `{"error": {"<Key>": "<message>"}}`.
impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let (status, key) = self.status_and_key();
		let message = match self {
			ServiceError::StorageError(_) => "Internal server error".to_string(),
			other => other.to_string(),
		};

		let mut error = Map::new();
		error.insert(key.to_string(), Value::String(message));
		(status, Json(json!({ "error": error }))).into_response()
	}
}
