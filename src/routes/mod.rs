mod likes;
mod response;

use axum::{
	routing::{get, post},
	Json, Router,
};

use crate::services::handlers::LikeService;

pub use response::Envelope;

async fn health() -> Json<Envelope<&'static str>> {
	Json(Envelope { response: "ok" })
}

/// `POST /likes/:post_id` requires a bearer credential, `GET /likes/:post_id` is public.
pub fn create_routes(service: LikeService) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/likes/:post_id", post(likes::like_post).get(likes::get_likes))
		.with_state(service)
}
