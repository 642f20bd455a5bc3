use axum::{
	extract::{Path, State},
	headers::{authorization::Bearer, Authorization},
	http::StatusCode,
	Json, TypedHeader,
};
use axum_macros::debug_handler;

use crate::{
	domain::like::Like,
	services::{handlers::LikeService, response::ServiceError},
};

use super::response::Envelope;

fn parse_post_id(raw: &str) -> Result<u64, ServiceError> {
	raw.parse::<u64>().map_err(|_| ServiceError::InvalidRequest)
}

#[debug_handler]
pub async fn like_post(
	State(service): State<LikeService>,
	Path(post_id): Path<String>,
	current_user: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<(StatusCode, Json<Envelope<Like>>), ServiceError> {
	let post_id = parse_post_id(&post_id)?;

	// A missing or non-Bearer header leaves the credential empty, which never resolves.
	let credential = if let Some(TypedHeader(Authorization::<Bearer>(value))) = current_user {
		value.token().to_string()
	} else {
		String::new()
	};

	let like = service.like_post(&credential, post_id).await?;
	Ok((StatusCode::CREATED, Json(Envelope { response: like })))
}

#[debug_handler]
pub async fn get_likes(
	State(service): State<LikeService>,
	Path(post_id): Path<String>,
) -> Result<Json<Envelope<Vec<Like>>>, ServiceError> {
	let post_id = parse_post_id(&post_id)?;
	let likes = service.get_likes(post_id).await?;
	Ok(Json(Envelope { response: likes }))
}
