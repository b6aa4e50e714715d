use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use lyre_service::{
	Error as ServiceError, RandomSongRequest, RandomSongResponse, RecommendRequest,
	RecommendResponse, StatsResponse,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/recommend", post(recommend))
		.route("/recommend/advanced", post(recommend_advanced))
		.route("/recommend/random", post(random_song))
		.route("/recommend/stats", get(stats))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn recommend(
	State(state): State<AppState>,
	payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.recommend(payload).await?;

	Ok(Json(response))
}

async fn recommend_advanced(
	State(state): State<AppState>,
	payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.recommend_advanced(payload).await?;

	Ok(Json(response))
}

async fn random_song(
	State(state): State<AppState>,
	payload: Result<Json<RandomSongRequest>, JsonRejection>,
) -> Result<Json<RandomSongResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.random_song(payload).await?;

	Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
	let response = state.service.stats().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::NotFound { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "NO_SONGS_FOUND", message),
			ServiceError::Provider { message } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message),
			ServiceError::Storage { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
