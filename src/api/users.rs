//! Users endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json};
use crate::domain::User;

/// User representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Payload of `GET /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersData {
    pub users: Vec<UserResponse>,
}

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/ping", get(ping))
        .route("/{user_id}", get(get_user))
}

/// GET /users/ping
pub async fn ping(State(state): State<AppState>) -> Json<ApiResponse<()>> {
    Json(ApiResponse::success_message(state.user_service.liveness_check()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    let user = state
        .user_service
        .create_from_payload(Some(&payload))
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_message(format!(
            "{} was added!",
            user.email()
        ))),
    ))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UsersData>>, ApiError> {
    let users = state.user_service.list().await.map_err(ApiError::from)?;
    debug!(count = users.len(), "Listing users");

    Ok(Json(ApiResponse::success_data(UsersData {
        users: users.iter().map(UserResponse::from).collect(),
    })))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state
        .user_service
        .get_by_id(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::success_data(UserResponse::from(&user))))
}
