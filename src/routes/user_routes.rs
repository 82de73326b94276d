use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::UserResponse;
use crate::dto::common::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Gestión admin de usuarios
pub fn create_user_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/block", post(block_user))
        .route("/:id/unblock", post(unblock_user))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn block_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.block(id).await?;
    Ok(Json(response))
}

async fn unblock_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.unblock(id).await?;
    Ok(Json(response))
}
