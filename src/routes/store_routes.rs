use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::store_controller::StoreController;
use crate::dto::common::ApiResponse;
use crate::dto::store_dto::{CreateStoreRequest, NearbyStoresQuery, StoreResponse, UpdateStoreRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de tiendas
pub fn create_store_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stores))
        .route("/nearby", get(nearby_stores))
        .route("/:id", get(get_store))
}

/// Rutas admin de tiendas
pub fn create_store_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_store))
        .route("/:id", put(update_store))
        .route("/:id", delete(delete_store))
}

async fn list_stores(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn nearby_stores(
    State(state): State<AppState>,
    Query(query): Query<NearbyStoresQuery>,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    let response = controller.nearby(query).await?;
    Ok(Json(response))
}

async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoreResponse>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_store(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<Json<ApiResponse<StoreResponse>>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStoreRequest>,
) -> Result<Json<ApiResponse<StoreResponse>>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StoreController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Tienda eliminada exitosamente"
    })))
}
