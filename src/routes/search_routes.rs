use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::search_controller::SearchController;
use crate::dto::search_dto::{AvailableVehiclesQuery, AvailableVehiclesResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Búsqueda pública de vehículos disponibles
pub fn create_search_router() -> Router<AppState> {
    Router::new().route("/vehicles", get(available_vehicles))
}

async fn available_vehicles(
    State(state): State<AppState>,
    Query(query): Query<AvailableVehiclesQuery>,
) -> Result<Json<AvailableVehiclesResponse>, AppError> {
    let controller = SearchController::new(state.pool.clone());
    let response = controller.available_vehicles(query).await?;
    Ok(Json(response))
}
