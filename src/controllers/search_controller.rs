use sqlx::PgPool;

use crate::dto::search_dto::{AvailableVehiclesQuery, AvailableVehiclesResponse};
use crate::dto::vehicle_dto::VehicleResponse;
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::store_repository::StoreRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::{
    AvailabilityService, BookingWindow, PageParams, SearchArea,
};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct SearchController {
    service: AvailabilityService<StoreRepository, VehicleRepository, OrderRepository>,
}

impl SearchController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: AvailabilityService::new(
                StoreRepository::new(pool.clone()),
                VehicleRepository::new(pool.clone()),
                OrderRepository::new(pool),
            ),
        }
    }

    pub async fn available_vehicles(
        &self,
        query: AvailableVehiclesQuery,
    ) -> Result<AvailableVehiclesResponse, AppError> {
        let area = Self::resolve_area(&query)?;

        let start = validate_datetime(&query.start_time)
            .map_err(|_| validation_error("start_time", "start_time must be RFC3339"))?;
        let end = validate_datetime(&query.end_time)
            .map_err(|_| validation_error("end_time", "end_time must be RFC3339"))?;
        let window = BookingWindow::new(start, end)?;

        let params = PageParams::new(query.page, query.limit)?;

        let page = self.service.search(area, window, params).await?;

        Ok(AvailableVehiclesResponse {
            vehicles: page.items.into_iter().map(VehicleResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        })
    }

    /// store_id explícito O círculo completo (latitude, longitude,
    /// radius_km); cualquier otra combinación se rechaza
    fn resolve_area(query: &AvailableVehiclesQuery) -> Result<SearchArea, AppError> {
        if let Some(store_id) = query.store_id {
            return Ok(SearchArea::Store(store_id));
        }

        match (query.latitude, query.longitude, query.radius_km) {
            (Some(latitude), Some(longitude), Some(radius_km)) => Ok(SearchArea::Near {
                latitude,
                longitude,
                radius_km,
            }),
            _ => Err(validation_error(
                "store_id",
                "either store_id or latitude, longitude and radius_km are required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_query() -> AvailableVehiclesQuery {
        AvailableVehiclesQuery {
            store_id: None,
            latitude: Some(12.97),
            longitude: Some(77.59),
            radius_km: Some(5.0),
            start_time: "2024-01-10T10:00:00Z".to_string(),
            end_time: "2024-01-10T12:00:00Z".to_string(),
            page: None,
            limit: None,
        }
    }

    #[test]
    fn test_resolve_area_prefers_explicit_store() {
        let mut query = base_query();
        query.store_id = Some(uuid::Uuid::new_v4());

        assert!(matches!(
            SearchController::resolve_area(&query).unwrap(),
            SearchArea::Store(_)
        ));
    }

    #[test]
    fn test_resolve_area_requires_full_circle() {
        let mut query = base_query();
        query.radius_km = None;

        assert!(SearchController::resolve_area(&query).is_err());
    }
}
