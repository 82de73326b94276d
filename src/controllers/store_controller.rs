use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::store_dto::{CreateStoreRequest, NearbyStoresQuery, StoreResponse, UpdateStoreRequest};
use crate::repositories::store_repository::StoreRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_coordinates, validate_local_time};

pub struct StoreController {
    repository: StoreRepository,
}

impl StoreController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StoreRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateStoreRequest,
    ) -> Result<ApiResponse<StoreResponse>, AppError> {
        request.validate()?;

        if validate_local_time(&request.open_time).is_err() {
            return Err(validation_error("open_time", "open_time must be HH:MM"));
        }
        if validate_local_time(&request.close_time).is_err() {
            return Err(validation_error("close_time", "close_time must be HH:MM"));
        }

        let store = self
            .repository
            .create(
                request.name,
                request.district,
                request.address,
                request.phone,
                request.open_time,
                request.close_time,
                request.latitude,
                request.longitude,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            store.into(),
            "Tienda creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<StoreResponse, AppError> {
        let store = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Store with id '{}' not found", id)))?;

        Ok(store.into())
    }

    pub async fn list(&self) -> Result<Vec<StoreResponse>, AppError> {
        let stores = self.repository.find_all().await?;
        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    pub async fn nearby(&self, query: NearbyStoresQuery) -> Result<Vec<StoreResponse>, AppError> {
        if validate_coordinates(query.latitude, query.longitude).is_err() {
            return Err(validation_error(
                "coordinates",
                "latitude must be in [-90, 90] and longitude in [-180, 180]",
            ));
        }
        if query.radius_km <= 0.0 {
            return Err(validation_error("radius_km", "radius must be greater than zero"));
        }

        let stores = self
            .repository
            .find_within_radius(query.latitude, query.longitude, query.radius_km)
            .await?;

        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStoreRequest,
    ) -> Result<ApiResponse<StoreResponse>, AppError> {
        request.validate()?;

        if let Some(open_time) = &request.open_time {
            if validate_local_time(open_time).is_err() {
                return Err(validation_error("open_time", "open_time must be HH:MM"));
            }
        }
        if let Some(close_time) = &request.close_time {
            if validate_local_time(close_time).is_err() {
                return Err(validation_error("close_time", "close_time must be HH:MM"));
            }
        }

        let store = self
            .repository
            .update(
                id,
                request.name,
                request.district,
                request.address,
                request.phone,
                request.open_time,
                request.close_time,
                request.latitude,
                request.longitude,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            store.into(),
            "Tienda actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }
}
