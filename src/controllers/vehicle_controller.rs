use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleResponse,
};
use crate::repositories::store_repository::StoreRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, validation_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    stores: StoreRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            stores: StoreRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if request.price_per_hour <= Decimal::ZERO {
            return Err(validation_error(
                "price_per_hour",
                "price_per_hour must be greater than zero",
            ));
        }
        if let Some(price_per_day) = request.price_per_day {
            if price_per_day <= Decimal::ZERO {
                return Err(validation_error(
                    "price_per_day",
                    "price_per_day must be greater than zero",
                ));
            }
        }

        // La tienda debe existir y estar activa
        self.stores
            .find_by_id(request.store_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Store with id '{}' not found", request.store_id))
            })?;

        if self
            .repository
            .license_plate_exists(&request.license_plate)
            .await?
        {
            return Err(conflict_error("Vehicle", "license_plate", &request.license_plate));
        }

        let vehicle = self
            .repository
            .create(
                request.store_id,
                request.name,
                request.model,
                request.license_plate,
                request.fuel_type,
                request.price_per_hour,
                request.price_per_day,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_many(&filters).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if let Some(license_plate) = &request.license_plate {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

            if current.license_plate != *license_plate
                && self.repository.license_plate_exists(license_plate).await?
            {
                return Err(conflict_error("Vehicle", "license_plate", license_plate));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.name,
                request.model,
                request.license_plate,
                request.fuel_type,
                request.price_per_hour,
                request.price_per_day,
                request.availability,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.soft_delete(id).await
    }
}
