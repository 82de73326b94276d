use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::vehicle::{FuelType, Vehicle};
use crate::repositories::traits::VehicleFinder;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        store_id: Uuid,
        name: String,
        model: Option<String>,
        license_plate: String,
        fuel_type: FuelType,
        price_per_hour: Decimal,
        price_per_day: Option<Decimal>,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, store_id, name, model, license_plate, fuel_type,
                                  price_per_hour, price_per_day, availability, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(store_id)
        .bind(name)
        .bind(model)
        .bind(license_plate)
        .bind(fuel_type)
        .bind(price_per_hour)
        .bind(price_per_day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error creating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error finding vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_many(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        // Filtro dinámico por igualdad; sin ranking, el orden es el de creación
        let include_inactive = filters.include_inactive.unwrap_or(false);

        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::uuid IS NULL OR store_id = $1)
              AND ($2::fuel_type IS NULL OR fuel_type = $2)
              AND ($3 OR is_active = TRUE)
            ORDER BY created_at
            "#,
        )
        .bind(filters.store_id)
        .bind(filters.fuel_type)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error listing vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(&self, license_plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)",
        )
        .bind(license_plate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error checking license plate: {}", e)))?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        model: Option<String>,
        license_plate: Option<String>,
        fuel_type: Option<FuelType>,
        price_per_hour: Option<Decimal>,
        price_per_day: Option<Decimal>,
        availability: Option<bool>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, model = $3, license_plate = $4, fuel_type = $5,
                price_per_hour = $6, price_per_day = $7, availability = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(model.or(current.model))
        .bind(license_plate.unwrap_or(current.license_plate))
        .bind(fuel_type.unwrap_or(current.fuel_type))
        .bind(price_per_hour.unwrap_or(current.price_per_hour))
        .bind(price_per_day.or(current.price_per_day))
        .bind(availability.unwrap_or(current.availability))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    /// Soft delete: el vehículo deja de aparecer en búsquedas pero sus
    /// reservas históricas se conservan
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE vehicles SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Internal(format!("Error deleting vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl VehicleFinder for VehicleRepository {
    async fn find_available_in_stores(&self, store_ids: &[Uuid]) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE store_id = ANY($1)
              AND availability = TRUE
              AND is_active = TRUE
            ORDER BY created_at
            "#,
        )
        .bind(store_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error finding available vehicles: {}", e)))?;

        Ok(vehicles)
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = self.find_by_id(id).await?;
        Ok(vehicle.filter(|v| v.is_active))
    }
}
