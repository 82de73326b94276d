use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::store::Store;
use crate::repositories::traits::StoreFinder;
use crate::utils::errors::{AppError, AppResult};

// Columnas explícitas: la columna geometry `location` solo participa en
// los predicados espaciales, nunca se decodifica en el modelo
const STORE_COLUMNS: &str =
    "id, name, district, address, phone, open_time, close_time, latitude, longitude, is_active, created_at";

pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: String,
        district: String,
        address: String,
        phone: String,
        open_time: String,
        close_time: String,
        latitude: f64,
        longitude: f64,
    ) -> Result<Store, AppError> {
        let id = Uuid::new_v4();

        let store = sqlx::query_as::<_, Store>(&format!(
            r#"
            INSERT INTO stores (id, name, district, address, phone, open_time, close_time,
                                location, latitude, longitude, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7,
                    ST_SetSRID(ST_MakePoint($9, $8), 4326), $8, $9, TRUE, NOW())
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .bind(district)
        .bind(address)
        .bind(phone)
        .bind(open_time)
        .bind(close_time)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error creating store: {}", e)))?;

        Ok(store)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {} FROM stores WHERE id = $1 AND is_active = TRUE",
            STORE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error finding store: {}", e)))?;

        Ok(store)
    }

    pub async fn find_all(&self) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            "SELECT {} FROM stores WHERE is_active = TRUE ORDER BY created_at",
            STORE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error listing stores: {}", e)))?;

        Ok(stores)
    }

    /// Búsqueda espacial: tiendas activas dentro del radio, más cercanas
    /// primero. El radio se pasa en km y ST_DWithin trabaja en metros.
    pub async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(&format!(
            r#"
            SELECT {}
            FROM stores
            WHERE is_active = TRUE
              AND ST_DWithin(location::geography, ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography, $3)
            ORDER BY location::geography <-> ST_SetSRID(ST_MakePoint($2, $1), 4326)::geography
            "#,
            STORE_COLUMNS
        ))
        .bind(latitude)
        .bind(longitude)
        .bind(radius_km * 1000.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error searching nearby stores: {}", e)))?;

        Ok(stores)
    }

    /// La columna geometry y las columnas denormalizadas lat/lon se
    /// actualizan juntas en la misma sentencia (invariante de sincronía)
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        district: Option<String>,
        address: Option<String>,
        phone: Option<String>,
        open_time: Option<String>,
        close_time: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Store, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

        let latitude = latitude.unwrap_or(current.latitude);
        let longitude = longitude.unwrap_or(current.longitude);

        let store = sqlx::query_as::<_, Store>(&format!(
            r#"
            UPDATE stores
            SET name = $2, district = $3, address = $4, phone = $5,
                open_time = $6, close_time = $7,
                location = ST_SetSRID(ST_MakePoint($9, $8), 4326),
                latitude = $8, longitude = $9
            WHERE id = $1
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(district.unwrap_or(current.district))
        .bind(address.unwrap_or(current.address))
        .bind(phone.unwrap_or(current.phone))
        .bind(open_time.unwrap_or(current.open_time))
        .bind(close_time.unwrap_or(current.close_time))
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating store: {}", e)))?;

        Ok(store)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE stores SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error deleting store: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Store not found".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl StoreFinder for StoreRepository {
    async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> AppResult<Vec<Store>> {
        self.find_within_radius(latitude, longitude, radius_km).await
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Store>> {
        self.find_by_id(id).await
    }
}
