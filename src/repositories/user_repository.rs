use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error finding user: {}", e)))?;

        Ok(user)
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error finding user by phone: {}", e)))?;

        Ok(user)
    }

    /// Crear el usuario en el primer login por OTP; si el teléfono ya
    /// existe devuelve la fila existente
    pub async fn upsert_by_phone(&self, phone: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, phone, role, is_blocked, created_at)
            VALUES ($1, $2, 'customer', FALSE, NOW())
            ON CONFLICT (phone) DO UPDATE SET phone = EXCLUDED.phone
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error upserting user: {}", e)))?;

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name), email = COALESCE($3, email)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating profile: {}", e)))?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error listing users: {}", e)))?;

        Ok(users)
    }

    pub async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_blocked = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(blocked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating user block flag: {}", e)))?;

        Ok(user)
    }
}
