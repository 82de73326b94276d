use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::UserResponse;
use crate::dto::common::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

/// Gestión admin de usuarios
pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn block(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        self.ensure_exists(id).await?;
        let user = self.repository.set_blocked(id, true).await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario bloqueado".to_string(),
        ))
    }

    pub async fn unblock(&self, id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        self.ensure_exists(id).await?;
        let user = self.repository.set_blocked(id, false).await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario desbloqueado".to_string(),
        ))
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<(), AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;
        Ok(())
    }
}
