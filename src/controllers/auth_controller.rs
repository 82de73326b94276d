use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{
    LoginResponse, RequestOtpRequest, UpdateProfileRequest, UserResponse, VerifyOtpRequest,
};
use crate::dto::common::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::services::otp_service::OtpService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{self, JwtConfig};

pub struct AuthController {
    users: UserRepository,
    otp: OtpService,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            otp: OtpService::new(state.redis.clone()),
            jwt_config: JwtConfig::from(&state.config),
        }
    }

    pub async fn request_otp(
        &self,
        request: RequestOtpRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        // Un usuario bloqueado no puede iniciar sesión
        if let Some(user) = self.users.find_by_phone(&request.phone).await? {
            if user.is_blocked {
                return Err(AppError::Forbidden("Usuario bloqueado".to_string()));
            }
        }

        self.otp.request_code(&request.phone).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Código OTP enviado".to_string(),
        ))
    }

    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        if !self.otp.verify_code(&request.phone, &request.code).await? {
            return Err(AppError::Unauthorized("Código OTP inválido o expirado".to_string()));
        }

        // Primer login crea el usuario con rol customer
        let user = self.users.upsert_by_phone(&request.phone).await?;

        if user.is_blocked {
            return Err(AppError::Forbidden("Usuario bloqueado".to_string()));
        }

        let token = jwt::generate_token(user.id, user.role, &self.jwt_config)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self
            .users
            .update_profile(user_id, request.name, request.email)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
