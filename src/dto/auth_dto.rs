use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole};

/// Request para solicitar un código OTP
#[derive(Debug, Deserialize, Validate)]
pub struct RequestOtpRequest {
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,
}

/// Request para verificar un código OTP
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,

    #[validate(length(equal = 6))]
    pub code: String,
}

/// Request para actualizar el perfil propio
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

/// Response de usuario (perfil)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_blocked: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            name: user.name,
            email: user.email,
            role: user.role,
            is_blocked: user.is_blocked,
        }
    }
}

/// Response del login por OTP
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}
