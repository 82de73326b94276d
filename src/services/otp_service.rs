//! Servicio de OTP
//!
//! Genera códigos de un solo uso para el login por teléfono y los
//! guarda en Redis con TTL. El envío por SMS es un colaborador externo:
//! aquí solo se registra el código en el log de desarrollo.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;

use crate::cache::{redis_client::RedisClient, CacheOperations};
use crate::utils::errors::{AppError, AppResult};

/// Intentos de verificación permitidos por código
const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct StoredOtp {
    code: String,
    attempts: u32,
    expires_at: DateTime<Utc>,
}

impl StoredOtp {
    /// Segundos de vida restantes; None cuando el código ya caducó.
    /// Las actualizaciones del contador de intentos re-escriben la
    /// clave con este TTL para no alargar la vida del código.
    fn remaining_ttl(&self, now: DateTime<Utc>) -> Option<u64> {
        let seconds = (self.expires_at - now).num_seconds();
        (seconds > 0).then_some(seconds as u64)
    }
}

pub struct OtpService {
    cache: RedisClient,
}

impl OtpService {
    pub fn new(cache: RedisClient) -> Self {
        Self { cache }
    }

    /// Generar y almacenar un código de 6 dígitos para el teléfono.
    /// Reemplaza cualquier código anterior del mismo teléfono.
    pub async fn request_code(&self, phone: &str) -> AppResult<()> {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));

        let key = self.cache.otp_key(phone);
        let ttl = self.cache.default_ttl();
        let stored = StoredOtp {
            code: code.clone(),
            attempts: 0,
            expires_at: Utc::now() + Duration::seconds(ttl as i64),
        };

        self.cache
            .set(&key, &stored, ttl)
            .await
            .map_err(|e| AppError::Cache(format!("Error storing OTP: {}", e)))?;

        // La pasarela SMS es externa; en desarrollo el código va al log
        info!("📱 OTP para {}: {}", phone, code);

        Ok(())
    }

    /// Verificar un código. Un código correcto se consume (un solo uso);
    /// demasiados intentos fallidos lo invalidan.
    pub async fn verify_code(&self, phone: &str, code: &str) -> AppResult<bool> {
        let key = self.cache.otp_key(phone);

        let stored: Option<StoredOtp> = self
            .cache
            .get(&key)
            .await
            .map_err(|e| AppError::Cache(format!("Error reading OTP: {}", e)))?;

        let Some(mut stored) = stored else {
            return Ok(false);
        };

        if stored.code == code {
            self.cache
                .delete(&key)
                .await
                .map_err(|e| AppError::Cache(format!("Error consuming OTP: {}", e)))?;
            return Ok(true);
        }

        stored.attempts += 1;
        match stored.remaining_ttl(Utc::now()) {
            Some(ttl) if stored.attempts < MAX_ATTEMPTS => {
                self.cache
                    .set(&key, &stored, ttl)
                    .await
                    .map_err(|e| AppError::Cache(format!("Error updating OTP attempts: {}", e)))?;
            }
            _ => {
                self.cache
                    .delete(&key)
                    .await
                    .map_err(|e| AppError::Cache(format!("Error invalidating OTP: {}", e)))?;
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(expires_in_seconds: i64) -> StoredOtp {
        StoredOtp {
            code: "123456".to_string(),
            attempts: 0,
            expires_at: Utc::now() + Duration::seconds(expires_in_seconds),
        }
    }

    #[test]
    fn test_remaining_ttl_shrinks_with_the_clock() {
        let otp = stored(120);
        let remaining = otp.remaining_ttl(Utc::now()).unwrap();
        assert!(remaining <= 120);
        assert!(remaining >= 118);

        let later = otp.expires_at - Duration::seconds(10);
        assert_eq!(otp.remaining_ttl(later), Some(10));
    }

    #[test]
    fn test_expired_code_has_no_remaining_ttl() {
        let otp = stored(-1);
        assert_eq!(otp.remaining_ttl(Utc::now()), None);
        // justo en el instante de expiración también caduca
        assert_eq!(otp.remaining_ttl(otp.expires_at), None);
    }
}
