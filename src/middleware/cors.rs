//! Capa de CORS
//!
//! El frontend consume la API directamente desde el navegador. Sin
//! orígenes configurados se acepta cualquiera (desarrollo); con
//! CORS_ORIGINS definido solo se aceptan los listados.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::EnvironmentConfig;

/// Construir la capa de CORS según la configuración del entorno
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    let origins = parse_origins(&config.cors_origins);

    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Orígenes válidos de la lista configurada; los malformados se descartan
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_discards_malformed_values() {
        let origins = vec![
            "https://app.example.com".to_string(),
            "no\nválido".to_string(),
        ];
        let parsed = parse_origins(&origins);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], "https://app.example.com");
    }

    #[test]
    fn test_parse_origins_empty_when_nothing_configured() {
        assert!(parse_origins(&[]).is_empty());
    }
}
