//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Teléfonos en formato E.164 (p.ej. +919876543210)
    pub static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap();
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar horario local "HH:MM" (horarios de apertura/cierre de tiendas)
pub fn validate_local_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        let mut error = ValidationError::new("local_time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        error
    })
}

/// Validar número de teléfono
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        Err(error)
    }
}

/// Validar un par de coordenadas (lat, lon)
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &latitude);
        return Err(error);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &longitude);
        return Err(error);
    }
    Ok(())
}
