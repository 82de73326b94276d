//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el enum de combustible.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.
//! Los vehículos nunca se borran físicamente: `is_active = false` los
//! excluye de la búsqueda.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub model: Option<String>,
    pub license_plate: String,
    pub fuel_type: FuelType,
    pub price_per_hour: Decimal,
    pub price_per_day: Option<Decimal>,
    pub availability: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
