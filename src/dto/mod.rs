//! DTOs de la API
//!
//! Requests y responses serializables, separados de los modelos de base
//! de datos.

pub mod common;
pub mod auth_dto;
pub mod store_dto;
pub mod vehicle_dto;
pub mod order_dto;
pub mod search_dto;
