//! Controllers
//!
//! Orquestan validación, repositorios y servicios para cada recurso de
//! la API.

pub mod auth_controller;
pub mod store_controller;
pub mod vehicle_controller;
pub mod order_controller;
pub mod search_controller;
pub mod user_controller;
