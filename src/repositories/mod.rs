//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las queries SQL de una tabla. Los traits
//! de `traits` abstraen las queries de lectura que consume el servicio
//! de disponibilidad, para poder testearlo sin base de datos.

pub mod traits;
pub mod store_repository;
pub mod vehicle_repository;
pub mod order_repository;
pub mod user_repository;
