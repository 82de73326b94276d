//! Servicios de negocio
//!
//! Este módulo contiene la lógica de negocio que no pertenece ni a los
//! repositorios ni a los controllers.

pub mod availability_service;
pub mod otp_service;
