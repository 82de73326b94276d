//! Backend del marketplace de alquiler de bicicletas y scooters
//!
//! Dos lados: el flujo de reserva del cliente (login por OTP, búsqueda
//! de disponibilidad, reservas y pagos) y el back-office admin
//! (tiendas, vehículos, usuarios y reservas).

pub mod config;
pub mod state;
pub mod database;
pub mod services;
pub mod utils;
pub mod models;
pub mod cache;
pub mod middleware;
pub mod controllers;
pub mod repositories;
pub mod routes;
pub mod dto;
