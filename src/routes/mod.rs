pub mod auth_routes;
pub mod store_routes;
pub mod vehicle_routes;
pub mod order_routes;
pub mod search_routes;
pub mod user_routes;
