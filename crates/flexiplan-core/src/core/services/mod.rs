pub mod auth_service;
pub mod config_service;
pub mod routine_service;
pub mod types;
