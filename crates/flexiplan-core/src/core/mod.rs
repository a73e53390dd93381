pub mod auth;
pub mod services;
pub mod session;
pub mod week;
