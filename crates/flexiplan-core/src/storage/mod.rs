//! Storage layer
//!
//! TOML configuration and the persisted session credentials.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
