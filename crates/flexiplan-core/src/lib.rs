//! # flexiplan-core
//!
//! Core library for the Flexiplan routine planner API.
//!
//! Every authenticated call goes through one chokepoint that first trades the
//! stored refresh token for a fresh access token, then sends the request with
//! `Authorization: Bearer <token>`. Failures come back as a single
//! [`error::ApiError`] whose display text is the message to show the user.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flexiplan_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> flexiplan_core::Result<()> {
//!     let store = Arc::new(MemoryCredentialStore::new());
//!     let client = FlexiplanClient::new("http://localhost:8000".to_string(), store)?;
//!
//!     client.login("alice", "secret").await?;
//!     let hobbies = client.fetch_hobbies().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture (4-Layer)
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, refresh, endpoint wrappers
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Session state, week navigation, services
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration, credential persistence
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Error normalization, retry, validation
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use flexiplan_core::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError};

    // API client and models
    pub use crate::api::client::FlexiplanClient;
    pub use crate::api::models::{
        Activity, ActivityKind, FriendRequestAction, Hobby, RoutineData, Task, TaskFormData, User,
    };
    pub use crate::api::request::{ApiResponse, RequestDescriptor};

    // Core
    pub use crate::core::session::SessionState;
    pub use crate::core::week::{Direction, WeekCursor};

    // Services
    pub use crate::core::services::auth_service::AuthService;
    pub use crate::core::services::config_service::ConfigService;
    pub use crate::core::services::routine_service::RoutineService;

    // Storage
    pub use crate::storage::config::{Config, CredentialBackend};
    pub use crate::storage::credentials::{
        CredentialBundle, CredentialStore, MemoryCredentialStore, open_store,
    };

    // Display utilities
    pub use crate::display::TableDisplay;
}

/// Business logic layer.
///
/// - [`core::session`]: logged-in / logged-out state
/// - [`core::week`]: day navigation within the current week
/// - [`core::services`]: auth, config and routine services
pub mod core;

/// Storage layer - configuration and credential persistence.
pub mod storage;

/// Utilities layer - shared helpers and common functionality.
pub mod utils;

/// API layer - HTTP client, token refresh and endpoint wrappers.
pub mod api;

/// Display layer - tables and progress output for the terminal.
pub mod display;

/// Error handling - hierarchical error system with severity and hints.
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

#[doc(hidden)]
pub use api::client::FlexiplanClient;
#[doc(hidden)]
pub use storage::config::Config;
