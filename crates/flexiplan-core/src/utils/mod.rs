//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Failure normalization for HTTP responses and transport errors
pub mod error_helpers;

/// Verbose console output
pub mod logging;

/// Exponential backoff for local operations
pub mod retry;

/// Unicode-aware text truncation
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
