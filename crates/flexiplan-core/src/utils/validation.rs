//! Input validation and sanitization utilities
//!
//! Checks run on the client before a request is sent, so obviously bad input
//! never costs a network round trip.

use crate::error::CliError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> crate::Result<()> {
    if email.is_empty() {
        return Err(CliError::InvalidArguments("Email cannot be empty".to_string()).into());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(CliError::InvalidArguments(format!(
            "Invalid email '{}': Email must have username and domain parts",
            email
        ))
        .into());
    }

    if !parts[1].contains('.') {
        return Err(CliError::InvalidArguments(format!(
            "Invalid email '{}': Domain must contain dot",
            email
        ))
        .into());
    }

    Ok(())
}

/// Validate that a required text field is present
pub fn validate_required(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(CliError::InvalidArguments(format!("{} cannot be empty", field)).into());
    }
    Ok(())
}

/// Validate a `HH:MM` or `HH:MM:SS` time of day
pub fn validate_time_of_day(field: &str, value: &str) -> crate::Result<()> {
    let parsed = chrono::NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(value, "%H:%M"));

    if parsed.is_err() {
        return Err(CliError::InvalidArguments(format!(
            "Invalid {} '{}': expected HH:MM or HH:MM:SS",
            field, value
        ))
        .into());
    }
    Ok(())
}
