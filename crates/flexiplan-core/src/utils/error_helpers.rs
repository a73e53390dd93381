use crate::error::{ApiError, AppError};
use serde_json::Value;

/// Helper functions for turning raw failures into [`ApiError`] values.
/// All message extraction for failed responses lives here so call sites do
/// not repeat their own fallback chains.
/// Convert reqwest errors to ApiError with endpoint context
pub fn convert_request_error(error: reqwest::Error, endpoint: &str) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: format!("Request to {} timed out", endpoint),
        }
    } else if error.is_builder() {
        ApiError::InvalidRequest {
            endpoint: endpoint.to_string(),
            message: format!("Failed to build request: {}", error),
        }
    } else {
        ApiError::Transport {
            endpoint: endpoint.to_string(),
            message: format!("Network request failed: {}", error),
        }
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str, status: u16) -> ApiError {
    ApiError::MalformedResponse {
        endpoint: endpoint.to_string(),
        status,
        message: format!("Unexpected response from server: {}", error),
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Looks at `error`, then `detail`, then falls back to the first field error
/// of a validation payload such as `{"username": ["already taken"]}`.
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Object(map) => {
            for key in ["error", "detail"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
                    Some(Value::Null) | None => {}
                    Some(other) => return Some(other.to_string()),
                }
            }

            // Serializer field errors always come as lists
            map.iter().find_map(|(field, v)| {
                let first = v.as_array()?.iter().find_map(Value::as_str)?;
                Some(format!("{}: {}", field, first))
            })
        }
        _ => None,
    }
}

/// Build the error for a non-success HTTP response.
///
/// `fallback` replaces the generic `HTTP error <status>` text when the body
/// carries no recognizable message.
pub fn normalize_http_failure(
    endpoint: &str,
    status: u16,
    body: &[u8],
    fallback: Option<&str>,
) -> ApiError {
    let message = extract_error_message(body).unwrap_or_else(|| match fallback {
        Some(text) => text.to_string(),
        None => format!("HTTP error {}", status),
    });
    let endpoint = endpoint.to_string();

    match status {
        401 | 403 => ApiError::Authentication {
            endpoint,
            status: Some(status),
            message,
        },
        500..=599 => ApiError::Server {
            endpoint,
            status,
            message,
        },
        _ => ApiError::Validation {
            endpoint,
            status,
            message,
        },
    }
}

/// Message to show a user for any failure, with a fallback for the rare case
/// where the error renders as an empty string.
pub fn display_message(error: &AppError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
