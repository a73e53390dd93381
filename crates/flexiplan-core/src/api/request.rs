use crate::error::ApiError;
use crate::utils::error_helpers::convert_json_error;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Description of one authenticated call, resolved against the client's base URL
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Path starting with `/`, e.g. `/api/users/7/hobbies/`
    pub path: String,
    pub method: Method,
    pub body: Option<Value>,
    /// Applied after the defaults, so a caller may override `Content-Type`
    pub extra_headers: Vec<(String, String)>,
    /// Send `Content-Type: application/json`. Off for multipart uploads.
    pub json_content_type: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            extra_headers: Vec::new(),
            json_content_type: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest {
            endpoint: self.path.clone(),
            message: format!("Failed to encode request body: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn without_content_type(mut self) -> Self {
        self.json_content_type = false;
        self
    }
}

/// Successful response with its body fully read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub endpoint: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body. An empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(bytes).map_err(|e| convert_json_error(e, &self.endpoint, self.status))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
