use crate::api::client::FlexiplanClient;
use crate::api::models::{UploadResponse, User};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;
use crate::utils::error_helpers::convert_request_error;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};
use std::path::Path;

pub const UPLOAD_PFP_ENDPOINT: &str = "/api/upload-pfp/";
const PROFILE_PICTURE_FIELD: &str = "profile_picture";

/// `/api/users/<username>/` with the username percent-encoded as one segment
pub fn public_user_path(username: &str) -> Result<String, ApiError> {
    let invalid = || ApiError::InvalidRequest {
        endpoint: "/api/users/".to_string(),
        message: format!("Invalid username: {:?}", username),
    };
    if username.is_empty() || username == "." || username == ".." {
        return Err(invalid());
    }

    let mut url = Url::parse("http://localhost/api/users/").map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend([username, ""]);
    Ok(url.path().to_string())
}

/// MIME type for an upload, from the file extension. `None` when the name has
/// no extension at all.
pub fn mime_for_upload(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => {
            log::warn!("Unknown file type for {}", path.display());
            "application/octet-stream"
        }
    })
}

impl FlexiplanClient {
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.request_json(RequestDescriptor::get("/api/users/"))
            .await
    }

    /// Profile of the logged-in user
    pub async fn fetch_user_details(&self) -> Result<User, ApiError> {
        self.request_json(RequestDescriptor::get("/api/users/details/"))
            .await
    }

    /// Public profile lookup. Sent without credentials.
    pub async fn fetch_public_user_details(&self, username: &str) -> Result<User, ApiError> {
        let path = public_user_path(username)?;
        self.public_request(Method::GET, &path, None, None)
            .await?
            .json()
    }

    /// Replace the profile picture with the file at `path`
    pub async fn upload_profile_picture(&self, path: &Path) -> Result<UploadResponse, ApiError> {
        let invalid = |message: String| ApiError::InvalidRequest {
            endpoint: UPLOAD_PFP_ENDPOINT.to_string(),
            message,
        };

        let mime = mime_for_upload(path)
            .ok_or_else(|| invalid("Could not determine file type for upload.".to_string()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| invalid("Could not determine file type for upload.".to_string()))?;

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| invalid(format!("Failed to read {}: {}", path.display(), e)))?;

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| convert_request_error(e, UPLOAD_PFP_ENDPOINT))?;
        let form = Form::new().part(PROFILE_PICTURE_FIELD, part);

        self.upload_binary_resource(
            Method::PUT,
            UPLOAD_PFP_ENDPOINT,
            form,
            Some("Failed to upload profile picture"),
        )
        .await?
        .json()
    }
}
