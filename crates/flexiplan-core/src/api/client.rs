use crate::api::models::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SignupRequest, SignupResponse,
};
use crate::api::request::{ApiResponse, RequestDescriptor};
use crate::core::session::{SessionState, end_session};
use crate::error::ApiError;
use crate::storage::credentials::{
    CredentialBundle, CredentialKey, CredentialStore, clear_bundle,
};
use crate::utils::error_helpers::*;
use crate::utils::retry::RetryConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

pub const LOGIN_ENDPOINT: &str = "/api/login/";
pub const SIGNUP_ENDPOINT: &str = "/api/signup/";
pub const REFRESH_ENDPOINT: &str = "/api/refresh-token/";

const USER_AGENT: &str = concat!("flexiplan/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Flexiplan backend.
///
/// Every authenticated call goes through [`FlexiplanClient::authenticated_request`],
/// which exchanges the stored refresh token for a fresh access token first.
/// Calls are independent: concurrent requests each perform their own refresh.
#[derive(Clone)]
pub struct FlexiplanClient {
    client: Client,
    pub base_url: String,
    store: Arc<dyn CredentialStore>,
    logout_retry: RetryConfig,
}

impl std::fmt::Debug for FlexiplanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexiplanClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FlexiplanClient {
    pub fn new(base_url: String, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, store, None)
    }

    /// `timeout` of `None` leaves requests unbounded
    pub fn with_timeout(
        base_url: String,
        store: Arc<dyn CredentialStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| convert_request_error(e, "client_init"))?;

        Ok(FlexiplanClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            logout_retry: RetryConfig::quick(),
        })
    }

    pub fn with_logout_retry(mut self, config: RetryConfig) -> Self {
        self.logout_retry = config;
        self
    }

    pub(crate) fn store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    pub fn session_state(&self) -> Result<SessionState, ApiError> {
        Ok(SessionState::from_store(self.store.as_ref())?)
    }

    /// Bare request against the base URL, without credentials
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Headers for an authenticated call: JSON content type unless disabled,
    /// the bearer token, then the caller's extra headers which win on conflict
    pub fn build_headers(
        access_token: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<HeaderMap, ApiError> {
        let invalid = |message: String| ApiError::InvalidRequest {
            endpoint: descriptor.path.clone(),
            message,
        };

        let mut headers = HeaderMap::new();
        if descriptor.json_content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|_| invalid("Access token contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        for (name, value) in &descriptor.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| invalid(format!("Invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| invalid(format!("Invalid value for header '{}'", name)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Send a request and read the whole body. Non-success statuses become
    /// errors carrying the server's message, or `fallback` when it has none.
    async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
        fallback: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        if !status.is_success() {
            log::debug!("{} failed with status {}", endpoint, status);
            return Err(normalize_http_failure(
                endpoint,
                status.as_u16(),
                &body,
                fallback,
            ));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            body: body.to_vec(),
        })
    }

    /// Exchange the stored refresh token for a new access token and persist it.
    ///
    /// When the server rejects the refresh token (400, 401 or 403) the stored
    /// session is cleared. Server errors and network failures leave it intact.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .store
            .get(CredentialKey::RefreshToken)?
            .ok_or_else(|| ApiError::Authentication {
                endpoint: REFRESH_ENDPOINT.to_string(),
                status: None,
                message: "No refresh token found".to_string(),
            })?;

        log::debug!("Refreshing access token");
        let request = self
            .build_request(Method::POST, REFRESH_ENDPOINT)
            .json(&RefreshRequest {
                refresh: &refresh_token,
            });

        let response = match self
            .execute(request, REFRESH_ENDPOINT, Some("Failed to refresh token"))
            .await
        {
            Ok(response) => response,
            Err(error) => {
                if matches!(error.status(), Some(400 | 401 | 403)) {
                    log::warn!("Refresh token rejected, clearing stored session");
                    if let Err(e) = clear_bundle(self.store.as_ref()) {
                        log::warn!("Failed to clear rejected session: {}", e);
                    }
                }
                return Err(error);
            }
        };

        let refreshed: RefreshResponse = response.json()?;
        self.store
            .set(CredentialKey::AccessToken, &refreshed.access)?;

        Ok(refreshed.access)
    }

    /// Perform one authenticated call. Always refreshes first.
    pub async fn authenticated_request(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<ApiResponse, ApiError> {
        let access_token = self.refresh_access_token().await?;
        let headers = Self::build_headers(&access_token, &descriptor)?;

        log::debug!("{} {}", descriptor.method, descriptor.path);
        let mut request = self
            .build_request(descriptor.method.clone(), &descriptor.path)
            .headers(headers);

        if let Some(body) = &descriptor.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::InvalidRequest {
                endpoint: descriptor.path.clone(),
                message: format!("Failed to encode request body: {}", e),
            })?;
            request = request.body(bytes);
        }

        self.execute(request, &descriptor.path, None).await
    }

    /// Authenticated call decoded into `T`
    pub(crate) async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        self.authenticated_request(descriptor).await?.json()
    }

    /// Authenticated multipart upload. No JSON content type is set so the
    /// multipart boundary header from `form` is the only one sent.
    pub async fn upload_binary_resource(
        &self,
        method: Method,
        path: &str,
        form: Form,
        fallback: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let access_token = self.refresh_access_token().await?;
        let descriptor = RequestDescriptor::new(method, path).without_content_type();
        let headers = Self::build_headers(&access_token, &descriptor)?;

        log::debug!("{} {} (multipart)", descriptor.method, path);
        let request = self
            .build_request(descriptor.method, path)
            .headers(headers)
            .multipart(form);

        self.execute(request, path, fallback).await
    }

    /// Unauthenticated JSON call used by login, signup and public lookups
    pub(crate) async fn public_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        fallback: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = self.build_request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, path, fallback).await
    }

    /// Log in and persist the returned session. On failure the stored
    /// session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password }).map_err(|e| {
            ApiError::InvalidRequest {
                endpoint: LOGIN_ENDPOINT.to_string(),
                message: format!("Failed to encode request body: {}", e),
            }
        })?;

        let response = self
            .public_request(
                Method::POST,
                LOGIN_ENDPOINT,
                Some(&body),
                Some("Invalid credentials!"),
            )
            .await?;
        let login: LoginResponse = response.json()?;

        CredentialBundle {
            access_token: login.access.clone(),
            refresh_token: login.refresh.clone(),
            user_id: login.user.id,
            username: login.user.username.clone(),
        }
        .save(self.store.as_ref())?;

        log::info!("Logged in as {}", login.user.username);
        Ok(login)
    }

    /// Create an account. Does not log in.
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::InvalidRequest {
            endpoint: SIGNUP_ENDPOINT.to_string(),
            message: format!("Failed to encode request body: {}", e),
        })?;

        self.public_request(Method::POST, SIGNUP_ENDPOINT, Some(&body), Some("Signup failed"))
            .await?
            .json()
    }

    /// Remove every stored session entry. Local only, no request is sent.
    pub async fn logout(&self) -> Result<(), ApiError> {
        Ok(end_session(Arc::clone(&self.store), self.logout_retry.clone()).await?)
    }
}
