use super::types::AuthStatus;
use crate::AppError;
use crate::api::client::FlexiplanClient;
use crate::api::models::LoginResponse;
use crate::core::auth::{LoginInput, SignupInput};
use crate::core::session::{SessionState, end_session};
use crate::error::CliError;
use crate::storage::config::CredentialBackend;
use crate::storage::credentials::CredentialStore;
use crate::utils::retry::RetryConfig;
use std::sync::Arc;

/// Authentication service for managing the stored session.
///
/// Logout and status only touch the credential store, so a service built
/// with [`AuthService::local`] works before any server URL is configured.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    client: Option<FlexiplanClient>,
}

impl AuthService {
    pub fn new(client: FlexiplanClient) -> Self {
        Self {
            store: client.store(),
            client: Some(client),
        }
    }

    /// Session-only service with no server behind it
    pub fn local(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            client: None,
        }
    }

    fn client(&self) -> Result<&FlexiplanClient, AppError> {
        self.client.as_ref().ok_or_else(|| {
            CliError::InvalidArguments("This command needs a server URL".to_string()).into()
        })
    }

    /// Validate the input, log in and persist the session
    pub async fn authenticate(&self, input: LoginInput) -> Result<LoginResponse, AppError> {
        input.validate()?;
        Ok(self
            .client()?
            .login(&input.username, &input.password)
            .await?)
    }

    /// Create an account and return the server's confirmation
    pub async fn register(&self, input: SignupInput) -> Result<String, AppError> {
        input.validate()?;
        let response = self.client()?.signup(&input.into_request()).await?;
        Ok(response
            .message
            .unwrap_or_else(|| "User created successfully!".to_string()))
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        match &self.client {
            Some(client) => Ok(client.logout().await?),
            None => Ok(end_session(Arc::clone(&self.store), RetryConfig::quick()).await?),
        }
    }

    pub fn status(&self, credential_backend: CredentialBackend) -> Result<AuthStatus, AppError> {
        Ok(AuthStatus {
            state: SessionState::from_store(self.store.as_ref())?,
            server_url: self.client.as_ref().map(|c| c.base_url.clone()),
            credential_backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::credentials::{CredentialBundle, MemoryCredentialStore};

    #[test]
    fn test_status_reflects_store() {
        let bundle = CredentialBundle {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            user_id: 3,
            username: "carol".to_string(),
        };
        let store = Arc::new(MemoryCredentialStore::with_bundle(&bundle).unwrap());
        let client = FlexiplanClient::new("http://example.test".to_string(), store).unwrap();
        let service = AuthService::new(client);

        let status = service.status(CredentialBackend::File).unwrap();
        assert!(status.is_authenticated());
        assert_eq!(
            status.state,
            SessionState::LoggedIn {
                user_id: 3,
                username: "carol".to_string()
            }
        );
        assert_eq!(status.server_url.as_deref(), Some("http://example.test"));
    }

    #[tokio::test]
    async fn test_empty_credentials_are_rejected_before_network() {
        let client = FlexiplanClient::new(
            "http://127.0.0.1:9".to_string(),
            Arc::new(MemoryCredentialStore::new()),
        )
        .unwrap();
        let service = AuthService::new(client);

        let result = service
            .authenticate(LoginInput {
                username: String::new(),
                password: "secret".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let bundle = CredentialBundle {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            user_id: 3,
            username: "carol".to_string(),
        };
        let store = Arc::new(MemoryCredentialStore::with_bundle(&bundle).unwrap());
        let client =
            FlexiplanClient::new("http://example.test".to_string(), store.clone()).unwrap();

        AuthService::new(client).logout().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_local_service_logs_out_without_server() {
        let bundle = CredentialBundle {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            user_id: 3,
            username: "carol".to_string(),
        };
        let store = Arc::new(MemoryCredentialStore::with_bundle(&bundle).unwrap());
        let service = AuthService::local(store.clone());

        let status = service.status(CredentialBackend::File).unwrap();
        assert!(status.is_authenticated());
        assert_eq!(status.server_url, None);

        service.logout().await.unwrap();
        assert!(store.is_empty());
        assert!(!service.status(CredentialBackend::File).unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_local_service_cannot_log_in() {
        let service = AuthService::local(Arc::new(MemoryCredentialStore::new()));
        let result = service
            .authenticate(LoginInput {
                username: "carol".to_string(),
                password: "secret".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(CliError::InvalidArguments(_)))));
    }
}
