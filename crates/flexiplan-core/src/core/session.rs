use crate::error::{CliError, StorageError};
use crate::storage::credentials::{CredentialBundle, CredentialStore, clear_bundle};
use crate::utils::retry::{RetryConfig, RetryExecutor};
use std::sync::Arc;

/// Whether a complete credential bundle is currently stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { user_id: i64, username: String },
}

impl SessionState {
    pub fn from_store(store: &dyn CredentialStore) -> Result<Self, StorageError> {
        Ok(match CredentialBundle::load(store)? {
            Some(bundle) => SessionState::LoggedIn {
                user_id: bundle.user_id,
                username: bundle.username,
            },
            None => SessionState::LoggedOut,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn { .. })
    }

    pub fn user_id(&self) -> Option<i64> {
        match self {
            SessionState::LoggedIn { user_id, .. } => Some(*user_id),
            SessionState::LoggedOut => None,
        }
    }

    /// User id of the stored session, or an error telling the user to log in
    pub fn require_user_id(&self) -> Result<i64, CliError> {
        self.user_id().ok_or_else(|| CliError::AuthRequired {
            message: "Not logged in".to_string(),
            hint: "Run 'flexiplan auth login' first".to_string(),
        })
    }
}

/// Clear every stored entry, retrying the whole clear while any deletion
/// fails. Succeeds only once all entries are gone.
pub async fn end_session(
    store: Arc<dyn CredentialStore>,
    retry: RetryConfig,
) -> Result<(), StorageError> {
    RetryExecutor::new(retry)
        .execute(|| {
            let store = Arc::clone(&store);
            async move { clear_bundle(store.as_ref()) }
        })
        .await?;

    log::info!("Logged out");
    Ok(())
}
