use crate::api::models::Activity;
use crate::core::session::SessionState;
use crate::storage::config::CredentialBackend;

/// Snapshot for `auth status`
#[derive(Debug, Clone, PartialEq)]
pub struct AuthStatus {
    pub state: SessionState,
    pub server_url: Option<String>,
    pub credential_backend: CredentialBackend,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        self.state.is_logged_in()
    }
}

/// One day of the routine as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: &'static str,
    pub heading: String,
    pub date_label: String,
    pub activities: Vec<Activity>,
}

impl DayPlan {
    pub fn completed_count(&self) -> usize {
        self.activities.iter().filter(|a| a.completed()).count()
    }
}
