use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// Authentication

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Generic acknowledgement returned by mutation endpoints, e.g.
/// `{"message": "Hobby added successfully."}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Users

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

// Hobbies

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hobby {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct AddHobbyRequest {
    pub hobby_id: i64,
}

// Tasks

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `HH:MM:SS`
    #[serde(default)]
    pub time_required: Option<String>,
    #[serde(default)]
    pub days_associated: Vec<String>,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_fixed_time: bool,
    /// `HH:MM:SS`
    #[serde(default)]
    pub fixed_time_slot: Option<String>,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub routine: Option<i64>,
}

/// Body for task create and update. Unset optionals are sent as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskFormData {
    pub task_name: String,
    pub description: Option<String>,
    pub time_required: Option<String>,
    pub days_associated: Vec<String>,
    pub priority: String,
    pub is_fixed_time: bool,
    pub fixed_time_slot: Option<String>,
}

impl From<&Task> for TaskFormData {
    fn from(task: &Task) -> Self {
        Self {
            task_name: task.task_name.clone(),
            description: task.description.clone(),
            time_required: task.time_required.clone(),
            days_associated: task.days_associated.clone(),
            priority: task.priority.clone(),
            is_fixed_time: task.is_fixed_time,
            fixed_time_slot: task.fixed_time_slot.clone(),
        }
    }
}

// Routine

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub activity: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub day: Option<String>,
}

impl Activity {
    pub fn completed(&self) -> bool {
        self.is_completed.unwrap_or(false)
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Day name (`"Monday"`) to that day's activities
pub type RoutineData = BTreeMap<String, Vec<Activity>>;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeneratedRoutine {
    /// `routine` on create, `routine_data` on regenerate
    #[serde(alias = "routine_data")]
    pub routine: RoutineData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserRoutineResponse {
    #[serde(default)]
    pub routine_data: Option<RoutineData>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Value of `activity_type` in routine mutations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Task,
    Hobby,
}

impl ActivityKind {
    /// Completion kind for a routine entry's `type`. Work, personal and hobby
    /// blocks are tracked as hobbies; everything else is a task.
    pub fn for_routine_type(activity_type: &str) -> Self {
        match activity_type {
            "work" | "personal" | "hobby" => ActivityKind::Hobby,
            _ => ActivityKind::Task,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Task => "task",
            ActivityKind::Hobby => "hobby",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkCompletedRequest<'a> {
    pub day: &'a str,
    pub activity_name: &'a str,
    pub activity_type: ActivityKind,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkCompletedResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub is_completed: bool,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemoveActivityRequest<'a> {
    pub day: &'a str,
    pub activity_name: &'a str,
    /// Matched case-insensitively against the routine entry's own `type`
    pub activity_type: &'a str,
}

/// Aggregates computed by the backend. Sections are passed through as
/// returned since their inner layout is owned by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoutineAnalytics {
    #[serde(default)]
    pub completion_analytics: Value,
    #[serde(default)]
    pub time_analytics: Value,
    #[serde(default)]
    pub activity_frequency: Value,
    #[serde(default)]
    pub weekly_patterns: Value,
    #[serde(default)]
    pub time_balance: Value,
    #[serde(default)]
    pub consistency_score: Value,
    #[serde(default)]
    pub routine_period: Value,
}

impl RoutineAnalytics {
    /// Sections in display order with their wire names
    pub fn sections(&self) -> [(&'static str, &Value); 7] {
        [
            ("completion_analytics", &self.completion_analytics),
            ("time_analytics", &self.time_analytics),
            ("activity_frequency", &self.activity_frequency),
            ("weekly_patterns", &self.weekly_patterns),
            ("time_balance", &self.time_balance),
            ("consistency_score", &self.consistency_score),
            ("routine_period", &self.routine_period),
        ]
    }
}

// Friends

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRequest {
    pub id: i64,
    pub user: i64,
    pub friend: i64,
    pub sender_username: String,
    pub status: FriendshipStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FriendRequestAction {
    Accept,
    Reject,
}

#[derive(Debug, Serialize)]
pub struct RespondRequest {
    pub action: FriendRequestAction,
}

/// Entry of the friends list. The server's `username` is exposed as `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friend {
    pub id: i64,
    #[serde(rename = "username")]
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FriendRoutine {
    pub friend_id: i64,
    pub friend_username: String,
    #[serde(default)]
    pub friend_name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub routine_data: RoutineData,
}

// Messaging

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectMessage {
    pub id: i64,
    pub sender: User,
    pub receiver: User,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkReadResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub messages_updated: u64,
}

/// One turn of the assistant conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentMessage {
    #[serde(default)]
    pub id: Option<i64>,
    pub content: String,
    pub is_user: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AgentHistory {
    #[serde(default)]
    pub messages: Vec<AgentMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}
