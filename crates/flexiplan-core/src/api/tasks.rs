use crate::api::client::FlexiplanClient;
use crate::api::models::{Task, TaskFormData};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;

impl FlexiplanClient {
    pub async fn fetch_user_tasks(&self, user_id: i64) -> Result<Vec<Task>, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/api/users/{}/tasks/", user_id)))
            .await
    }

    /// Create a task and return it as stored by the server
    pub async fn add_user_task(&self, user_id: i64, task: &TaskFormData) -> Result<Task, ApiError> {
        let descriptor =
            RequestDescriptor::post(format!("/api/users/{}/tasks/", user_id)).with_json(task)?;
        self.request_json(descriptor).await
    }

    /// Replace every field of an existing task
    pub async fn update_user_task(
        &self,
        user_id: i64,
        task_id: i64,
        task: &TaskFormData,
    ) -> Result<Task, ApiError> {
        let descriptor =
            RequestDescriptor::put(format!("/api/users/{}/update-task/{}/", user_id, task_id))
                .with_json(task)?;
        self.request_json(descriptor).await
    }

    pub async fn delete_user_task(&self, user_id: i64, task_id: i64) -> Result<(), ApiError> {
        self.authenticated_request(RequestDescriptor::delete(format!(
            "/api/users/{}/tasks/{}/",
            user_id, task_id
        )))
        .await?;
        Ok(())
    }
}
