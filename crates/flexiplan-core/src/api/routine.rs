use crate::api::client::FlexiplanClient;
use crate::api::models::{
    ActionResponse, ActivityKind, GeneratedRoutine, MarkCompletedRequest, MarkCompletedResponse,
    RemoveActivityRequest, RoutineAnalytics, RoutineData, UserRoutineResponse,
};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;

const USER_ROUTINE_ENDPOINT: &str = "/api/user-routine/";

impl FlexiplanClient {
    /// Generate the user's first routine from their tasks and hobbies
    pub async fn generate_routine(&self, user_id: i64) -> Result<RoutineData, ApiError> {
        let generated: GeneratedRoutine = self
            .request_json(RequestDescriptor::post(format!(
                "/api/generate-routine/{}/",
                user_id
            )))
            .await?;
        Ok(generated.routine)
    }

    /// Regenerate the routine from today onward
    pub async fn update_routine(&self, user_id: i64) -> Result<RoutineData, ApiError> {
        let generated: GeneratedRoutine = self
            .request_json(RequestDescriptor::put(format!(
                "/api/generate-routine/{}/",
                user_id
            )))
            .await?;
        Ok(generated.routine)
    }

    /// Current primary routine. A user without one gets a 404 error.
    pub async fn fetch_user_routine(&self) -> Result<UserRoutineResponse, ApiError> {
        self.request_json(RequestDescriptor::get(USER_ROUTINE_ENDPOINT))
            .await
    }

    pub async fn mark_activity_completed(
        &self,
        day: &str,
        activity_name: &str,
        activity_type: ActivityKind,
        is_completed: bool,
    ) -> Result<MarkCompletedResponse, ApiError> {
        let descriptor = RequestDescriptor::post("/api/routine/mark-completed/").with_json(
            &MarkCompletedRequest {
                day,
                activity_name,
                activity_type,
                is_completed,
            },
        )?;
        self.request_json(descriptor).await
    }

    pub async fn remove_activity_from_routine(
        &self,
        day: &str,
        activity_name: &str,
        activity_type: &str,
    ) -> Result<ActionResponse, ApiError> {
        let descriptor = RequestDescriptor::post("/api/routine/remove-activity/").with_json(
            &RemoveActivityRequest {
                day,
                activity_name,
                activity_type,
            },
        )?;
        self.request_json(descriptor).await
    }

    pub async fn fetch_routine_analytics(&self) -> Result<RoutineAnalytics, ApiError> {
        self.request_json(RequestDescriptor::get("/api/routine/analytics/"))
            .await
    }
}
