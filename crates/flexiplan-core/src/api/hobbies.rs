use crate::api::client::FlexiplanClient;
use crate::api::models::{ActionResponse, AddHobbyRequest, Hobby};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;

impl FlexiplanClient {
    /// Catalogue of every hobby the backend knows
    pub async fn fetch_hobbies(&self) -> Result<Vec<Hobby>, ApiError> {
        self.request_json(RequestDescriptor::get("/api/hobbies/"))
            .await
    }

    pub async fn fetch_user_hobbies(&self, user_id: i64) -> Result<Vec<Hobby>, ApiError> {
        self.request_json(RequestDescriptor::get(format!(
            "/api/user/{}/hobbies/",
            user_id
        )))
        .await
    }

    pub async fn add_user_hobby(
        &self,
        user_id: i64,
        hobby_id: i64,
    ) -> Result<ActionResponse, ApiError> {
        let descriptor = RequestDescriptor::post(format!("/api/user/{}/hobbies/", user_id))
            .with_json(&AddHobbyRequest { hobby_id })?;
        self.request_json(descriptor).await
    }

    pub async fn delete_user_hobby(&self, user_id: i64, hobby_id: i64) -> Result<(), ApiError> {
        self.authenticated_request(RequestDescriptor::delete(format!(
            "/api/user/{}/hobbies/delete/{}/",
            user_id, hobby_id
        )))
        .await?;
        Ok(())
    }
}
