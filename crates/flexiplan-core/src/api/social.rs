use crate::api::client::FlexiplanClient;
use crate::api::models::{
    ActionResponse, Friend, FriendRequest, FriendRequestAction, FriendRoutine, RespondRequest,
};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;

impl FlexiplanClient {
    /// Send a friend request and return the pending friendship
    pub async fn send_friend_request(&self, to_user_id: i64) -> Result<FriendRequest, ApiError> {
        self.request_json(RequestDescriptor::post(format!(
            "/api/friends/send/{}/",
            to_user_id
        )))
        .await
    }

    pub async fn respond_to_friend_request(
        &self,
        request_id: i64,
        action: FriendRequestAction,
    ) -> Result<ActionResponse, ApiError> {
        let descriptor = RequestDescriptor::post(format!("/api/friends/respond/{}/", request_id))
            .with_json(&RespondRequest { action })?;
        self.request_json(descriptor).await
    }

    pub async fn remove_friend(&self, friend_id: i64) -> Result<ActionResponse, ApiError> {
        self.request_json(RequestDescriptor::delete(format!(
            "/api/friends/remove/{}/",
            friend_id
        )))
        .await
    }

    pub async fn fetch_friends(&self) -> Result<Vec<Friend>, ApiError> {
        self.request_json(RequestDescriptor::get("/api/friends/list/"))
            .await
    }

    /// Every friendship involving the current user, in any state
    pub async fn fetch_friendship_details(&self) -> Result<Vec<FriendRequest>, ApiError> {
        self.request_json(RequestDescriptor::get("/api/friends/details/"))
            .await
    }

    /// Pending requests addressed to the current user
    pub async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, ApiError> {
        self.request_json(RequestDescriptor::get("/api/friends/requests/"))
            .await
    }

    pub async fn fetch_friend_routine(&self, friend_id: i64) -> Result<FriendRoutine, ApiError> {
        self.request_json(RequestDescriptor::get(format!(
            "/api/friends/{}/routine/",
            friend_id
        )))
        .await
    }
}
