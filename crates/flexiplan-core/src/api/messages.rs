use crate::api::client::FlexiplanClient;
use crate::api::models::{
    AgentHistory, AgentMessage, ChatResponse, DirectMessage, MarkReadResponse, SendMessageRequest,
};
use crate::api::request::RequestDescriptor;
use crate::error::ApiError;

const AGENT_CHAT_ENDPOINT: &str = "/api/agent/chat/";

impl FlexiplanClient {
    /// Conversation with one friend, oldest first
    pub async fn fetch_messages(&self, friend_id: i64) -> Result<Vec<DirectMessage>, ApiError> {
        self.request_json(RequestDescriptor::get(format!("/api/messages/{}/", friend_id)))
            .await
    }

    pub async fn send_message(
        &self,
        friend_id: i64,
        message: &str,
    ) -> Result<DirectMessage, ApiError> {
        let descriptor = RequestDescriptor::post(format!("/api/messages/{}/send/", friend_id))
            .with_json(&SendMessageRequest { message })?;
        self.request_json(descriptor).await
    }

    pub async fn mark_messages_as_read(
        &self,
        friend_id: i64,
    ) -> Result<MarkReadResponse, ApiError> {
        self.request_json(RequestDescriptor::post(format!(
            "/api/messages/{}/mark-read/",
            friend_id
        )))
        .await
    }

    pub async fn fetch_agent_messages(&self) -> Result<Vec<AgentMessage>, ApiError> {
        let history: AgentHistory = self
            .request_json(RequestDescriptor::get(AGENT_CHAT_ENDPOINT))
            .await?;
        Ok(history.messages)
    }

    /// Send a message to the planning assistant and return its reply
    pub async fn send_agent_message(&self, message: &str) -> Result<String, ApiError> {
        let descriptor = RequestDescriptor::post(AGENT_CHAT_ENDPOINT)
            .with_json(&SendMessageRequest { message })?;
        let reply: ChatResponse = self.request_json(descriptor).await?;
        Ok(reply.response)
    }
}
