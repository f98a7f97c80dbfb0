//! services/console/src/adapters/assistant_http.rs
//!
//! This module contains the adapter for the remote assistant service.
//! It implements the `AssistantGateway` port from the `assistant_core` crate.

use async_trait::async_trait;
use assistant_core::{
    domain::{AssistantReply, SessionGrant, SessionRequest, SessionStatus},
    ports::{AssistantGateway, GatewayError, GatewayResult},
};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{read_json, read_success_body, transport_error};

//=========================================================================================
// Wire Records
//=========================================================================================

#[derive(Debug, Serialize)]
struct CreateSessionBody<'a> {
    user_name: &'a str,
    user_email: &'a str,
    user_phone: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session_id: String,
    status: String,
}

#[derive(Debug, Serialize)]
struct ChatMessageBody<'a> {
    session_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    response: String,
    #[serde(default)]
    tool_calls: Option<Vec<String>>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AssistantGateway` over the service's REST API.
#[derive(Clone)]
pub struct HttpAssistantGateway {
    client: Client,
    base_url: String,
}

impl HttpAssistantGateway {
    /// Creates a new `HttpAssistantGateway` rooted at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/api/v1/session/{id}/{action}`, with the opaque id escaped as
    /// a single path segment.
    fn session_url(&self, session_id: &str, action: &str) -> GatewayResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::Transport(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::Transport(format!("invalid base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v1", "session", session_id, action]);
        Ok(url)
    }
}

//=========================================================================================
// `AssistantGateway` Trait Implementation
//=========================================================================================

#[async_trait]
impl AssistantGateway for HttpAssistantGateway {
    async fn create_session(&self, request: &SessionRequest) -> GatewayResult<SessionGrant> {
        let url = format!("{}/api/v1/session/create", self.base_url);
        let body = CreateSessionBody {
            user_name: &request.user_name,
            user_email: &request.user_email,
            user_phone: request.user_phone.as_deref().filter(|phone| !phone.is_empty()),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let created: CreateSessionResponse = read_json(response).await?;

        let status = SessionStatus::parse(&created.status).ok_or_else(|| {
            GatewayError::InvalidResponse(format!("unknown session status '{}'", created.status))
        })?;
        if created.session_id.is_empty() {
            return Err(GatewayError::InvalidResponse(
                "session_id was empty".to_string(),
            ));
        }

        info!(session_id = %created.session_id, %status, "Assistant session opened.");
        Ok(SessionGrant {
            session_id: created.session_id,
            status,
        })
    }

    async fn send_message(&self, session_id: &str, message: &str) -> GatewayResult<AssistantReply> {
        let url = format!("{}/api/v1/chat/message", self.base_url);
        let body = ChatMessageBody {
            session_id,
            message,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let reply: ChatMessageResponse = read_json(response).await?;

        let tool_calls = reply.tool_calls.unwrap_or_default();
        debug!(%session_id, tools = tool_calls.len(), "Assistant replied.");
        Ok(AssistantReply {
            response: reply.response,
            tool_calls,
        })
    }

    async fn end_session(&self, session_id: &str) -> GatewayResult<()> {
        let url = self.session_url(session_id, "end")?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(transport_error)?;
        // The acknowledgement body carries nothing the console needs.
        read_success_body(response).await?;

        info!(%session_id, "Assistant session closed.");
        Ok(())
    }
}
