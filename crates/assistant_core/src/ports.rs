//! crates/assistant_core/src/ports.rs
//!
//! Defines the gateway contracts (traits) the controllers depend on.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! controllers independent of the HTTP transport used to reach the services.

use async_trait::async_trait;

use crate::domain::{AssistantReply, ClassifierResponse, EmailInput, SessionGrant, SessionRequest};

//=========================================================================================
// Generic Gateway Error and Result Types
//=========================================================================================

/// A generic error type for all gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The service could not be reached or the exchange did not complete.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("Gateway rejected the request ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    /// The service answered successfully but the body broke the contract.
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// The server-supplied detail message, if the gateway sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// A convenience type alias for `Result<T, GatewayError>`.
pub type GatewayResult<T> = Result<T, GatewayError>;

//=========================================================================================
// Gateway Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Opens a session for the given person.
    async fn create_session(&self, request: &SessionRequest) -> GatewayResult<SessionGrant>;

    /// Sends one operator message within a session.
    async fn send_message(&self, session_id: &str, message: &str) -> GatewayResult<AssistantReply>;

    /// Terminates a session and asks the service to summarize it.
    async fn end_session(&self, session_id: &str) -> GatewayResult<()>;
}

#[async_trait]
pub trait ClassifierGateway: Send + Sync {
    /// Classifies an email and generates a reply for it.
    async fn classify_email(&self, email: &EmailInput) -> GatewayResult<ClassifierResponse>;
}
