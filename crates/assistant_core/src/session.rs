//! crates/assistant_core/src/session.rs
//!
//! Owns the identity of the one active assistant session and mediates its
//! creation and termination.
//!
//! `NoSession -> Active` on a successful create, `Active -> NoSession` on a
//! successful end. Failures leave the state where it was.
//!
//! Creates and ends run one at a time, gateway call included, so an
//! overlapping call always sees the state the previous one left behind.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    conversation::ConversationController,
    domain::{Session, SessionRequest},
    error::{ControllerError, ControllerResult},
    ports::AssistantGateway,
};

pub struct SessionController {
    gateway: Arc<dyn AssistantGateway>,
    conversation: Arc<ConversationController>,
    active: Mutex<Option<Session>>,
    /// Held for the whole of a create or end.
    transition: Mutex<()>,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn AssistantGateway>, conversation: Arc<ConversationController>) -> Self {
        Self {
            gateway,
            conversation,
            active: Mutex::new(None),
            transition: Mutex::new(()),
        }
    }

    /// Opens a session and starts its conversation with the greeting.
    pub async fn create_session(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> ControllerResult<Session> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(ControllerError::ValidationFailed(
                "Name and email are required".to_string(),
            ));
        }

        let _transition = self.transition.lock().await;
        if self.active.lock().await.is_some() {
            return Err(ControllerError::SessionAlreadyActive);
        }

        let request = SessionRequest {
            user_name: name.to_string(),
            user_email: email.to_string(),
            user_phone: phone
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
        };

        let grant = self.gateway.create_session(&request).await.map_err(|e| {
            error!(user_email = %request.user_email, error = %e, "Failed to create session.");
            ControllerError::SessionCreationFailed(e.to_string())
        })?;

        let session = Session::new(
            grant.session_id,
            grant.status,
            request.user_name,
            request.user_email,
            request.user_phone,
        );

        *self.active.lock().await = Some(session.clone());
        self.conversation.initialize(&session).await;

        info!(
            session_id = %session.session_id(),
            status = %session.status(),
            "Session created."
        );
        Ok(session)
    }

    /// Terminates the active session and discards its conversation.
    ///
    /// On failure the session stays active so the operator can retry.
    pub async fn end_session(&self, session_id: &str) -> ControllerResult<()> {
        let _transition = self.transition.lock().await;
        match self.active.lock().await.as_ref() {
            None => return Err(ControllerError::NoActiveSession),
            Some(session) if session.session_id() != session_id => {
                return Err(ControllerError::SessionMismatch {
                    requested: session_id.to_string(),
                })
            }
            Some(_) => {}
        }

        self.gateway.end_session(session_id).await.map_err(|e| {
            error!(%session_id, error = %e, "Failed to end session.");
            ControllerError::SessionTerminationFailed(e.to_string())
        })?;

        *self.active.lock().await = None;
        self.conversation.reset().await;

        info!(%session_id, "Session ended; summary requested.");
        Ok(())
    }

    /// A copy of the active session, if there is one.
    pub async fn current(&self) -> Option<Session> {
        self.active.lock().await.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    pub fn conversation(&self) -> &Arc<ConversationController> {
        &self.conversation
    }
}
