//! crates/assistant_core/src/conversation.rs
//!
//! Owns the ordered message history of the active session and serializes
//! the operator/assistant exchanges made within it.
//!
//! A send is a two-phase append: the operator message goes in first, then
//! either the assistant reply or an error notice. Nothing is ever rolled
//! back, so the history stays append-only across failures. At most one
//! `PendingExchange` exists at a time and its presence alone gates new sends.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    domain::{Message, PendingExchange, Session, SessionStatus},
    error::ControllerError,
    ports::AssistantGateway,
};

/// Content of the assistant entry appended when an exchange fails.
pub const ERROR_NOTICE: &str = "❌ Error: Could not get response. Please try again.";

/// The synthetic first message of every conversation.
pub fn greeting_for(status: SessionStatus, owner_name: &str) -> String {
    match status {
        SessionStatus::ReturningUser => format!(
            "Welcome back, {}! I remember our previous conversations. How can I help you today?",
            owner_name
        ),
        SessionStatus::NewUser => format!(
            "Welcome, {}! I'm your LifeGuard-Pro assistant. How can I help you today?",
            owner_name
        ),
    }
}

/// Why a send was refused without touching the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyMessage,
    ExchangePending,
    NoActiveConversation,
}

/// The result of one `send_message` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The assistant answered; its reply was appended.
    Replied(Message),
    /// The exchange failed; the error notice was appended.
    Failed(Message),
    /// The conversation was reset while the exchange was in flight, so the
    /// reply was dropped instead of landing in another session's history.
    Discarded,
    Rejected(RejectReason),
}

struct ActiveConversation {
    session_id: String,
    messages: Vec<Message>,
    pending: Option<PendingExchange>,
}

#[derive(Default)]
struct ConversationState {
    active: Option<ActiveConversation>,
    next_exchange_id: u64,
}

pub struct ConversationController {
    gateway: Arc<dyn AssistantGateway>,
    state: Mutex<ConversationState>,
}

impl ConversationController {
    pub fn new(gateway: Arc<dyn AssistantGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(ConversationState::default()),
        }
    }

    /// Starts the history for a newly active session with its greeting.
    ///
    /// Returns `false` and leaves the history alone when the conversation
    /// already belongs to this session.
    pub async fn initialize(&self, session: &Session) -> bool {
        let mut state = self.state.lock().await;
        if let Some(active) = &state.active {
            if active.session_id == session.session_id() {
                debug!(session_id = %session.session_id(), "Conversation already initialized.");
                return false;
            }
        }

        let greeting = greeting_for(session.status(), session.owner_name());
        state.active = Some(ActiveConversation {
            session_id: session.session_id().to_string(),
            messages: vec![Message::assistant(greeting, Vec::new())],
            pending: None,
        });
        info!(
            session_id = %session.session_id(),
            status = %session.status(),
            "Conversation initialized."
        );
        true
    }

    /// Discards the history and any outstanding exchange.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        if let Some(active) = state.active.take() {
            info!(
                session_id = %active.session_id,
                messages = active.messages.len(),
                "Conversation discarded."
            );
        }
    }

    /// Sends one operator message and appends the outcome to the history.
    ///
    /// Failures of the gateway are absorbed as an error notice; they are never
    /// returned as errors.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Rejected(RejectReason::EmptyMessage);
        }

        // --- 1. Optimistic append and single-flight claim ---
        let (session_id, exchange_id) = {
            let mut state = self.state.lock().await;
            let exchange_id = state.next_exchange_id;
            let Some(active) = state.active.as_mut() else {
                return SendOutcome::Rejected(RejectReason::NoActiveConversation);
            };
            if let Some(pending) = &active.pending {
                debug!(
                    exchange_id = pending.exchange_id,
                    "Send rejected while an exchange is pending."
                );
                return SendOutcome::Rejected(RejectReason::ExchangePending);
            }

            active.messages.push(Message::operator(text));
            active.pending = Some(PendingExchange {
                exchange_id,
                session_id: active.session_id.clone(),
                operator_index: active.messages.len() - 1,
                started_at: Utc::now(),
            });
            let session_id = active.session_id.clone();
            state.next_exchange_id += 1;
            (session_id, exchange_id)
        };
        debug!(%session_id, exchange_id, "Exchange started.");

        // --- 2. The only suspension point ---
        let (reply, failed) = match self.gateway.send_message(&session_id, text).await {
            Ok(reply) => (Message::assistant(reply.response, reply.tool_calls), false),
            Err(e) => {
                let error = ControllerError::MessageExchangeFailed(e.to_string());
                warn!(%session_id, exchange_id, %error, "Message exchange failed.");
                (Message::assistant(ERROR_NOTICE, Vec::new()), true)
            }
        };

        // --- 3. Confirm or compensate, then release the exchange ---
        let mut state = self.state.lock().await;
        let owned = state.active.as_mut().filter(|active| {
            active
                .pending
                .as_ref()
                .is_some_and(|pending| pending.exchange_id == exchange_id)
        });
        let Some(active) = owned else {
            warn!(%session_id, exchange_id, "Reply arrived after the conversation was reset; dropping it.");
            return SendOutcome::Discarded;
        };

        active.messages.push(reply.clone());
        active.pending = None;
        debug!(%session_id, exchange_id, failed, "Exchange completed.");

        if failed {
            SendOutcome::Failed(reply)
        } else {
            SendOutcome::Replied(reply)
        }
    }

    /// A snapshot of the history, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .map(|active| active.messages.clone())
            .unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        let state = self.state.lock().await;
        state.active.as_ref().map_or(0, |active| active.messages.len())
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn pending(&self) -> Option<PendingExchange> {
        let state = self.state.lock().await;
        state.active.as_ref().and_then(|active| active.pending.clone())
    }

    pub async fn is_pending(&self) -> bool {
        self.pending().await.is_some()
    }

    /// The session this history belongs to, if any.
    pub async fn session_id(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.active.as_ref().map(|active| active.session_id.clone())
    }
}
