//! crates/assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the console.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;

/// Whether the assistant gateway recognized prior history for the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NewUser,
    ReturningUser,
}

impl SessionStatus {
    /// The wire name used by the assistant gateway.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::NewUser => "new_user",
            SessionStatus::ReturningUser => "returning_user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new_user" => Some(SessionStatus::NewUser),
            "returning_user" => Some(SessionStatus::ReturningUser),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One server-recognized conversation. Every field is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: String,
    status: SessionStatus,
    owner_name: String,
    owner_email: String,
    owner_phone: Option<String>,
}

impl Session {
    pub fn new(
        session_id: String,
        status: SessionStatus,
        owner_name: String,
        owner_email: String,
        owner_phone: Option<String>,
    ) -> Self {
        Self {
            session_id,
            status,
            owner_name,
            owner_email,
            owner_phone,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn owner_phone(&self) -> Option<&str> {
        self.owner_phone.as_deref()
    }

    pub fn is_returning(&self) -> bool {
        self.status == SessionStatus::ReturningUser
    }

    /// The first eight characters of the session id, for headers.
    pub fn short_id(&self) -> &str {
        match self.session_id.char_indices().nth(8) {
            Some((idx, _)) => &self.session_id[..idx],
            None => &self.session_id,
        }
    }
}

/// The details an operator supplies to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
}

/// What the assistant gateway returns for a created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub session_id: String,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Operator,
    Assistant,
}

/// A single entry of a conversation. Never edited once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tool names the assistant reported; empty for operator messages.
    pub tool_calls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn operator(content: impl Into<String>) -> Self {
        Self {
            role: Role::Operator,
            content: content.into(),
            tool_calls: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Vec<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            created_at: Utc::now(),
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// The assistant gateway's answer to one operator message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub response: String,
    pub tool_calls: Vec<String>,
}

/// The single in-flight send/receive unit of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingExchange {
    pub exchange_id: u64,
    pub session_id: String,
    /// Position of the optimistically appended operator message.
    pub operator_index: usize,
    pub started_at: DateTime<Utc>,
}

/// The exact email submitted for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailInput {
    pub subject: String,
    pub text: String,
    pub from_email: Option<String>,
}

/// The classifier gateway's raw answer, before it becomes a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierResponse {
    pub label_id: String,
    pub gmail_label: String,
    pub confidence: f64,
    pub category: String,
    pub reply_text: String,
    pub used_tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub gmail_label: String,
    pub category: String,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub used_tools: Vec<String>,
    pub reply_text: String,
}

/// One immutable classification attempt and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub id: u64,
    pub input: EmailInput,
    pub result: ClassificationResult,
    pub submitted_at: DateTime<Utc>,
}
