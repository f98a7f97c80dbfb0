pub mod classification;
pub mod conversation;
pub mod domain;
pub mod error;
pub mod labels;
pub mod ports;
pub mod session;

#[cfg(test)]
mod test_support;

pub use classification::ClassificationHistoryController;
pub use conversation::{ConversationController, RejectReason, SendOutcome};
pub use domain::{
    AssistantReply, ClassificationRecord, ClassificationResult, ClassifierResponse, EmailInput,
    Message, PendingExchange, Role, Session, SessionGrant, SessionRequest, SessionStatus,
};
pub use error::{ControllerError, ControllerResult};
pub use ports::{AssistantGateway, ClassifierGateway, GatewayError, GatewayResult};
pub use session::SessionController;
