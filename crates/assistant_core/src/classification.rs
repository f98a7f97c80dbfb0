//! crates/assistant_core/src/classification.rs
//!
//! Owns the newest-first history of email classification attempts.
//!
//! Calls may overlap. Each record is prepended when its gateway call
//! completes, so the history is ordered by completion time, not submission.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{
    domain::{ClassificationRecord, ClassificationResult, EmailInput},
    error::{ControllerError, ControllerResult},
    ports::{ClassifierGateway, GatewayError},
};

/// Shown when neither the server nor the transport explained the failure.
pub const CLASSIFY_FALLBACK_MESSAGE: &str = "Failed to classify email";

#[derive(Default)]
struct HistoryState {
    records: VecDeque<ClassificationRecord>,
    next_id: u64,
}

/// Counts one gateway call for as long as it lives, even if the caller's
/// future is dropped mid-call.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct ClassificationHistoryController {
    gateway: Arc<dyn ClassifierGateway>,
    state: Mutex<HistoryState>,
    in_flight: AtomicUsize,
}

impl ClassificationHistoryController {
    pub fn new(gateway: Arc<dyn ClassifierGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(HistoryState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Submits one email and prepends the resulting record.
    ///
    /// The history is untouched on any failure.
    pub async fn classify(
        &self,
        subject: &str,
        text: &str,
        from_email: Option<&str>,
    ) -> ControllerResult<ClassificationRecord> {
        if subject.trim().is_empty() || text.trim().is_empty() {
            return Err(ControllerError::ValidationFailed(
                "Subject and email text are required".to_string(),
            ));
        }

        let input = EmailInput {
            subject: subject.to_string(),
            text: text.to_string(),
            from_email: from_email
                .map(str::trim)
                .filter(|from| !from.is_empty())
                .map(str::to_string),
        };

        let response = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.gateway.classify_email(&input).await
        };

        let mut state = self.state.lock().await;
        let response = response.map_err(|e| {
            error!(subject = %input.subject, error = %e, "Email classification failed.");
            ControllerError::ClassificationFailed(failure_message(&e))
        })?;

        if !(0.0..=1.0).contains(&response.confidence) {
            error!(
                confidence = response.confidence,
                "Classifier returned a confidence outside [0, 1]."
            );
            return Err(ControllerError::ClassificationFailed(format!(
                "Classifier returned an invalid confidence: {}",
                response.confidence
            )));
        }

        let record = ClassificationRecord {
            id: state.next_id,
            input,
            result: ClassificationResult {
                label: response.label_id,
                gmail_label: response.gmail_label,
                category: response.category,
                confidence: response.confidence,
                used_tools: response.used_tools,
                reply_text: response.reply_text,
            },
            submitted_at: Utc::now(),
        };
        state.next_id += 1;
        state.records.push_front(record.clone());

        info!(
            record_id = record.id,
            label = %record.result.label,
            confidence = record.result.confidence,
            "Email classified."
        );
        Ok(record)
    }

    /// A snapshot of the history, newest first.
    pub async fn records(&self) -> Vec<ClassificationRecord> {
        self.state.lock().await.records.iter().cloned().collect()
    }

    pub async fn latest(&self) -> Option<ClassificationRecord> {
        self.state.lock().await.records.front().cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of classification calls still waiting on the gateway.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Prefers the server's own explanation, then the transport error.
fn failure_message(error: &GatewayError) -> String {
    match error {
        GatewayError::Rejected {
            detail: Some(detail),
            ..
        } if !detail.trim().is_empty() => detail.clone(),
        GatewayError::Rejected { .. } => CLASSIFY_FALLBACK_MESSAGE.to_string(),
        GatewayError::Transport(message) | GatewayError::InvalidResponse(message)
            if !message.trim().is_empty() =>
        {
            message.clone()
        }
        _ => CLASSIFY_FALLBACK_MESSAGE.to_string(),
    }
}
