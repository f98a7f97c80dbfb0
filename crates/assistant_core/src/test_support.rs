//! Gateway doubles shared by the controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{
    AssistantReply, ClassifierResponse, EmailInput, Session, SessionGrant, SessionRequest,
    SessionStatus,
};
use crate::ports::{AssistantGateway, ClassifierGateway, GatewayError, GatewayResult};

pub fn session(id: &str, status: SessionStatus) -> Session {
    Session::new(
        id.to_string(),
        status,
        "Ada".to_string(),
        "ada@example.com".to_string(),
        None,
    )
}

/// Holds a gateway call in flight until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

fn install_gate(slot: &Mutex<Option<Arc<Gate>>>) -> Arc<Gate> {
    let gate = Arc::new(Gate::default());
    *slot.lock().unwrap() = Some(gate.clone());
    gate
}

async fn wait_at_gate(slot: &Mutex<Option<Arc<Gate>>>) {
    let gate = slot.lock().unwrap().clone();
    if let Some(gate) = gate {
        gate.pass().await;
    }
}

#[derive(Default)]
pub struct FakeAssistant {
    create_calls: AtomicUsize,
    send_calls: AtomicUsize,
    end_calls: AtomicUsize,
    fail_create: AtomicBool,
    fail_send: AtomicBool,
    fail_end: AtomicBool,
    returning: AtomicBool,
    create_gate: Mutex<Option<Arc<Gate>>>,
    send_gate: Mutex<Option<Arc<Gate>>>,
    end_gate: Mutex<Option<Arc<Gate>>>,
    sent: Mutex<Vec<(String, String)>>,
    ended: Mutex<Vec<String>>,
}

impl FakeAssistant {
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn end_calls(&self) -> usize {
        self.end_calls.load(Ordering::SeqCst)
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn fail_ends(&self, fail: bool) {
        self.fail_end.store(fail, Ordering::SeqCst);
    }

    pub fn recognize_users(&self, returning: bool) {
        self.returning.store(returning, Ordering::SeqCst);
    }

    pub fn hold_creates(&self) -> Arc<Gate> {
        install_gate(&self.create_gate)
    }

    pub fn hold_sends(&self) -> Arc<Gate> {
        install_gate(&self.send_gate)
    }

    pub fn hold_ends(&self) -> Arc<Gate> {
        install_gate(&self.end_gate)
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn ended(&self) -> Vec<String> {
        self.ended.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantGateway for FakeAssistant {
    async fn create_session(&self, request: &SessionRequest) -> GatewayResult<SessionGrant> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        wait_at_gate(&self.create_gate).await;
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 422,
                detail: Some(format!("invalid email: {}", request.user_email)),
            });
        }
        let status = if self.returning.load(Ordering::SeqCst) {
            SessionStatus::ReturningUser
        } else {
            SessionStatus::NewUser
        };
        Ok(SessionGrant {
            session_id: format!("session-{:04}-abcdef", n + 1),
            status,
        })
    }

    async fn send_message(&self, session_id: &str, message: &str) -> GatewayResult<AssistantReply> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((session_id.to_string(), message.to_string()));

        wait_at_gate(&self.send_gate).await;

        if self.fail_send.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        Ok(AssistantReply {
            response: format!("echo: {}", message),
            tool_calls: vec!["search_courses".to_string()],
        })
    }

    async fn end_session(&self, session_id: &str) -> GatewayResult<()> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        wait_at_gate(&self.end_gate).await;
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection reset".to_string()));
        }
        self.ended.lock().unwrap().push(session_id.to_string());
        Ok(())
    }
}

/// A classifier that answers from a script, one entry per call.
#[derive(Default)]
pub struct FakeClassifier {
    calls: AtomicUsize,
    script: Mutex<VecDeque<(Option<Arc<Gate>>, GatewayResult<ClassifierResponse>)>>,
}

impl FakeClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn respond(&self, result: GatewayResult<ClassifierResponse>) {
        self.script.lock().unwrap().push_back((None, result));
    }

    /// Queues a response that is only delivered once the returned gate opens.
    pub fn respond_held(&self, result: GatewayResult<ClassifierResponse>) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.script
            .lock()
            .unwrap()
            .push_back((Some(gate.clone()), result));
        gate
    }
}

pub fn classifier_response(label_id: &str, confidence: f64) -> ClassifierResponse {
    ClassifierResponse {
        label_id: label_id.to_string(),
        gmail_label: format!("Sales/{}", label_id),
        confidence,
        category: "sales".to_string(),
        reply_text: "Thanks for reaching out!".to_string(),
        used_tools: vec!["lookup_pricing".to_string()],
    }
}

#[async_trait]
impl ClassifierGateway for FakeClassifier {
    async fn classify_email(&self, _email: &EmailInput) -> GatewayResult<ClassifierResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let Some((gate, result)) = next else {
            return Err(GatewayError::Transport("no scripted response".to_string()));
        };
        if let Some(gate) = gate {
            gate.pass().await;
        }
        result
    }
}
