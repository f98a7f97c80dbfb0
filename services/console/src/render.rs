//! services/console/src/render.rs
//!
//! Plain-text rendering of controller state for the terminal. Every function
//! here is pure; none of them feed back into the controllers.

use assistant_core::{
    labels::{badge_text, confidence_percent, label_color},
    ClassificationRecord, Message, Role, Session,
};
use chrono::Local;

pub const THINKING: &str = "Thinking...";
pub const NO_RESULTS: &str =
    "No results yet. Submit an email to see classification and generated reply.";

pub fn session_header(session: &Session) -> String {
    let mut header = format!("LifeGuard-Pro Assistant | User: {}", session.owner_name());
    if session.is_returning() {
        header.push_str(" | 🔄 Returning User");
    }
    header.push_str(&format!(" | Session: {}...", session.short_id()));
    header
}

pub fn message(message: &Message) -> String {
    let author = match message.role {
        Role::Operator => "You",
        Role::Assistant => "Assistant",
    };
    let time = message.created_at.with_timezone(&Local).format("%H:%M:%S");

    let mut out = format!("[{}] {}:\n{}", time, author, message.content);
    if message.has_tool_calls() {
        out.push_str(&format!("\n🔧 Tools: {}", message.tool_calls.join(", ")));
    }
    out
}

pub fn record(record: &ClassificationRecord) -> String {
    let result = &record.result;
    let mut lines = vec![
        format!(
            "[{}] ({}) {}  {} confidence",
            badge_text(&result.label),
            label_color(&result.label),
            result.gmail_label,
            confidence_percent(result.confidence)
        ),
        record
            .submitted_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        "ORIGINAL EMAIL".to_string(),
        format!("Subject: {}", record.input.subject),
    ];
    if let Some(from) = &record.input.from_email {
        lines.push(format!("From: {}", from));
    }
    lines.push(record.input.text.clone());
    lines.push("GENERATED REPLY".to_string());
    lines.push(result.reply_text.clone());
    if !result.used_tools.is_empty() {
        lines.push(format!("🔧 Tools Used: {}", result.used_tools.join(", ")));
    }
    lines.push(format!("Category: {}", result.category));
    lines.join("\n")
}

pub fn history(records: &[ClassificationRecord]) -> String {
    if records.is_empty() {
        return format!("Results\n{}", NO_RESULTS);
    }
    let rendered: Vec<String> = records.iter().map(record).collect();
    format!("Results ({})\n{}", records.len(), rendered.join("\n\n"))
}
