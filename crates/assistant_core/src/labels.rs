//! crates/assistant_core/src/labels.rs
//!
//! Pure presentation values derived from a classification label.

/// Color used for any label outside the known set.
pub const DEFAULT_LABEL_COLOR: &str = "#6b7280";

const LABEL_COLORS: &[(&str, &str)] = &[
    ("BUY_NOW", "#10b981"),
    ("BUY_LATER", "#3b82f6"),
    ("FOLLOW_UP", "#8b5cf6"),
    ("CUSTOMER_SERVICE", "#f59e0b"),
    ("OBJECTION", "#ef4444"),
    ("NEUTRAL", DEFAULT_LABEL_COLOR),
];

/// Hex color for a label. Unknown labels get [`DEFAULT_LABEL_COLOR`].
pub fn label_color(label: &str) -> &'static str {
    LABEL_COLORS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LABEL_COLOR)
}

pub fn badge_text(label: &str) -> String {
    label.to_uppercase()
}

/// Confidence as a whole percentage, e.g. `0.82` becomes `"82%"`.
pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}
