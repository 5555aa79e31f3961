use serde::Serialize;

use chrono::Utc;

/// What a trace line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Started,
    Step,
    Assertion,
    Attachment,
    Finished,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: i64,
    pub scenario: String,
    pub step: usize,
    pub kind: TraceKind,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TraceEvent {
    pub fn now(scenario: &str, step: usize, kind: TraceKind, message: impl ToString) -> Self {
        Self {
            timestamp_ms: Utc::now().timestamp_millis(),
            scenario: scenario.to_string(),
            step,
            kind,
            message: message.to_string(),
            passed: None,
            status: None,
        }
    }

    pub fn with_passed(mut self, passed: bool) -> Self {
        self.passed = Some(passed);
        self
    }

    pub fn with_status(mut self, status: impl ToString) -> Self {
        self.status = Some(status.to_string());
        self
    }
}
