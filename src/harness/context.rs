use serde::{Deserialize, Serialize};

/// Which assertion primitive produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionKind {
    True,
    False,
    Equal,
    NotEqual,
    Contains,
    StartsWith,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl AssertionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::True => "IsTrue",
            AssertionKind::False => "IsFalse",
            AssertionKind::Equal => "Equal",
            AssertionKind::NotEqual => "NotEqual",
            AssertionKind::Contains => "Contains",
            AssertionKind::StartsWith => "StartsWith",
            AssertionKind::Greater => "Greater",
            AssertionKind::GreaterOrEqual => "GreaterOrEqual",
            AssertionKind::Less => "Less",
            AssertionKind::LessOrEqual => "LessOrEqual",
        }
    }
}

/// Result of one assertion evaluated by a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Step the assertion was made in (0 before the first `step()` call)
    pub step_index: usize,
    pub kind: AssertionKind,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// The scenario's description of what should hold
    pub message: String,
}

/// Tracks the execution state and results of a running scenario.
#[derive(Debug, Clone, Default)]
pub struct TestContext {
    /// Number of `step()` calls so far
    pub current_step: usize,

    /// All assertion results collected during execution
    pub assertion_results: Vec<AssertionResult>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: AssertionResult) {
        self.assertion_results.push(result);
    }

    pub fn advance(&mut self) {
        self.current_step += 1;
    }

    pub fn all_passed(&self) -> bool {
        self.assertion_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.assertion_results.iter().filter(|r| !r.passed).count()
    }
}
