use std::fmt;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum BrowserError {
    /// Node.js driver process failed to spawn (browser_server.js)
    SubprocessSpawn { script: String, source: std::io::Error },

    /// Node.js driver process exited with non-zero status
    SubprocessFailed { script: String, status: ExitStatus, stderr: String },

    /// Reading from or writing to the driver process failed
    SessionIO(String),

    /// JSON parsing failed (driver response)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (driver request)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Driver reported failure for a command
    SessionProtocol { command: String, error: String },

    /// A wait or action did not observe the expected state in time
    Timeout { command: String, error: String },

    /// Text read back from the page could not be interpreted
    UnexpectedText { context: String, text: String },

    /// Session used outside its Ready state
    SessionState(String),
}

impl BrowserError {
    /// Whether this error is a timeout reported by the driver.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::Timeout { .. })
    }
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            BrowserError::SubprocessFailed { script, status, stderr } => {
                write!(f, "{} exited with {}: {}", script, status, stderr)
            }
            BrowserError::SessionIO(msg) => write!(f, "Driver I/O error: {}", msg),
            BrowserError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            BrowserError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            BrowserError::SessionProtocol { command, error } => {
                write!(f, "Browser command '{}' failed: {}", command, error)
            }
            BrowserError::Timeout { command, error } => {
                write!(f, "Browser command '{}' timed out: {}", command, error)
            }
            BrowserError::UnexpectedText { context, text } => {
                write!(f, "Unexpected text for {}: '{}'", context, text)
            }
            BrowserError::SessionState(msg) => write!(f, "Invalid session state: {}", msg),
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::SubprocessSpawn { source, .. } => Some(source),
            BrowserError::JsonParse { source, .. } => Some(source),
            BrowserError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why a scenario body stopped.
#[derive(Debug)]
pub enum ScenarioError {
    /// An explicit expectation did not hold
    Assertion { message: String },

    /// A required browser action failed
    Browser(BrowserError),
}

impl ScenarioError {
    pub fn assertion(message: impl Into<String>) -> Self {
        ScenarioError::Assertion {
            message: message.into(),
        }
    }
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Assertion { message } => write!(f, "Assertion failed: {}", message),
            ScenarioError::Browser(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Browser(e) => Some(e),
            ScenarioError::Assertion { .. } => None,
        }
    }
}

impl From<BrowserError> for ScenarioError {
    fn from(e: BrowserError) -> Self {
        ScenarioError::Browser(e)
    }
}
