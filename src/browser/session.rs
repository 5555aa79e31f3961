use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::driver::{
    Cookie, DialogPolicy, Driver, LaunchOptions, Launcher, PageEvent, SelectBy, WaitUntil,
};
use crate::browser::locator::Locator;
use crate::error::BrowserError;

/// Request sent to browser_server.js over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BrowserRequest {
    Navigate {
        url: String,
        #[serde(rename = "waitUntil")]
        wait_until: WaitUntil,
        #[serde(rename = "timeoutMs", skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    WaitForLoadState {
        state: WaitUntil,
        #[serde(rename = "timeoutMs", skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    Reload,
    GoBack,
    CurrentUrl,
    Title,
    Content,
    Click {
        locator: Locator,
    },
    Fill {
        locator: Locator,
        value: String,
    },
    Clear {
        locator: Locator,
    },
    Hover {
        locator: Locator,
    },
    SetChecked {
        locator: Locator,
        checked: bool,
    },
    SelectOption {
        locator: Locator,
        option: SelectBy,
    },
    ScrollIntoView {
        locator: Locator,
    },
    WaitForVisible {
        locator: Locator,
        #[serde(rename = "timeoutMs")]
        timeout_ms: u64,
    },
    IsVisible {
        locator: Locator,
    },
    IsEnabled {
        locator: Locator,
    },
    IsChecked {
        locator: Locator,
    },
    Count {
        locator: Locator,
    },
    TextContent {
        locator: Locator,
    },
    AllTextContents {
        locator: Locator,
    },
    InputValue {
        locator: Locator,
    },
    Attribute {
        locator: Locator,
        name: String,
    },
    Evaluate {
        script: String,
    },
    EvaluateOn {
        locator: Locator,
        script: String,
    },
    Screenshot {
        path: String,
        #[serde(rename = "fullPage")]
        full_page: bool,
    },
    Cookies,
    DialogPolicy {
        policy: DialogPolicy,
    },
    TakeEvents,
    ClosePage,
    CloseContext,
    CloseBrowser,
    Quit,
}

impl BrowserRequest {
    /// Command name as it appears on the wire, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BrowserRequest::Navigate { .. } => "navigate",
            BrowserRequest::WaitForLoadState { .. } => "wait_for_load_state",
            BrowserRequest::Reload => "reload",
            BrowserRequest::GoBack => "go_back",
            BrowserRequest::CurrentUrl => "current_url",
            BrowserRequest::Title => "title",
            BrowserRequest::Content => "content",
            BrowserRequest::Click { .. } => "click",
            BrowserRequest::Fill { .. } => "fill",
            BrowserRequest::Clear { .. } => "clear",
            BrowserRequest::Hover { .. } => "hover",
            BrowserRequest::SetChecked { .. } => "set_checked",
            BrowserRequest::SelectOption { .. } => "select_option",
            BrowserRequest::ScrollIntoView { .. } => "scroll_into_view",
            BrowserRequest::WaitForVisible { .. } => "wait_for_visible",
            BrowserRequest::IsVisible { .. } => "is_visible",
            BrowserRequest::IsEnabled { .. } => "is_enabled",
            BrowserRequest::IsChecked { .. } => "is_checked",
            BrowserRequest::Count { .. } => "count",
            BrowserRequest::TextContent { .. } => "text_content",
            BrowserRequest::AllTextContents { .. } => "all_text_contents",
            BrowserRequest::InputValue { .. } => "input_value",
            BrowserRequest::Attribute { .. } => "attribute",
            BrowserRequest::Evaluate { .. } => "evaluate",
            BrowserRequest::EvaluateOn { .. } => "evaluate_on",
            BrowserRequest::Screenshot { .. } => "screenshot",
            BrowserRequest::Cookies => "cookies",
            BrowserRequest::DialogPolicy { .. } => "dialog_policy",
            BrowserRequest::TakeEvents => "take_events",
            BrowserRequest::ClosePage => "close_page",
            BrowserRequest::CloseContext => "close_context",
            BrowserRequest::CloseBrowser => "close_browser",
            BrowserRequest::Quit => "quit",
        }
    }
}

/// Response received from browser_server.js over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// Set when the failure was a Playwright TimeoutError
    #[serde(default)]
    pub timeout: Option<bool>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub ready: Option<bool>,
}

struct Channel {
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

/// A browser session backed by a browser_server.js process.
///
/// Launches a Node.js process that opens one Chromium browser, one context and
/// one page. Commands are sent as NDJSON over stdin, responses read from
/// stdout. The channel sits behind a mutex so page objects can share a `&self`
/// handle; calls are still strictly sequential.
pub struct PlaywrightDriver {
    child: Mutex<Child>,
    channel: Mutex<Channel>,
    script: String,
}

impl PlaywrightDriver {
    /// Launch a browser session by spawning browser_server.js.
    pub fn launch(
        node: &str,
        script: &Path,
        options: &LaunchOptions,
    ) -> Result<Self, BrowserError> {
        let script_name = script.display().to_string();
        let options_json =
            serde_json::to_string(options).map_err(|e| BrowserError::JsonSerialize {
                context: "LaunchOptions".into(),
                source: e,
            })?;

        let mut child = Command::new(node)
            .arg(script)
            .arg(&options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| BrowserError::SubprocessSpawn {
                script: script_name.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            BrowserError::SessionIO(format!("Failed to capture stdin of {}", script_name))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            BrowserError::SessionIO(format!("Failed to capture stdout of {}", script_name))
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| BrowserError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        if line.trim().is_empty() {
            let status = child.wait().map_err(|e| {
                BrowserError::SessionIO(format!("Failed to wait for {}: {}", script_name, e))
            })?;
            return Err(BrowserError::SubprocessFailed {
                script: script_name,
                status,
                stderr: "exited before signalling ready".into(),
            });
        }

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| BrowserError::JsonParse {
                context: "browser_server.js ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(BrowserError::SessionProtocol {
                command: "launch".into(),
                error: response
                    .error
                    .unwrap_or_else(|| "Did not receive ready signal".into()),
            });
        }

        tracing::debug!(script = %script_name, headless = options.headless, "browser session launched");

        Ok(PlaywrightDriver {
            child: Mutex::new(child),
            channel: Mutex::new(Channel { stdin, reader }),
            script: script_name,
        })
    }

    /// Send a request and read the response.
    fn send(&self, request: &BrowserRequest) -> Result<BrowserResponse, BrowserError> {
        let json = serde_json::to_string(request).map_err(|e| BrowserError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        let mut channel = self
            .channel
            .lock()
            .map_err(|e| BrowserError::SessionIO(format!("Driver channel lock poisoned: {}", e)))?;

        writeln!(channel.stdin, "{}", json).map_err(|e| {
            BrowserError::SessionIO(format!("Failed to write to {} stdin: {}", self.script, e))
        })?;

        channel.stdin.flush().map_err(|e| {
            BrowserError::SessionIO(format!("Failed to flush {} stdin: {}", self.script, e))
        })?;

        let mut line = String::new();
        channel.reader.read_line(&mut line).map_err(|e| {
            BrowserError::SessionIO(format!("Failed to read from {} stdout: {}", self.script, e))
        })?;

        if line.trim().is_empty() {
            return Err(BrowserError::SessionIO(format!(
                "Empty response from {} (process may have died)",
                self.script
            )));
        }

        serde_json::from_str(line.trim()).map_err(|e| BrowserError::JsonParse {
            context: format!("{} response", request.name()),
            source: e,
        })
    }

    /// Send a request and verify it succeeded; returns the response value.
    fn send_ok(&self, request: BrowserRequest) -> Result<Value, BrowserError> {
        let response = self.send(&request)?;
        if !response.ok {
            let error = response.error.unwrap_or_else(|| "Unknown error".into());
            if response.timeout == Some(true) {
                return Err(BrowserError::Timeout {
                    command: request.name().into(),
                    error,
                });
            }
            return Err(BrowserError::SessionProtocol {
                command: request.name().into(),
                error,
            });
        }
        Ok(response.value.unwrap_or(Value::Null))
    }

    fn send_unit(&self, request: BrowserRequest) -> Result<(), BrowserError> {
        self.send_ok(request).map(|_| ())
    }

    fn send_as<T: for<'de> Deserialize<'de>>(
        &self,
        request: BrowserRequest,
    ) -> Result<T, BrowserError> {
        let name = request.name();
        let value = self.send_ok(request)?;
        serde_json::from_value(value).map_err(|e| BrowserError::JsonParse {
            context: format!("{} value", name),
            source: e,
        })
    }

    /// Ask the server to exit and reap the process. Best-effort.
    pub fn quit(&self) {
        let _ = self.send(&BrowserRequest::Quit);
        if let Ok(mut child) = self.child.lock() {
            let _ = child.wait();
        }
    }
}

impl Driver for PlaywrightDriver {
    fn navigate(
        &self,
        url: &str,
        wait_until: WaitUntil,
        timeout: Option<Duration>,
    ) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Navigate {
            url: url.to_string(),
            wait_until,
            timeout_ms: timeout.map(|t| t.as_millis() as u64),
        })
    }

    fn wait_for_load_state(
        &self,
        state: WaitUntil,
        timeout: Option<Duration>,
    ) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::WaitForLoadState {
            state,
            timeout_ms: timeout.map(|t| t.as_millis() as u64),
        })
    }

    fn reload(&self) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Reload)
    }

    fn go_back(&self) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::GoBack)
    }

    fn current_url(&self) -> Result<String, BrowserError> {
        self.send_as(BrowserRequest::CurrentUrl)
    }

    fn title(&self) -> Result<String, BrowserError> {
        self.send_as(BrowserRequest::Title)
    }

    fn content(&self) -> Result<String, BrowserError> {
        self.send_as(BrowserRequest::Content)
    }

    fn click(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Click {
            locator: locator.clone(),
        })
    }

    fn fill(&self, locator: &Locator, text: &str) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Fill {
            locator: locator.clone(),
            value: text.to_string(),
        })
    }

    fn clear(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Clear {
            locator: locator.clone(),
        })
    }

    fn hover(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Hover {
            locator: locator.clone(),
        })
    }

    fn set_checked(&self, locator: &Locator, checked: bool) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::SetChecked {
            locator: locator.clone(),
            checked,
        })
    }

    fn select_option(&self, locator: &Locator, option: &SelectBy) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::SelectOption {
            locator: locator.clone(),
            option: option.clone(),
        })
    }

    fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::ScrollIntoView {
            locator: locator.clone(),
        })
    }

    fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::WaitForVisible {
            locator: locator.clone(),
            timeout_ms: timeout.as_millis() as u64,
        })
    }

    fn is_visible(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.send_as(BrowserRequest::IsVisible {
            locator: locator.clone(),
        })
    }

    fn is_enabled(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.send_as(BrowserRequest::IsEnabled {
            locator: locator.clone(),
        })
    }

    fn is_checked(&self, locator: &Locator) -> Result<bool, BrowserError> {
        self.send_as(BrowserRequest::IsChecked {
            locator: locator.clone(),
        })
    }

    fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        self.send_as(BrowserRequest::Count {
            locator: locator.clone(),
        })
    }

    fn text_content(&self, locator: &Locator) -> Result<Option<String>, BrowserError> {
        self.send_as(BrowserRequest::TextContent {
            locator: locator.clone(),
        })
    }

    fn all_text_contents(&self, locator: &Locator) -> Result<Vec<String>, BrowserError> {
        self.send_as(BrowserRequest::AllTextContents {
            locator: locator.clone(),
        })
    }

    fn input_value(&self, locator: &Locator) -> Result<String, BrowserError> {
        self.send_as(BrowserRequest::InputValue {
            locator: locator.clone(),
        })
    }

    fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>, BrowserError> {
        self.send_as(BrowserRequest::Attribute {
            locator: locator.clone(),
            name: name.to_string(),
        })
    }

    fn evaluate(&self, script: &str) -> Result<Value, BrowserError> {
        self.send_ok(BrowserRequest::Evaluate {
            script: script.to_string(),
        })
    }

    fn evaluate_on(&self, locator: &Locator, script: &str) -> Result<Value, BrowserError> {
        self.send_ok(BrowserRequest::EvaluateOn {
            locator: locator.clone(),
            script: script.to_string(),
        })
    }

    fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::Screenshot {
            path: path.display().to_string(),
            full_page,
        })
    }

    fn cookies(&self) -> Result<Vec<Cookie>, BrowserError> {
        self.send_as(BrowserRequest::Cookies)
    }

    fn set_dialog_policy(&self, policy: DialogPolicy) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::DialogPolicy { policy })
    }

    fn take_events(&self) -> Result<Vec<PageEvent>, BrowserError> {
        self.send_as(BrowserRequest::TakeEvents)
    }

    fn close_page(&self) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::ClosePage)
    }

    fn close_context(&self) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::CloseContext)
    }

    fn close_browser(&self) -> Result<(), BrowserError> {
        self.send_unit(BrowserRequest::CloseBrowser)
    }
}

impl Drop for PlaywrightDriver {
    fn drop(&mut self) {
        // Best-effort cleanup
        self.quit();
    }
}

/// Spawns one `PlaywrightDriver` per test session.
#[derive(Debug, Clone)]
pub struct PlaywrightLauncher {
    pub node: String,
    pub script: PathBuf,
}

impl PlaywrightLauncher {
    pub fn new(node: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            node: node.into(),
            script: script.into(),
        }
    }
}

impl Launcher for PlaywrightLauncher {
    fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Driver>, BrowserError> {
        let driver = PlaywrightDriver::launch(&self.node, &self.script, options)?;
        Ok(Box::new(driver))
    }
}
