use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::browser::driver::LaunchOptions;
use crate::harness::session::SessionConfig;
use crate::pages::base::{DEFAULT_BASE_URL, PageConfig};

pub const DEFAULT_CONFIG_FILE: &str = "storefront-e2e.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "storefront-e2e",
    version,
    about = "End-to-end browser test suite for the automationexercise.com storefront"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: storefront-e2e.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the live site
    Run {
        /// Only scenarios tagged with this category (e.g. Smoke, Cart, XSS)
        #[arg(long)]
        category: Option<String>,

        /// Only scenarios whose name contains this text (e.g. TC05)
        #[arg(long)]
        filter: Option<String>,

        /// Output format: console, html, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Run the browser without a window
        #[arg(long)]
        headless: bool,

        /// Site root to test against
        #[arg(long)]
        base_url: Option<String>,

        /// Multiplier for fixed settle delays (0 disables them)
        #[arg(long)]
        settle_scale: Option<f64>,

        /// Node executable used to start the browser server
        #[arg(long)]
        node: Option<String>,

        /// Path to the browser server script
        #[arg(long)]
        script: Option<String>,

        /// JSONL step trace file
        #[arg(long)]
        trace: Option<String>,
    },

    /// List registered scenarios without running them
    List {
        /// Only scenarios tagged with this category
        #[arg(long)]
        category: Option<String>,

        /// Only scenarios whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `storefront-e2e.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_settle_scale")]
    pub settle_scale: f64,

    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,

    #[serde(default = "default_screenshots_dir")]
    pub screenshots_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            settle_scale: default_settle_scale(),
            probe_timeout_ms: default_probe_timeout(),
            screenshots_dir: default_screenshots_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_timeout")]
    pub default_timeout_ms: u64,

    #[serde(default)]
    pub slow_mo_ms: u64,

    #[serde(default = "default_node")]
    pub node: String,

    #[serde(default = "default_script")]
    pub script: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            default_timeout_ms: default_timeout(),
            slow_mo_ms: 0,
            node: default_node(),
            script: default_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,

    pub trace: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: default_console(),
            output: None,
            trace: None,
        }
    }
}

// Serde default helpers
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_settle_scale() -> f64 { 1.0 }
fn default_probe_timeout() -> u64 { 5000 }
fn default_screenshots_dir() -> String { "screenshots".to_string() }
fn default_timeout() -> u64 { 30_000 }
fn default_node() -> String { "node".to_string() }
fn default_script() -> String { "node/browser_server.js".to_string() }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = config_path, error = %e, "malformed config file, using defaults");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Values given on the `run` command line. `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub headless: bool,
    pub base_url: Option<String>,
    pub settle_scale: Option<f64>,
    pub node: Option<String>,
    pub script: Option<String>,
}

/// Build the per-session configuration: CLI > config file > defaults.
pub fn build_session_config(config: &AppConfig, overrides: &RunOverrides) -> SessionConfig {
    let launch = LaunchOptions {
        headless: overrides.headless || config.browser.headless,
        default_timeout_ms: config.browser.default_timeout_ms,
        slow_mo_ms: config.browser.slow_mo_ms,
        ..LaunchOptions::default()
    };

    let pages = PageConfig {
        base_url: overrides
            .base_url
            .clone()
            .unwrap_or_else(|| config.site.base_url.clone()),
        screenshots_dir: PathBuf::from(&config.site.screenshots_dir),
        settle_scale: overrides
            .settle_scale
            .unwrap_or(config.site.settle_scale)
            .max(0.0),
        probe_timeout_ms: config.site.probe_timeout_ms,
    };

    SessionConfig { launch, pages }
}

/// Node executable and server script: CLI > config file > defaults.
pub fn resolve_launcher_paths(config: &AppConfig, overrides: &RunOverrides) -> (String, PathBuf) {
    let node = overrides
        .node
        .clone()
        .unwrap_or_else(|| config.browser.node.clone());
    let script = overrides
        .script
        .clone()
        .unwrap_or_else(|| config.browser.script.clone());
    (node, PathBuf::from(script))
}
