use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::FormError;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-wizard",
    version,
    about = "Render, validate and submit multi-step workflow forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workflow API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to config file (default: form-wizard.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the process definitions that can be started
    Processes,

    /// Fetch a form and render one of its steps
    Show {
        /// Form path, relative to the base URL, or an absolute URL
        #[arg(long)]
        form: String,

        /// Step to render (1-based)
        #[arg(long, default_value_t = 1)]
        step: usize,

        /// Output format: console, html
        #[arg(long, default_value = "console")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fill a step and press one of its buttons
    Submit {
        /// Form path, relative to the base URL, or an absolute URL
        #[arg(long)]
        form: String,

        /// Step to fill (1-based)
        #[arg(long, default_value_t = 1)]
        step: usize,

        /// Text value, as name=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// Checkbox, radio or option to select, as name=value (repeatable)
        #[arg(long = "check")]
        checks: Vec<String>,

        /// File to attach to a file input, as name=path (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,

        /// Button id (default: the step's primary button)
        #[arg(long)]
        button: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-wizard.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means the HTTP client's own default
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    /// JSONL trace file; unset disables tracing
    pub path: Option<String>,
}

pub const DEFAULT_CONFIG_PATH: &str = "form-wizard.yaml";

fn default_base_url() -> String {
    "http://localhost:8000/workflow".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(config_path, &content).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(context: &str, content: &str) -> Result<AppConfig, FormError> {
    serde_yaml::from_str(content).map_err(|source| FormError::Config {
        context: context.to_string(),
        source,
    })
}

/// Split a `name=value` argument. The value may itself contain `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String), FormError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(FormError::InvalidAssignment {
            name: arg.to_string(),
            reason: "expected name=value".to_string(),
        }),
    }
}
