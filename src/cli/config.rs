use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::selector::resolver::{DEFAULT_MAX_DEPTH, SelectorResolver};
use crate::session::capture_session::CaptureSession;
use crate::snapshot::capture::{DEFAULT_MAX_MARKUP_LEN, DEFAULT_MAX_TEXT_LEN, SnapshotCapturer};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "interaction-profiler",
    version,
    about = "Turns observed page interactions into animation profiles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: interaction-profiler.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a durable selector for one node of a page document
    Resolve {
        /// Page document JSON file
        #[arg(long)]
        document: String,

        /// Node index inside the document
        #[arg(long)]
        node: usize,
    },

    /// Capture one interaction from a before and an after document
    Capture {
        /// Page document JSON at event time
        #[arg(long)]
        before: String,

        /// Page document JSON after the settle delay
        #[arg(long)]
        after: String,

        /// Node index of the interacted element (same in both documents)
        #[arg(long)]
        node: usize,

        /// Event kind, e.g. click, hover, focus
        #[arg(long, default_value = "click")]
        event: String,

        /// Event timestamp in milliseconds
        #[arg(long, default_value_t = 0)]
        timestamp: u64,
    },

    /// Classify a mutation batch
    Compress {
        /// Mutation batch JSON file
        #[arg(long)]
        batch: String,
    },

    /// Synthesize animation profiles from interaction records
    Synthesize {
        /// Interaction records JSON file
        #[arg(long)]
        records: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `interaction-profiler.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Wait between an event and its after-capture
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Levels walked by the structural selector tier
    #[serde(default = "default_max_depth")]
    pub max_ancestor_depth: usize,

    #[serde(default = "default_markup_len")]
    pub max_markup_len: usize,

    #[serde(default = "default_text_len")]
    pub max_text_len: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            max_ancestor_depth: default_max_depth(),
            max_markup_len: default_markup_len(),
            max_text_len: default_text_len(),
        }
    }
}

// Serde default helpers
fn default_settle_delay_ms() -> u64 { 50 }
fn default_max_depth() -> usize { DEFAULT_MAX_DEPTH }
fn default_markup_len() -> usize { DEFAULT_MAX_MARKUP_LEN }
fn default_text_len() -> usize { DEFAULT_MAX_TEXT_LEN }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> ProfilerConfig {
    let config_path = path.unwrap_or("interaction-profiler.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
            ProfilerConfig::default()
        }),
        Err(_) => ProfilerConfig::default(),
    }
}

// ============================================================================
// Config Builders
// ============================================================================

impl ProfilerConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn build_resolver(&self) -> SelectorResolver {
        SelectorResolver::new(self.max_ancestor_depth)
    }

    pub fn build_capturer(&self) -> SnapshotCapturer {
        SnapshotCapturer::new(self.build_resolver(), self.max_markup_len, self.max_text_len)
    }

    pub fn build_session(&self) -> CaptureSession {
        CaptureSession::new(self.build_capturer(), self.settle_delay())
    }
}
