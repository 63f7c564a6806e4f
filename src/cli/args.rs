//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BeatScope - AI-powered Hip-Hop beat analysis
#[derive(Parser, Debug)]
#[command(name = "beat-scope")]
#[command(version)]
#[command(about = "AI-powered Hip-Hop beat analysis using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a local audio file
    Analyze {
        /// Audio file(s); the first audio-typed candidate is analyzed
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Dispatch to a running beat-scope server instead of calling the
        /// model backend directly
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Print the raw JSON result instead of the formatted report
        #[arg(long)]
        json: bool,
    },
    /// Record from the microphone (30 second cap) and analyze the take
    Record {
        /// Dispatch to a running beat-scope server instead of calling the
        /// model backend directly
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Also write the finalized recording to this path
        #[arg(short = 'o', long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Print the raw JSON result instead of the formatted report
        #[arg(long)]
        json: bool,
    },
    /// Run the analysis HTTP server
    Serve {
        /// Listen address (host:port)
        #[arg(short, long, value_name = "ADDR")]
        listen: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "gemini_api_key",
    "openrouter_api_key",
    "backend",
    "model",
    "listen",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
