//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for company reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted report with a header per company
    Report,
    /// One JSON object per company
    Json,
}

/// CLI arguments for company-research
#[derive(Parser, Debug)]
#[command(name = "company-research")]
#[command(author, version, about = "Research companies with a tool-calling LLM agent")]
#[command(long_about = r#"
Runs a tool-calling agent that searches the web and reads pages until it can
write a company report.

The agent has two tools:
  google_search   Google results via SerpAPI (needs SERPAPI_API_KEY)
  web_fetch       Fetch a page as cleaned text or raw HTML

The model is reached through an OpenAI-compatible endpoint (OpenRouter by
default, needs OPENROUTER_API_KEY).

Configuration files are loaded from (in priority order):
1. AGENT_TOOLKIT_* environment variables
2. --config <path>                          Explicit config file
3. ./agent-toolkit.toml                     Project-level config
4. <config dir>/agent-toolkit/config.toml  Global config (~/.config on Linux)

Example:
  company-research "VIA Science"
  company-research -m openai/gpt-4o --max-turns 5 Acme Globex
  company-research -o json --conversation-log run.jsonl "Initech"
"#)]
pub struct Cli {
    /// Companies to research (defaults to "VIA Science")
    #[arg(value_name = "COMPANY")]
    pub companies: Vec<String>,

    /// Model identifier on the endpoint
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Maximum model round-trips per company
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Run the tool calls of one turn concurrently
    #[arg(long)]
    pub parallel_tools: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "report")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL transcript of every run to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
