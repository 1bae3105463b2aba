//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ```toml
/// [logging]
/// conversation_log = "logs/research.conversation.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; no transcript when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_log: Option<PathBuf>,
}
