//! JSONL transcript writer for agent runs.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying `type`, `seq`
//! and `timestamp` next to the event payload.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toolkit_application::{ConversationEvent, ConversationLogger};
use tracing::warn;

struct Inner {
    writer: BufWriter<File>,
    seq: u64,
}

/// Transcript logger that appends one JSON object per line.
pub struct JsonlConversationLogger {
    inner: Mutex<Inner>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path` in append mode.
    ///
    /// Parent directories are created as needed. Returns `None` and logs a
    /// warning if the file cannot be opened; a missing transcript never
    /// prevents a run.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            inner: Mutex::new(Inner {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn build_record(event: ConversationEvent, seq: u64, timestamp: String) -> serde_json::Value {
    match event.payload {
        serde_json::Value::Object(mut map) => {
            map.insert("type".to_string(), event.event_type.into());
            map.insert("seq".to_string(), seq.into());
            map.insert("timestamp".to_string(), timestamp.into());
            serde_json::Value::Object(map)
        }
        other => serde_json::json!({
            "type": event.event_type,
            "seq": seq,
            "timestamp": timestamp,
            "data": other,
        }),
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.seq += 1;
        let record = build_record(event, inner.seq, timestamp);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if let Err(e) = writeln!(inner.writer, "{}", line).and_then(|_| inner.writer.flush()) {
            warn!("Failed to write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let _ = inner.writer.flush();
        }
    }
}
