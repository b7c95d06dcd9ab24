//! Append-only log of evidence access attempts.
//!
//! Each entry is a standalone JSON object. The file-backed sink writes one
//! object per line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EvichainError, Result};

/// Action recorded for every QR issue.
pub const ACCESS_ATTEMPT: &str = "ACCESS_ATTEMPT";

/// Placeholder recorded in place of a client address.
pub const MASKED_IP: &str = "xxx.xxx.xxx.xxx";

/// One access-log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogEntry {
    pub evidence_id: String,
    pub hash_key: String,
    pub user_id: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub action: String,
    pub ip: String,
}

impl AccessLogEntry {
    /// Build an `ACCESS_ATTEMPT` entry stamped with the current time.
    pub fn access_attempt(evidence_id: &str, hash_key: &str, user_id: &str) -> Self {
        Self {
            evidence_id: evidence_id.to_string(),
            hash_key: hash_key.to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            action: ACCESS_ATTEMPT.to_string(),
            ip: MASKED_IP.to_string(),
        }
    }
}

/// Append capability for access-log entries.
pub trait AccessLogSink: Send + Sync {
    fn append(&self, entry: &AccessLogEntry) -> Result<()>;
}

/// Sink appending JSON lines to a file.
pub struct JsonlAccessLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAccessLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccessLogSink for JsonlAccessLog {
    fn append(&self, entry: &AccessLogEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| EvichainError::AccessLog(format!("write lock poisoned: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        tracing::info!(
            evidence_id = %entry.evidence_id,
            user_id = %entry.user_id,
            "Evidence access logged"
        );
        Ok(())
    }
}

/// Sink keeping entries in memory.
#[derive(Default)]
pub struct MemoryAccessLog {
    entries: Mutex<Vec<AccessLogEntry>>,
}

impl MemoryAccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far.
    pub fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl AccessLogSink for MemoryAccessLog {
    fn append(&self, entry: &AccessLogEntry) -> Result<()> {
        self.entries
            .lock()
            .map_err(|e| EvichainError::AccessLog(format!("entries lock poisoned: {}", e)))?
            .push(entry.clone());
        Ok(())
    }
}
