//! Transcript and session value types.

use chrono::{DateTime, Utc};
use evichain_core::types::UserProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual category of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    System,
    /// Echo of what the user submitted.
    User,
    /// Prompt asking for the next field value.
    Input,
    Success,
    Error,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::System => write!(f, "system"),
            LineKind::User => write!(f, "user"),
            LineKind::Input => write!(f, "input"),
            LineKind::Success => write!(f, "success"),
            LineKind::Error => write!(f, "error"),
        }
    }
}

/// One line of the chat transcript.
///
/// Only the last line of a transcript may be `in_progress`; once finalized a
/// line is never touched again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub id: u64,
    pub text: String,
    pub kind: LineKind,
    pub created_at: DateTime<Utc>,
    pub in_progress: bool,
}

/// What the embedding UI knows about the session when it opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub current_user: Option<UserProfile>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_user(user: UserProfile) -> Self {
        Self {
            current_user: Some(user),
        }
    }
}
