//! Core value types shared by the terminal and its collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Users
// =============================================================================

/// Access level of a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Officer,
    ForensicAnalyst,
    LegalReviewer,
    Administrator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Officer => write!(f, "OFFICER"),
            Role::ForensicAnalyst => write!(f, "FORENSIC_ANALYST"),
            Role::LegalReviewer => write!(f, "LEGAL_REVIEWER"),
            Role::Administrator => write!(f, "ADMINISTRATOR"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "officer" => Ok(Role::Officer),
            "forensic_analyst" => Ok(Role::ForensicAnalyst),
            "legal_reviewer" => Ok(Role::LegalReviewer),
            "administrator" => Ok(Role::Administrator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// An authenticated user as seen by the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// How loudly a notification should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Informational,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Informational => write!(f, "informational"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A summary event pushed to the surrounding notification UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn informational(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Informational,
            timestamp: Utc::now(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Critical,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_is_uppercase() {
        assert_eq!(Role::Officer.to_string(), "OFFICER");
        assert_eq!(Role::LegalReviewer.to_string(), "LEGAL_REVIEWER");
    }

    #[test]
    fn test_role_from_str_case_insensitive() {
        assert_eq!("Officer".parse::<Role>().unwrap(), Role::Officer);
        assert_eq!(
            "FORENSIC_ANALYST".parse::<Role>().unwrap(),
            Role::ForensicAnalyst
        );
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&Role::LegalReviewer).unwrap();
        assert_eq!(json, "\"legal_reviewer\"");
    }

    #[test]
    fn test_notification_constructors_set_severity() {
        let info = Notification::informational("Evidence EVD-001 added");
        assert_eq!(info.severity, Severity::Informational);
        assert_eq!(info.message, "Evidence EVD-001 added");

        let alert = Notification::critical("SECURITY ALERT");
        assert_eq!(alert.severity, Severity::Critical);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Informational.to_string(), "informational");
        assert_eq!(Severity::Critical.to_string(), "critical");
    }
}
