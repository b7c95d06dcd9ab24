use thiserror::Error;

/// Top-level error type for the EVICHAIN crates.
///
/// The chat crate wraps this in its own error type and implements
/// `From<EvichainError>` so collaborator failures propagate with `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvichainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Access log error: {0}")]
    AccessLog(String),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Invalid QR payload: {0}")]
    InvalidQrPayload(String),
}

impl From<toml::de::Error> for EvichainError {
    fn from(err: toml::de::Error) -> Self {
        EvichainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for EvichainError {
    fn from(err: toml::ser::Error) -> Self {
        EvichainError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for EvichainError {
    fn from(err: serde_json::Error) -> Self {
        EvichainError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for EVICHAIN operations.
pub type Result<T> = std::result::Result<T, EvichainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(EvichainError, &str)> = vec![
            (
                EvichainError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                EvichainError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
            (
                EvichainError::Authentication("unknown user".to_string()),
                "Authentication failed: unknown user",
            ),
            (
                EvichainError::AccessLog("disk full".to_string()),
                "Access log error: disk full",
            ),
            (
                EvichainError::Keyring("lock poisoned".to_string()),
                "Keyring error: lock poisoned",
            ),
            (
                EvichainError::InvalidQrPayload("missing hashKey".to_string()),
                "Invalid QR payload: missing hashKey",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: EvichainError = io_err.into();
        assert!(matches!(err, EvichainError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let err: EvichainError = err.unwrap_err().into();
        assert!(matches!(err, EvichainError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let err: EvichainError = err.unwrap_err().into();
        assert!(matches!(err, EvichainError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let parsed: serde_json::Value = serde_json::from_str("{\"ok\": true}")?;
            Ok(parsed["ok"].to_string())
        }

        assert_eq!(inner().unwrap(), "true");
    }
}
