//! Error types for the dialogue engine.
//!
//! Unknown commands are not errors: they are answered in the transcript.

use evichain_core::error::EvichainError;

/// Errors returned to the embedding UI.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session is closed")]
    SessionClosed,
    #[error("reveal in progress, input ignored")]
    RevealInProgress,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

impl From<EvichainError> for ChatError {
    fn from(err: EvichainError) -> Self {
        ChatError::Collaborator(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::SessionClosed.to_string(), "session is closed");
        assert_eq!(
            ChatError::RevealInProgress.to_string(),
            "reveal in progress, input ignored"
        );
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(500).to_string(),
            "message exceeds maximum length of 500 characters"
        );
        assert_eq!(
            ChatError::Collaborator("disk full".to_string()).to_string(),
            "collaborator error: disk full"
        );
    }

    #[test]
    fn test_chat_error_from_evichain_error() {
        let err: ChatError = EvichainError::AccessLog("disk full".to_string()).into();
        assert!(matches!(err, ChatError::Collaborator(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_chat_error_from_io_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ChatError = EvichainError::from(io).into();
        assert!(err.to_string().contains("I/O error: gone"));
    }
}
