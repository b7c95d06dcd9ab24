//! Shared configuration, errors, value types, and the simulated evidence
//! collaborators used by the EVICHAIN terminal.

pub mod access_log;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod types;

pub use access_log::{AccessLogEntry, AccessLogSink, JsonlAccessLog, MemoryAccessLog};
pub use config::EvichainConfig;
pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use error::{EvichainError, Result};
pub use ledger::{is_well_formed_hash_key, pseudo_hash_key, EvidenceKey, EvidenceKeyring, QrPayload};
pub use types::*;
