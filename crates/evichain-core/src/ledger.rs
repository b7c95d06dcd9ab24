//! Simulated evidence ledger primitives.
//!
//! Hash keys here are random pseudo-identifiers with a hash-like shape.
//! They carry no cryptographic meaning.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EvichainError, Result};

/// Length of a hash key including the `0x` prefix.
pub const HASH_KEY_LEN: usize = 66;

pub const LEDGER_NAME: &str = "EVICHAIN";
pub const PAYLOAD_VERSION: &str = "1.0";

/// Generate a fresh `0x`-prefixed 64-digit hex pseudo-identifier.
pub fn pseudo_hash_key() -> String {
    format!("0x{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Shape check only: `0x` prefix and 66 characters total.
pub fn is_well_formed_hash_key(key: &str) -> bool {
    key.starts_with("0x") && key.len() == HASH_KEY_LEN
}

/// Content encoded in an evidence QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub evidence_id: String,
    pub hash_key: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub blockchain: String,
    pub version: String,
}

impl QrPayload {
    pub fn new(evidence_id: &str, hash_key: &str) -> Self {
        Self {
            evidence_id: evidence_id.to_string(),
            hash_key: hash_key.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            blockchain: LEDGER_NAME.to_string(),
            version: PAYLOAD_VERSION.to_string(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a scanned payload. Anything that is not a complete payload
    /// object is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw.trim()).map_err(|e| EvichainError::InvalidQrPayload(e.to_string()))
    }
}

/// A hash key issued to the session user for one piece of evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceKey {
    pub evidence_id: String,
    pub hash_key: String,
    pub issued_at: DateTime<Utc>,
}

impl From<&EvidenceKey> for QrPayload {
    fn from(key: &EvidenceKey) -> Self {
        Self {
            evidence_id: key.evidence_id.clone(),
            hash_key: key.hash_key.clone(),
            timestamp: key.issued_at.timestamp_millis(),
            blockchain: LEDGER_NAME.to_string(),
            version: PAYLOAD_VERSION.to_string(),
        }
    }
}

/// Keys held by the session user.
#[derive(Default)]
pub struct EvidenceKeyring {
    keys: Mutex<Vec<EvidenceKey>>,
}

impl EvidenceKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, evidence_id: &str, hash_key: &str) -> Result<EvidenceKey> {
        let key = EvidenceKey {
            evidence_id: evidence_id.to_string(),
            hash_key: hash_key.to_string(),
            issued_at: Utc::now(),
        };
        self.keys
            .lock()
            .map_err(|e| EvichainError::Keyring(format!("keyring lock poisoned: {}", e)))?
            .push(key.clone());
        Ok(key)
    }

    /// Whether a key matching both evidence id and hash key was issued.
    pub fn holds(&self, evidence_id: &str, hash_key: &str) -> bool {
        self.keys
            .lock()
            .map(|keys| {
                keys.iter()
                    .any(|k| k.evidence_id == evidence_id && k.hash_key == hash_key)
            })
            .unwrap_or(false)
    }

    pub fn keys(&self) -> Vec<EvidenceKey> {
        self.keys.lock().map(|k| k.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_hash_key_shape() {
        let key = pseudo_hash_key();
        assert!(is_well_formed_hash_key(&key));
        assert!(key[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_pseudo_hash_keys_differ() {
        assert_ne!(pseudo_hash_key(), pseudo_hash_key());
    }

    #[test]
    fn test_well_formed_rejects_bad_shapes() {
        assert!(!is_well_formed_hash_key("0x1234"));
        assert!(!is_well_formed_hash_key(&"a".repeat(66)));
        assert!(!is_well_formed_hash_key(""));
    }

    #[test]
    fn test_payload_encode_uses_camel_case() {
        let payload = QrPayload::new("EVD-001", "0xabc");
        let json: serde_json::Value = serde_json::from_str(&payload.encode().unwrap()).unwrap();
        assert_eq!(json["evidenceId"], "EVD-001");
        assert_eq!(json["hashKey"], "0xabc");
        assert_eq!(json["blockchain"], "EVICHAIN");
        assert_eq!(json["version"], "1.0");
    }

    #[test]
    fn test_payload_parse_encoded() {
        let payload = QrPayload::new("EVD-007", &pseudo_hash_key());
        let parsed = QrPayload::parse(&payload.encode().unwrap()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_payload_parse_rejects_garbage() {
        let err = QrPayload::parse("not a qr code").unwrap_err();
        assert!(matches!(err, EvichainError::InvalidQrPayload(_)));
    }

    #[test]
    fn test_payload_parse_rejects_missing_fields() {
        assert!(QrPayload::parse(r#"{"evidenceId":"EVD-001"}"#).is_err());
    }

    #[test]
    fn test_keyring_holds_exact_pair_only() {
        let ring = EvidenceKeyring::new();
        ring.insert("EVD-001", "0x1").unwrap();
        assert!(ring.holds("EVD-001", "0x1"));
        assert!(!ring.holds("EVD-001", "0x2"));
        assert!(!ring.holds("EVD-002", "0x1"));
        assert_eq!(ring.keys().len(), 1);
    }

    #[test]
    fn test_payload_from_issued_key() {
        let ring = EvidenceKeyring::new();
        let key = ring.insert("EVD-003", &pseudo_hash_key()).unwrap();
        let payload = QrPayload::from(&key);
        assert_eq!(payload.evidence_id, "EVD-003");
        assert_eq!(payload.hash_key, key.hash_key);
        assert_eq!(payload.timestamp, key.issued_at.timestamp_millis());
        assert!(ring.holds(&payload.evidence_id, &payload.hash_key));
    }
}
