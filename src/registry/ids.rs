/// Identity type for the membership registry.
///
/// - `Principal`: 32-byte opaque identity, compared only by equality.
///   Either supplied raw by the embedder or derived from an Ed25519 pubkey.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::registry::error::{RegistryError, Result};

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// Opaque identity of a caller or member.
///
/// The registry never looks inside the bytes. Key-derived principals use
/// BLAKE3("DAO-PRINCIPAL" || pubkey) so they cannot collide with a raw key
/// supplied through `from_bytes`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(pub [u8; 32]);

impl Principal {
    /// Derive a Principal from an Ed25519 public key.
    pub fn from_pubkey(pubkey: &[u8; 32]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"DAO-PRINCIPAL");
        hasher.update(pubkey);
        Principal(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Principal(bytes)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encode for display/storage.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| RegistryError::InvalidUser)?;
        let id: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| RegistryError::InvalidUser)?;
        Ok(Principal(id))
    }
}

impl Ord for Principal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Principal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({}..)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
