//! Opaque, fixed-width content hash.
//!
//! Equality is the only identity relation the diff engine uses: two trees or
//! blobs with equal [`Hash`] are defined to be equal, full stop. Nothing in
//! this crate or `fracta-diff` ever compares tree/blob content directly.

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;

/// A 32-byte content-addressed identifier (BLAKE3-sized; backend-agnostic —
/// a real object store may use a different digest, this is just the wire
/// shape the diff engine operates on).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Content hash of `data`. Used to build test fixtures and to
    /// content-address newly-stored blobs; the diff engine itself never
    /// hashes bytes, it only compares hashes it was handed.
    pub fn of(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(TreeError::InvalidHash(s.to_string()));
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hex = s
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| TreeError::InvalidHash(s.to_string()))?;
            *byte = u8::from_str_radix(hex, 16).map_err(|_| TreeError::InvalidHash(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}
