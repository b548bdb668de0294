//! Node identity codec
//!
//! A node identity is a 128-bit value exchanged as dashed hexadecimal text
//! (`ee4ff9db-66e5-497c-b09b-748cbcf704d6`). Dashes are stripped before
//! decoding and their placement is not checked, so any string that leaves
//! exactly 32 hex digits is accepted.

use std::fmt;
use std::str::FromStr;

/// Number of bytes in a node identity
pub const ID_LEN: usize = 16;

/// Errors produced while decoding a textual identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("expected 32 hex digits after removing dashes, got {0}")]
    InvalidLength(usize),
    #[error("identity contains non-hex characters")]
    InvalidHex,
}

/// Binary form of a node identity
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId([u8; ID_LEN]);

impl NodeId {
    /// Decode dashed (or dashless) hex text into 16 bytes.
    ///
    /// Each adjacent pair of hex digits becomes one byte, high nibble first.
    pub fn decode(text: &str) -> Result<Self, IdentityError> {
        let digits: String = text.chars().filter(|c| *c != '-').collect();
        if digits.len() != ID_LEN * 2 {
            return Err(IdentityError::InvalidLength(digits.chars().count()));
        }

        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(&digits, &mut bytes).map_err(|_| IdentityError::InvalidHex)?;
        Ok(Self(bytes))
    }

    /// Compare two identities without an early exit on the first mismatch.
    pub fn ct_eq(&self, other: &Self) -> bool {
        let diff = self
            .0
            .iter()
            .zip(other.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff == 0
    }

    /// 32 lowercase hex digits, no dashes
    pub fn to_simple(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for NodeId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.to_simple();
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &simple[0..8],
            &simple[8..12],
            &simple[12..16],
            &simple[16..20],
            &simple[20..32]
        )
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}
