use crate::error::DecodeError;
use alloy_primitives::{hex, U256};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt, str::FromStr};

/// `0x`-prefixed lowercase hex text, as returned by the backend and by RPC
/// nodes for hashes, token ids and block numbers.
///
/// Values of any length are accepted (`0x64` is a valid block number), so this
/// is not a fixed-width `B256`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct HexString(String);

impl HexString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits without the `0x` prefix.
    pub fn digits(&self) -> &str {
        self.0.strip_prefix("0x").unwrap_or(&self.0)
    }

    /// Interprets the value as a big-endian unsigned number.
    pub fn to_u256(&self) -> Option<U256> {
        U256::from_str_radix(self.digits(), 16).ok()
    }

    pub fn from_u256(value: U256) -> Self {
        Self(format!("0x{value:x}"))
    }

    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(hex::encode_prefixed(bytes))
    }
}

impl FromStr for HexString {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DecodeError::InvalidHex(s.to_string()));
        }
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl fmt::Display for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
