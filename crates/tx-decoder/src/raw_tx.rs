use bitcoin::{
    consensus::{deserialize, serialize},
    Transaction,
};
use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// A raw, byte-encoded Bitcoin transaction as handed over by the signer.
/// Provides conversions (via [`TryFrom`]) to and from [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTx(Vec<u8>);

impl RawTx {
    /// Creates a new `RawTx` from a raw byte vector.
    pub fn from_raw_bytes(bytes: Vec<u8>) -> Self {
        RawTx(bytes)
    }

    /// Parses a hex string, ignoring surrounding whitespace.
    pub fn from_hex(raw_hex: &str) -> Result<Self, DecodeError> {
        Ok(RawTx(hex::decode(raw_hex.trim())?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<&Transaction> for RawTx {
    fn from(value: &Transaction) -> Self {
        Self(serialize(value))
    }
}

impl TryFrom<&RawTx> for Transaction {
    type Error = DecodeError;
    fn try_from(value: &RawTx) -> Result<Self, Self::Error> {
        Ok(deserialize(&value.0)?)
    }
}
