//! Errors raised while decoding raw Bitcoin transactions.

use bitcoin::consensus::encode;
use thiserror::Error;

/// Hard decoding failures.
///
/// Only bytes that cannot be parsed at all end up here. Missing prevouts and non-standard
/// scripts are resolved during decoding and never produce an error.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The raw transaction string is not valid hex.
    #[error("raw transaction is not valid hex")]
    InvalidHex(#[from] hex::FromHexError),

    /// The bytes do not form a consensus-valid transaction encoding.
    #[error("malformed transaction: {0}")]
    Malformed(#[from] encode::Error),
}
