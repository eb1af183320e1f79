//! Decoding of raw signed Bitcoin transactions into fee-annotated previews.
//!
//! Decoding is pure: no state and no I/O. Input values are resolved against a caller-supplied
//! UTXO set, since raw transactions only reference their inputs by outpoint.

mod bundle;
mod decode;
mod errors;
mod raw_tx;
mod types;

pub use bundle::*;
pub use decode::*;
pub use errors::*;
pub use raw_tx::*;
pub use types::*;

/// Result alias for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
