//! Utilities shared by the txgate binaries.

pub mod logging;
