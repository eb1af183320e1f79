//! In-memory staging area for signed-but-unbroadcast transaction bundles.
//!
//! Each slot holds at most one bundle and forgets it two minutes after it was stored. The
//! store also carries the latch that keeps a second pre-signing run from starting while one
//! is in flight.

mod clock;
mod errors;
mod latch;
mod slot;
mod store;
mod types;

pub use clock::*;
pub use errors::*;
pub use latch::*;
pub use slot::*;
pub use store::*;
pub use types::*;
