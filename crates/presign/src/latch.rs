//! Mutual exclusion for pre-signing runs.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tracing::*;

use crate::PreSignError;

/// Holder value of a free latch.
const FREE: u64 = 0;

/// Holder value written by [`SigningLatch::set`].
const MANUAL_HOLD: u64 = u64::MAX;

#[derive(Debug, Default)]
struct LatchState {
    /// Generation of the current holder, or [`FREE`].
    holder: AtomicU64,
    last_generation: AtomicU64,
}

/// Mutual-exclusion flag for pre-signing runs.
///
/// Not a queue: a second run against the same UTXO set could produce two candidate
/// transactions spending the same inputs, so contenders are refused.
#[derive(Debug, Clone, Default)]
pub struct SigningLatch(Arc<LatchState>);

impl SigningLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the latch, failing if another run holds it.
    ///
    /// The latch is released when the returned guard drops, whichever way the run ends. A
    /// guard only ever releases its own hold.
    pub fn try_acquire(&self) -> Result<SigningGuard, PreSignError> {
        let generation = self.0.last_generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.0
            .holder
            .compare_exchange(FREE, generation, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PreSignError::SigningInProgress)?;
        debug!(%generation, "pre-signing latch acquired");
        Ok(SigningGuard {
            state: self.0.clone(),
            generation,
        })
    }

    pub fn is_held(&self) -> bool {
        self.0.holder.load(Ordering::Acquire) != FREE
    }

    /// Forces the flag. Prefer [`Self::try_acquire`], which cannot leak a held latch.
    ///
    /// Forcing it either way takes the hold away from any outstanding guard, whose drop
    /// then leaves the latch alone.
    pub fn set(&self, in_progress: bool) {
        let holder = if in_progress { MANUAL_HOLD } else { FREE };
        self.0.holder.store(holder, Ordering::Release);
    }
}

/// Holds the [`SigningLatch`] until dropped.
#[derive(Debug)]
#[must_use = "the latch is released as soon as the guard is dropped"]
pub struct SigningGuard {
    state: Arc<LatchState>,
    generation: u64,
}

impl Drop for SigningGuard {
    fn drop(&mut self) {
        let released = self
            .state
            .holder
            .compare_exchange(self.generation, FREE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if released {
            debug!(generation = %self.generation, "pre-signing latch released");
        } else {
            debug!(generation = %self.generation, "pre-signing latch no longer ours, left as is");
        }
    }
}
