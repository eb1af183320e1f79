//! Single-entry slot whose contents expire a fixed time after they were stored.

use std::time::Duration;

use tracing::*;

use crate::Timestamped;

/// How long pre-signed data stays readable after it was stored.
pub const PRESIGNED_DATA_TTL: Duration = Duration::from_secs(2 * 60);

/// Single-entry cache whose content expires [`PRESIGNED_DATA_TTL`] after it was stored.
///
/// Timestamps are passed in by the caller so the slot itself never reads a clock.
#[derive(Debug)]
pub struct PreSignedSlot<T> {
    entry: Option<T>,
    ttl_millis: u64,
}

impl<T> Default for PreSignedSlot<T> {
    fn default() -> Self {
        Self::with_ttl(PRESIGNED_DATA_TTL)
    }
}

impl<T> PreSignedSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entry: None,
            ttl_millis: ttl.as_millis() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Drops the current entry. Returns whether there was one.
    pub fn clear(&mut self) -> bool {
        self.entry.take().is_some()
    }
}

impl<T: Timestamped + Clone> PreSignedSlot<T> {
    /// Stores `data` stamped with `now_millis`, replacing whatever was there.
    pub fn set(&mut self, mut data: T, now_millis: u64) {
        data.set_created_at(now_millis);
        if self.entry.replace(data).is_some() {
            debug!("replaced pre-signed entry");
        }
    }

    /// Returns the entry if it is still fresh, evicting it otherwise.
    pub fn get(&mut self, now_millis: u64) -> Option<T> {
        if self.is_expired(now_millis) {
            if self.clear() {
                debug!(%now_millis, "evicted expired pre-signed entry");
            }
            return None;
        }
        self.entry.clone()
    }

    /// Whether a read at `now_millis` would come back empty. Does not evict.
    pub fn is_expired(&self, now_millis: u64) -> bool {
        match &self.entry {
            Some(entry) => now_millis.saturating_sub(entry.created_at()) > self.ttl_millis,
            None => true,
        }
    }
}
