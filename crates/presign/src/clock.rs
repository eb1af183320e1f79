//! Millisecond time sources.

use std::{
    fmt::Debug,
    time::{SystemTime, UNIX_EPOCH},
};

/// Millisecond wall clock used to stamp and expire pre-signed data.
pub trait Clock: Send + Sync + Debug {
    fn now_millis(&self) -> u64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-utils"))]
mod manual {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::Clock;

    /// Clock that only moves when told to.
    #[derive(Debug, Default)]
    pub struct ManualClock(AtomicU64);

    impl ManualClock {
        pub fn new(start_millis: u64) -> Self {
            Self(AtomicU64::new(start_millis))
        }

        pub fn set(&self, millis: u64) {
            self.0.store(millis, Ordering::SeqCst);
        }

        pub fn advance(&self, millis: u64) {
            self.0.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }
}
