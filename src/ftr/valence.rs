//! Lock-free arrival counting at join saddles.
//!
//! Every front reaching a join saddle subtracts its contribution (the number
//! of the saddle's lower-star edges it owns) from the saddle's counter. The
//! counter starts at the [`UNTOUCHED`] sentinel; whoever observes the sentinel
//! adds `total + 1`, turning the counter into "contributions still missing".
//! Exactly one arrival observes a pre-decrement value equal to its own
//! contribution, and that arrival is the last one.

use std::sync::atomic::{AtomicI64, Ordering};

/// Value of a counter no front has reached yet.
pub const UNTOUCHED: i64 = -1;

#[derive(Debug)]
pub struct ValenceCounter(AtomicI64);

impl Default for ValenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValenceCounter {
    pub const fn new() -> Self {
        Self(AtomicI64::new(UNTOUCHED))
    }

    #[inline]
    pub fn load(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_untouched(&self) -> bool {
        self.load() == UNTOUCHED
    }

    /// Atomically subtracts `by`, returns the previous value.
    #[inline]
    pub fn fetch_sub_capture(&self, by: i64) -> i64 {
        self.0.fetch_sub(by, Ordering::AcqRel)
    }

    /// Atomically adds `by`, returns the previous value.
    #[inline]
    pub fn fetch_add_capture(&self, by: i64) -> i64 {
        self.0.fetch_add(by, Ordering::AcqRel)
    }

    /// Registers an arrival contributing `contribution` out of `total`.
    /// Returns `true` for exactly one arrival once the contributions sum to
    /// `total`.
    ///
    /// `contribution` must be at least one: a zero contribution could
    /// observe the sentinel after another arrival initialised the counter.
    pub fn arrive(&self, contribution: i64, total: i64) -> bool {
        debug_assert!(contribution >= 1, "empty contribution at a join");
        let mut old = self.fetch_sub_capture(contribution);
        if old == UNTOUCHED {
            let new = self.fetch_add_capture(total + 1);
            old = contribution + new + total + 1;
        }
        old == contribution
    }
}
