// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scoped timing guard
//!
//! # Example
//!
//! ```rust
//! use scoped_profiler::Profiler;
//!
//! let profiler = Profiler::new();
//! {
//!     let mut guard = profiler.scope("bar");
//!     // ... measured work ...
//!     guard.stop();
//!     // ... not measured ...
//! } // no second leave here
//!
//! assert_eq!(profiler.timer_by_label("bar").unwrap().calls(), 1);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::profiler::Profiler;
use crate::site::Site;
use crate::timer::TimerId;

/// A scope-bound activation of one site
///
/// Creating the guard enters the site's timer. The matching leave happens
/// exactly once: on the first [`stop`](ScopedGuard::stop), or when the guard
/// is dropped if it was never stopped.
///
/// # Overhead
///
/// One hash lookup and one clock read on creation, one clock read on stop.
/// Logging is at `trace` level and costs a level check when disabled.
#[derive(Debug)]
#[must_use = "the site stops being measured as soon as the guard is dropped"]
pub struct ScopedGuard<'p, C: Clock = MonotonicClock> {
    profiler: &'p Profiler<C>,
    timer: TimerId,
    stopped: bool,
}

impl<'p, C: Clock> ScopedGuard<'p, C> {
    pub(crate) fn new(profiler: &'p Profiler<C>, site: Site) -> Self {
        let timer = profiler.enter(site);
        Self {
            profiler,
            timer,
            stopped: false,
        }
    }

    /// Stop measuring before the end of the scope
    ///
    /// Only the first call has an effect.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.profiler.leave(self.timer);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Timer this guard is bound to
    pub fn timer_id(&self) -> TimerId {
        self.timer
    }
}

impl<C: Clock> Drop for ScopedGuard<'_, C> {
    fn drop(&mut self) {
        self.stop();
    }
}
