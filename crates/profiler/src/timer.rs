// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Per-site timing state machine
//!
//! A [`Timer`] accumulates statistics for one [`Site`]. Activations are
//! driven by [`enter`](Timer::enter) and [`leave`](Timer::leave), always in
//! matched pairs.
//!
//! Reentrant activations (the site is already active further up the stack)
//! suspend the open interval before starting a new one, and a `leave` that
//! returns to an outer activation resumes it. The recorded total is therefore
//! the sum of disjoint sub-intervals. For a self-recursive site this is the
//! sum of each layer's own time, not the outermost wall-clock span.
//!
//! ```text
//! enter R ──100µs── enter R ──100µs── leave R ─0─ leave R
//!  open    suspend   open      close   resume     close
//!          (+100µs)            (+100µs)           (+0)
//! calls = 2, total = 200µs
//! ```

use std::time::{Duration, Instant};

use crate::registry::Nesting;
use crate::site::Site;

/// Stable handle to a [`Timer`] inside its [`Registry`](crate::Registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) usize);

impl TimerId {
    /// Position of the timer in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Aggregate statistics for one site
#[derive(Debug, Clone)]
pub struct Timer {
    site: Site,
    calls: u64,
    total_time: Duration,
    depth: u32,
    indent_level: Option<usize>,
    last_start: Option<Instant>,
}

impl Timer {
    pub(crate) fn new(site: Site) -> Self {
        Self {
            site,
            calls: 0,
            total_time: Duration::ZERO,
            depth: 0,
            indent_level: None,
            last_start: None,
        }
    }

    /// Start an activation at `now`
    pub(crate) fn enter(&mut self, now: Instant, nesting: &mut Nesting) {
        self.calls += 1;

        if self.depth > 0 {
            // suspend the outer activation
            self.close_interval(now);
        } else {
            let level = nesting.enter();
            if self.indent_level.is_none() {
                self.indent_level = Some(level);
            }
        }

        self.depth += 1;
        self.last_start = Some(now);
    }

    /// Finish the innermost activation at `now`
    pub(crate) fn leave(&mut self, now: Instant, nesting: &mut Nesting) {
        if self.depth == 0 {
            tracing::warn!(site = %self.site, "leave without matching enter ignored");
            return;
        }

        self.close_interval(now);
        self.depth -= 1;

        if self.depth > 0 {
            // resume the outer activation
            self.last_start = Some(now);
        } else {
            nesting.leave();
        }
    }

    fn close_interval(&mut self, now: Instant) {
        if let Some(start) = self.last_start.take() {
            self.total_time += now.saturating_duration_since(start);
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn label(&self) -> &str {
        self.site.label()
    }

    pub fn line(&self) -> u32 {
        self.site.line()
    }

    /// Number of activations so far
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Sum of all closed sub-intervals
    ///
    /// Time in a still-open interval is not included until it is closed by
    /// a suspend or a leave.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// `total_time / calls`, or zero before the first call
    pub fn average_time(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_time.as_nanos() / u128::from(self.calls);
        Duration::from_nanos(nanos as u64)
    }

    /// `total_time / calls` in seconds, without rounding to whole nanoseconds
    pub fn average_secs(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        self.total_time.as_secs_f64() / self.calls as f64
    }

    /// Presentation nesting level fixed at the first activation
    pub fn indent_level(&self) -> usize {
        self.indent_level.unwrap_or(0)
    }

    /// Current recursion depth
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_active(&self) -> bool {
        self.depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us(n: u64) -> Duration {
        Duration::from_micros(n)
    }

    fn timer(label: &'static str) -> Timer {
        Timer::new(Site::new("timer.rs", 1, label))
    }

    #[test]
    fn test_flat_activations_sum_intervals() {
        let mut nesting = Nesting::default();
        let mut t = timer("flat");
        let t0 = Instant::now();

        t.enter(t0, &mut nesting);
        t.leave(t0 + us(30), &mut nesting);
        t.enter(t0 + us(100), &mut nesting);
        t.leave(t0 + us(150), &mut nesting);
        t.enter(t0 + us(200), &mut nesting);
        t.leave(t0 + us(220), &mut nesting);

        assert_eq!(t.calls(), 3);
        assert_eq!(t.total_time(), us(100));
        assert_eq!(t.depth(), 0);
        assert_eq!(nesting.level(), 0);
    }

    #[test]
    fn test_recursion_sums_sub_intervals() {
        let mut nesting = Nesting::default();
        let mut t = timer("R");
        let t0 = Instant::now();

        t.enter(t0, &mut nesting);
        t.enter(t0 + us(100), &mut nesting);
        assert_eq!(t.depth(), 2);
        assert_eq!(t.total_time(), us(100));

        t.leave(t0 + us(200), &mut nesting);
        assert_eq!(t.depth(), 1);
        assert!(t.is_active());

        t.leave(t0 + us(200), &mut nesting);

        assert_eq!(t.calls(), 2);
        assert_eq!(t.total_time(), us(200));
        assert_eq!(t.average_time(), us(100));
        assert!((t.average_secs() - 100e-6).abs() < 1e-12);
        assert!(!t.is_active());
    }

    #[test]
    fn test_outer_work_after_recursion_is_counted() {
        let mut nesting = Nesting::default();
        let mut t = timer("R");
        let t0 = Instant::now();

        t.enter(t0, &mut nesting);
        t.enter(t0 + us(10), &mut nesting);
        t.leave(t0 + us(40), &mut nesting);
        t.leave(t0 + us(100), &mut nesting);

        // 10 before the inner call, 30 inside it, 60 after it
        assert_eq!(t.total_time(), us(100));
    }

    #[test]
    fn test_recursion_takes_one_nesting_level() {
        let mut nesting = Nesting::default();
        let mut t = timer("R");
        let t0 = Instant::now();

        t.enter(t0, &mut nesting);
        t.enter(t0, &mut nesting);
        t.enter(t0, &mut nesting);
        assert_eq!(nesting.level(), 1);

        t.leave(t0, &mut nesting);
        t.leave(t0, &mut nesting);
        assert_eq!(nesting.level(), 1);

        t.leave(t0, &mut nesting);
        assert_eq!(nesting.level(), 0);
    }

    #[test]
    fn test_indent_level_fixed_at_first_activation() {
        let mut nesting = Nesting::default();
        let mut outer = timer("outer");
        let mut inner = timer("inner");
        let t0 = Instant::now();

        outer.enter(t0, &mut nesting);
        inner.enter(t0, &mut nesting);
        inner.leave(t0, &mut nesting);
        outer.leave(t0, &mut nesting);

        assert_eq!(outer.indent_level(), 0);
        assert_eq!(inner.indent_level(), 1);

        // top-level call of inner keeps its first level
        inner.enter(t0, &mut nesting);
        inner.leave(t0, &mut nesting);
        assert_eq!(inner.indent_level(), 1);
        assert_eq!(nesting.level(), 0);
    }

    #[test]
    fn test_unmatched_leave_is_ignored() {
        let mut nesting = Nesting::default();
        let mut t = timer("idle");

        t.leave(Instant::now(), &mut nesting);

        assert_eq!(t.calls(), 0);
        assert_eq!(t.depth(), 0);
        assert_eq!(t.total_time(), Duration::ZERO);
        assert_eq!(t.average_time(), Duration::ZERO);
        assert_eq!(t.average_secs(), 0.0);
    }

    #[test]
    fn test_timer_id_index() {
        assert_eq!(TimerId(7).index(), 7);
    }
}
