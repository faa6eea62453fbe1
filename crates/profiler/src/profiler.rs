// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Profiler context
//!
//! [`Profiler`] is the object the host owns for the lifetime of the program
//! and passes by reference to every instrumented routine. It holds the
//! [`Registry`] and the [`Clock`], and acts as the factory that binds each
//! [`ScopedGuard`] to the timer of its site.
//!
//! ## Example
//!
//! ```rust
//! use scoped_profiler::{ManualClock, Profiler};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let profiler = Profiler::with_clock(&clock);
//! {
//!     let _guard = profiler.scope("A");
//!     clock.advance(Duration::from_micros(2000));
//! }
//!
//! let a = profiler.timer_by_label("A").unwrap();
//! assert_eq!(a.calls(), 1);
//! assert_eq!(a.total_time(), Duration::from_micros(2000));
//! ```

use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::io;

use crate::clock::{Clock, MonotonicClock};
use crate::error::ProfilerResult;
use crate::guard::ScopedGuard;
use crate::registry::Registry;
use crate::report::{Report, ReportOptions};
use crate::site::Site;
use crate::timer::{Timer, TimerId};

/// Host-owned profiling context
///
/// Single-threaded by construction: the registry lives in a `RefCell`, so a
/// `Profiler` is `!Sync`.
#[derive(Debug)]
pub struct Profiler<C: Clock = MonotonicClock> {
    registry: RefCell<Registry>,
    clock: C,
}

impl Profiler {
    /// Create a profiler backed by the monotonic system clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Profiler<C> {
    /// Create a profiler reading timestamps from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            registry: RefCell::new(Registry::new()),
            clock,
        }
    }

    /// Start measuring `site` until the returned guard is stopped or dropped
    pub fn enter_site(&self, site: Site) -> ScopedGuard<'_, C> {
        ScopedGuard::new(self, site)
    }

    /// Start measuring a site labelled `label` at the caller's location
    #[track_caller]
    pub fn scope(&self, label: impl Into<Cow<'static, str>>) -> ScopedGuard<'_, C> {
        self.enter_site(Site::caller(label))
    }

    pub(crate) fn enter(&self, site: Site) -> TimerId {
        let mut registry = self.registry.borrow_mut();
        let id = registry.lookup_or_register(site);
        registry.enter(id, self.clock.now());
        id
    }

    pub(crate) fn leave(&self, id: TimerId) {
        let now = self.clock.now();
        self.registry.borrow_mut().leave(id, now);
    }

    /// Borrow the timers in first-activation order
    ///
    /// Callers release the borrow within the same statement; guards created
    /// or stopped while it is held would panic.
    pub(crate) fn timers(&self) -> Ref<'_, [Timer]> {
        Ref::map(self.registry.borrow(), Registry::ordered_timers)
    }

    /// Copy of the timers in first-activation order
    pub fn snapshot(&self) -> Vec<Timer> {
        self.timers().to_vec()
    }

    /// Copy of the timer bound to `site`, if it has been activated
    pub fn timer(&self, site: &Site) -> Option<Timer> {
        let registry = self.registry.borrow();
        let id = registry.lookup(site)?;
        registry.timer(id).cloned()
    }

    /// Copy of the first registered timer carrying `label`
    pub fn timer_by_label(&self, label: &str) -> Option<Timer> {
        self.timers().iter().find(|t| t.label() == label).cloned()
    }

    /// Number of registered sites
    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    /// Current value of the shared nesting counter
    pub fn nesting_level(&self) -> usize {
        self.registry.borrow().nesting()
    }

    /// Build the report with default options
    pub fn report(&self) -> Report {
        self.report_with(ReportOptions::default())
    }

    pub fn report_with(&self, options: ReportOptions) -> Report {
        Report::from_timers(&self.timers(), options)
    }

    /// Write the report to an I/O sink
    pub fn write_report<W: io::Write>(&self, out: &mut W) -> ProfilerResult<()> {
        let report = self.report();
        write!(out, "{report}")?;
        out.flush()?;
        Ok(())
    }

    /// Write the report to a formatting sink such as a `String`
    pub fn render_into<W: fmt::Write>(&self, out: &mut W) -> ProfilerResult<()> {
        let report = self.report();
        write!(out, "{report}")?;
        Ok(())
    }
}
