// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use std::collections::HashMap;
use std::time::Instant;

use crate::site::Site;
use crate::timer::{Timer, TimerId};

/// Nesting counter shared by every site of one registry
///
/// A site takes one level when it goes from inactive to active and gives it
/// back when it becomes inactive again. Reentrant activations of an already
/// active site do not take another level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Nesting {
    level: usize,
}

impl Nesting {
    /// Return the current level, then increment it
    pub fn enter(&mut self) -> usize {
        let level = self.level;
        self.level += 1;
        level
    }

    pub fn leave(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

/// Ordered collection of timers keyed by site
///
/// Timers are stored in registration order, which is the order in which
/// their sites were first activated. That order is what the report uses.
#[derive(Debug, Default)]
pub struct Registry {
    timers: Vec<Timer>,
    index: HashMap<Site, TimerId>,
    nesting: Nesting,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timer for `site`
    ///
    /// Each site is registered once. Registering a known site again returns
    /// the existing timer instead of creating a duplicate.
    pub fn register(&mut self, site: Site) -> TimerId {
        if let Some(&id) = self.index.get(&site) {
            tracing::warn!(site = %site, "site registered twice, reusing existing timer");
            return id;
        }

        let id = TimerId(self.timers.len());
        tracing::debug!(
            file = site.file(),
            line = site.line(),
            label = site.label(),
            position = id.index(),
            "Registered profiling site"
        );

        self.index.insert(site.clone(), id);
        self.timers.push(Timer::new(site));
        id
    }

    pub fn lookup(&self, site: &Site) -> Option<TimerId> {
        self.index.get(site).copied()
    }

    /// Resolve the timer for `site`, creating it on first use
    pub fn lookup_or_register(&mut self, site: Site) -> TimerId {
        match self.lookup(&site) {
            Some(id) => id,
            None => self.register(site),
        }
    }

    /// Start an activation of `id` at `now`
    pub fn enter(&mut self, id: TimerId, now: Instant) {
        let Self {
            timers, nesting, ..
        } = self;
        let Some(timer) = timers.get_mut(id.0) else {
            tracing::warn!(id = id.index(), "enter for unknown timer ignored");
            return;
        };
        timer.enter(now, nesting);

        tracing::trace!(
            label = timer.label(),
            depth = timer.depth(),
            calls = timer.calls(),
            "enter"
        );
    }

    /// Finish the innermost activation of `id` at `now`
    pub fn leave(&mut self, id: TimerId, now: Instant) {
        let Self {
            timers, nesting, ..
        } = self;
        let Some(timer) = timers.get_mut(id.0) else {
            tracing::warn!(id = id.index(), "leave for unknown timer ignored");
            return;
        };
        timer.leave(now, nesting);

        tracing::trace!(
            label = timer.label(),
            depth = timer.depth(),
            total_ns = timer.total_time().as_nanos() as u64,
            "leave"
        );
    }

    /// Return the current nesting level, then increment it
    pub fn enter_nesting(&mut self) -> usize {
        self.nesting.enter()
    }

    pub fn leave_nesting(&mut self) {
        self.nesting.leave();
    }

    pub fn nesting(&self) -> usize {
        self.nesting.level()
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(id.0)
    }

    /// Timers in registration order
    pub fn ordered_timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn site(label: &'static str) -> Site {
        Site::new("registry.rs", 1, label)
    }

    #[test]
    fn test_nesting_counter() {
        let mut nesting = Nesting::default();
        assert_eq!(nesting.enter(), 0);
        assert_eq!(nesting.enter(), 1);
        assert_eq!(nesting.level(), 2);

        nesting.leave();
        nesting.leave();
        nesting.leave();
        assert_eq!(nesting.level(), 0);
    }

    #[test]
    fn test_registry_nesting_accessors() {
        let mut registry = Registry::new();
        assert_eq!(registry.enter_nesting(), 0);
        assert_eq!(registry.enter_nesting(), 1);
        registry.leave_nesting();
        assert_eq!(registry.nesting(), 1);
    }

    #[test]
    fn test_lookup_or_register_reuses_timer() {
        let mut registry = Registry::new();
        let a = registry.lookup_or_register(site("a"));
        let b = registry.lookup_or_register(site("b"));
        let a_again = registry.lookup_or_register(site("a"));

        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(&site("b")), Some(b));
        assert_eq!(registry.lookup(&site("c")), None);
    }

    #[test]
    fn test_register_twice_returns_existing() {
        let mut registry = Registry::new();
        let first = registry.register(site("dup"));
        let second = registry.register(site("dup"));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ordered_timers_follow_registration() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        for label in ["main", "outer", "inner"] {
            registry.lookup_or_register(site(label));
        }

        let labels: Vec<_> = registry.ordered_timers().iter().map(Timer::label).collect();
        assert_eq!(labels, vec!["main", "outer", "inner"]);
    }

    #[test]
    fn test_foreign_timer_id_is_ignored() {
        let mut other = Registry::new();
        other.lookup_or_register(site("x"));
        let foreign = other.lookup_or_register(site("y"));

        let mut registry = Registry::new();
        registry.lookup_or_register(site("only"));
        let t0 = Instant::now();
        registry.enter(foreign, t0);
        registry.leave(foreign, t0 + Duration::from_micros(1));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.nesting(), 0);
        assert_eq!(registry.ordered_timers()[0].calls(), 0);
    }

    #[test]
    fn test_enter_leave_through_registry() {
        let mut registry = Registry::new();
        let outer = registry.lookup_or_register(site("outer"));
        let inner = registry.lookup_or_register(site("inner"));
        let t0 = Instant::now();

        registry.enter(outer, t0);
        registry.enter(inner, t0 + Duration::from_micros(5));
        assert_eq!(registry.nesting(), 2);
        registry.leave(inner, t0 + Duration::from_micros(15));
        registry.leave(outer, t0 + Duration::from_micros(20));
        assert_eq!(registry.nesting(), 0);

        let outer = registry.timer(outer).unwrap();
        let inner = registry.timer(inner).unwrap();
        assert_eq!(outer.total_time(), Duration::from_micros(20));
        assert_eq!(inner.total_time(), Duration::from_micros(10));
        assert_eq!(inner.indent_level(), outer.indent_level() + 1);
    }
}
