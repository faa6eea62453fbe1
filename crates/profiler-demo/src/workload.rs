// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Instrumented demo workloads
//!
//! Each routine exercises one accounting path of the profiler:
//! nested loops, early stop, self recursion and mutual recursion.

use std::thread::sleep;
use std::time::Duration;

use scoped_profiler::{Clock, Profiler, profile_scope};

use crate::config::DemoConfig;

/// Upper bound for the sleeps in [`bar`]
const MAX_BAR_DELAY: Duration = Duration::from_secs(1);

/// CPU-bound loop with a tight instrumented inner scope
pub fn foo<C: Clock>(profiler: &Profiler<C>, m: u32, config: &DemoConfig) -> f64 {
    let _guard = profile_scope!(profiler);

    let m = f64::from(m);
    let mut sum = 0.0;
    for i in 0..config.foo_iterations {
        let i = f64::from(i);
        sum += (42.0 * m * i * i).cos();
    }
    for _ in 0..config.nop_iterations {
        let _nop = profile_scope!(profiler, "nop");
    }
    sum.abs()
}

/// Sleep twice, measuring only the first sleep
pub fn bar<C: Clock>(profiler: &Profiler<C>, delay: Duration) {
    let mut guard = profile_scope!(profiler);
    let delay = delay.min(MAX_BAR_DELAY);
    tracing::info!(delay_us = delay.as_micros() as u64, "bar sleeping twice");

    sleep(delay);
    guard.stop();
    sleep(delay);
}

/// Doubly recursive Fibonacci with a 1ms sleep per call
pub fn fibb<C: Clock>(profiler: &Profiler<C>, n: u32) -> u64 {
    let _guard = profile_scope!(profiler);
    sleep(Duration::from_millis(1));
    if n <= 1 {
        return 1;
    }
    fibb(profiler, n - 1) + fibb(profiler, n - 2)
}

/// First half of a mutually recursive pair
pub fn rec1<C: Clock>(profiler: &Profiler<C>, n: u32) -> u64 {
    let _guard = profile_scope!(profiler);
    sleep(Duration::from_micros(100));
    if n <= 1 {
        return 1;
    }
    rec1(profiler, n - 1) + rec2(profiler, n - 2)
}

/// Second half of a mutually recursive pair
pub fn rec2<C: Clock>(profiler: &Profiler<C>, n: u32) -> u64 {
    let _guard = profile_scope!(profiler);
    sleep(Duration::from_micros(100));
    if n <= 1 {
        return u64::from(n) + 1;
    }
    rec2(profiler, n - 1) + rec1(profiler, n - 2)
}

/// Run every workload under its own labelled scope
pub fn run_all<C: Clock>(profiler: &Profiler<C>, config: &DemoConfig) {
    let mut total = 0.0;
    {
        let _guard = profile_scope!(profiler, "foo for loop");
        for m in 1..=config.foo_rounds {
            total += foo(profiler, m, config);
        }
    }
    tracing::debug!(total, "foo rounds finished");

    {
        let _guard = profile_scope!(profiler, "bar wait");
        bar(profiler, Duration::from_secs_f64(10.0 * total * 1e-6));
    }

    {
        let _guard = profile_scope!(profiler, "fibb");
        let value = fibb(profiler, config.fibb_n);
        tracing::debug!(n = config.fibb_n, value, "fibb finished");
    }

    {
        let _guard = profile_scope!(profiler, "rec1 + rec2");
        let value = rec1(profiler, config.rec_n);
        tracing::debug!(n = config.rec_n, value, "rec1 finished");
    }
}
