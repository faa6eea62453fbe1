// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Demo program for scoped-profiler
//!
//! Runs the instrumented workloads and prints the profiling report to stdout.
//! Logs go to stderr and are controlled with `RUST_LOG`.

mod config;
mod workload;

use std::io::{self, Write};

use anyhow::Context;
use scoped_profiler::{Profiler, profile_scope};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = DemoConfig::from_env().context("Invalid demo configuration")?;
    tracing::info!(?config, "Starting scoped-profiler demo");

    let profiler = Profiler::new();
    {
        let mut guard = profile_scope!(&profiler);
        workload::run_all(&profiler, &config);
        // finalize main before reporting
        guard.stop();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    profiler
        .write_report(&mut out)
        .context("Failed to write profiling report")?;
    writeln!(out)?;

    tracing::info!(sites = profiler.len(), "Demo finished");
    Ok(())
}
