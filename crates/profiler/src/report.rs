// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Report formatting
//!
//! Renders the registry's timers as a fixed-width table, one row per site in
//! first-activation order:
//!
//! ```text
//!
//! function<padded to name_width>line	calls	   tottime	avgtime
//!
//! <indent><label>.......... 12       1           2.00ms     2.00ms
//! ```
//!
//! Times use the coarsest unit in which the value is still at least one:
//! nanoseconds below 1µs, microseconds below 1ms, milliseconds below 1s,
//! seconds otherwise.

use std::fmt;
use std::time::Duration;

use crate::timer::Timer;

/// Default width of the function column
pub const DEFAULT_NAME_WIDTH: usize = 120;

/// Layout options for a [`Report`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Width of the function column; labels are dot-filled up to it
    pub name_width: usize,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_width(mut self, name_width: usize) -> Self {
        self.name_width = name_width;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            name_width: DEFAULT_NAME_WIDTH,
        }
    }
}

/// Unit used to display a time value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
}

impl TimeUnit {
    /// Pick the unit for a value given in seconds
    pub fn for_seconds(secs: f64) -> Self {
        if secs < 1e-6 {
            TimeUnit::Nanos
        } else if secs < 1e-3 {
            TimeUnit::Micros
        } else if secs < 1.0 {
            TimeUnit::Millis
        } else {
            TimeUnit::Seconds
        }
    }

    /// Factor converting seconds to this unit
    pub fn scale(self) -> f64 {
        match self {
            TimeUnit::Nanos => 1e9,
            TimeUnit::Micros => 1e6,
            TimeUnit::Millis => 1e3,
            TimeUnit::Seconds => 1.0,
        }
    }

    /// Two-character suffix; seconds are padded with a space
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s ",
        }
    }
}

/// Format a time in seconds as `%8.2f` plus unit suffix
///
/// ```rust
/// use scoped_profiler::format_time;
///
/// assert_eq!(format_time(0.002), "    2.00ms");
/// assert_eq!(format_time(3.5), "    3.50s ");
/// ```
pub fn format_time(secs: f64) -> String {
    let unit = TimeUnit::for_seconds(secs);
    format!("{:8.2}{}", secs * unit.scale(), unit.suffix())
}

pub fn format_duration(duration: Duration) -> String {
    format_time(duration.as_secs_f64())
}

/// One rendered line of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub indent_level: usize,
    pub label: String,
    pub line: u32,
    pub calls: u64,
    pub total_time: Duration,
    /// Average per call in seconds
    pub average_secs: f64,
}

impl ReportRow {
    pub fn from_timer(timer: &Timer) -> Self {
        Self {
            indent_level: timer.indent_level(),
            label: timer.label().to_string(),
            line: timer.line(),
            calls: timer.calls(),
            total_time: timer.total_time(),
            average_secs: timer.average_secs(),
        }
    }
}

/// Snapshot of all timers, renderable through [`Display`](fmt::Display)
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<ReportRow>,
    options: ReportOptions,
}

impl Report {
    /// Build a report from timers already in first-activation order
    pub fn from_timers(timers: &[Timer], options: ReportOptions) -> Self {
        tracing::debug!(sites = timers.len(), "Building profiling report");
        Self {
            rows: timers.iter().map(ReportRow::from_timer).collect(),
            options,
        }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.options.name_width;

        writeln!(f)?;
        writeln!(f, "{:<width$}line\tcalls\t   tottime\tavgtime", "function")?;
        writeln!(f)?;

        for row in &self.rows {
            let name = format!("{:indent$}{}", "", row.label, indent = row.indent_level);
            writeln!(
                f,
                "{:.<width$} {:<8} {:<8} {} {}",
                name,
                row.line,
                row.calls,
                format_duration(row.total_time),
                format_time(row.average_secs),
            )?;
        }

        Ok(())
    }
}
