// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scoped Profiler
//!
//! Lightweight in-process instrumentation that measures wall-clock time spent
//! inside scoped regions ("sites"), aggregates call counts and total elapsed
//! time per site, and renders a tabular report on demand.
//!
//! ## Overview
//!
//! - One [`Timer`] per [`Site`] (source file, line, label)
//! - Recursion-aware accounting: reentrant activations never double-count
//!   overlapping intervals
//! - Presentation nesting levels fixed at each site's first activation
//! - Rows reported in first-activation order
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Host code (call sites)     │
//! └──────────────┬───────────────┘
//!                │ profile_scope! / Profiler::scope
//!                ↓
//! ┌──────────────────────────────┐
//! │        ScopedGuard           │  enter() on creation
//! │                              │  leave() once on stop/drop
//! └──────────────┬───────────────┘
//!                ↓
//! ┌──────────────────────────────┐      ┌──────────────┐
//! │   Profiler (host context)    │─────→│    Clock     │
//! │  ┌────────────────────────┐  │      └──────────────┘
//! │  │ Registry               │  │
//! │  │  • Timer per Site      │  │
//! │  │  • nesting counter     │  │
//! │  └────────────────────────┘  │
//! └──────────────┬───────────────┘
//!                ↓
//! ┌──────────────────────────────┐
//! │      Report (Display)        │
//! └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use scoped_profiler::{Profiler, profile_scope};
//!
//! fn work(profiler: &Profiler) -> u64 {
//!     let _guard = profile_scope!(profiler);
//!     (0..1_000u64).sum()
//! }
//!
//! let profiler = Profiler::new();
//! {
//!     let mut guard = profile_scope!(&profiler, "setup");
//!     work(&profiler);
//!     guard.stop();
//! }
//! print!("{}", profiler.report());
//! ```
//!
//! ## Threading
//!
//! A [`Profiler`] is meant for a single thread. It relies on `RefCell`
//! interior mutability, so it is `!Sync` and cannot be shared across threads.

pub mod clock;
pub mod error;
pub mod guard;
mod macros;
pub mod profiler;
pub mod registry;
pub mod report;
pub mod site;
pub mod timer;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{ProfilerError, ProfilerResult};
pub use guard::ScopedGuard;
#[doc(hidden)]
pub use macros::clean_function_name;
pub use profiler::Profiler;
pub use registry::{Nesting, Registry};
pub use report::{
    DEFAULT_NAME_WIDTH, Report, ReportOptions, ReportRow, TimeUnit, format_duration, format_time,
};
pub use site::Site;
pub use timer::{Timer, TimerId};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
