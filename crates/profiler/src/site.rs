// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Identity of an instrumented region.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Immutable identity of an instrumented region
///
/// Two activations belong to the same [`Timer`](crate::Timer) exactly when
/// their sites compare equal, so the label is part of the key: two guards on
/// the same line with different labels are different sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Site {
    file: &'static str,
    line: u32,
    label: Cow<'static, str>,
}

impl Site {
    /// Create a site from explicit source metadata
    pub fn new(file: &'static str, line: u32, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            file,
            line,
            label: label.into(),
        }
    }

    /// Create a site located at the caller
    ///
    /// ```rust
    /// use scoped_profiler::Site;
    ///
    /// let site = Site::caller("parse");
    /// assert_eq!(site.file(), file!());
    /// assert_eq!(site.label(), "parse");
    /// ```
    #[track_caller]
    pub fn caller(label: impl Into<Cow<'static, str>>) -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), label)
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.label, self.file, self.line)
    }
}
