// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for profiler operations
//!
//! Measurement itself never fails. The only fallible operations are the ones
//! that hand the rendered report to a caller-supplied sink.

use thiserror::Error;

/// Result type alias for profiler operations
pub type ProfilerResult<T> = Result<T, ProfilerError>;

/// Errors that can occur while emitting a profiling report
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// Writing the report to an I/O sink failed
    #[error("Failed to write profiling report: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the report to a formatting sink failed
    #[error("Failed to format profiling report")]
    Fmt(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: ProfilerError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(
            err.to_string(),
            "Failed to write profiling report: pipe closed"
        );
    }

    #[test]
    fn test_fmt_error_conversion() {
        let err: ProfilerError = std::fmt::Error.into();
        assert!(matches!(err, ProfilerError::Fmt(_)));
    }
}
