// Dweve Benchgate - Benchmark Regression Gate
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for benchmark comparison.
//!
//! File-level problems (unreadable inputs, malformed JSON, a missing policy
//! document, an empty baselines directory) are fatal and surface as
//! [`GateError`]. Benchmark-level anomalies never do: they are folded into
//! the verdict stream by the comparator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for benchgate operations
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors that stop a run before any comparison work begins.
///
/// # Examples
///
/// ```rust,no_run
/// use benchgate::error::GateError;
///
/// fn read(path: &str) -> Result<String, GateError> {
///     std::fs::read_to_string(path).map_err(|e| GateError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    /// I/O operation failed (file read, write, or directory listing).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Input file exceeds the configured size limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The offending path
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// A result file is not valid JSON.
    #[error("Malformed input '{path}': {message}")]
    MalformedInput {
        /// The offending path
        path: PathBuf,
        /// Parser error message
        message: String,
    },

    /// The threshold policy document could not be parsed.
    #[error("Failed to parse threshold policy '{source_name}': {message}")]
    PolicyParse {
        /// File path or other description of the document
        source_name: String,
        /// Parser error message
        message: String,
    },

    /// The threshold policy parsed but holds unusable values.
    #[error("Invalid threshold policy: {0}")]
    InvalidPolicy(String),

    /// The threshold policy file does not exist.
    #[error("Config file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// No baseline could be located.
    #[error("No baseline file found in '{dir}'")]
    NoBaseline {
        /// Baselines directory that was searched
        dir: PathBuf,
    },

    /// Invalid input provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GateError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
        }
    }

    /// Create a malformed-input error from a JSON parse failure.
    pub fn malformed(path: impl Into<PathBuf>, source: &serde_json::Error) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a policy parse error.
    pub fn policy_parse(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::PolicyParse {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Returns true for errors caused by configuration rather than input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GateError::PolicyParse { .. }
                | GateError::InvalidPolicy(_)
                | GateError::ConfigNotFound { .. }
                | GateError::NoBaseline { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = GateError::io_error(
            "latest.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("latest.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_no_baseline_display() {
        let err = GateError::NoBaseline {
            dir: PathBuf::from("benchmarks/baselines"),
        };
        assert_eq!(
            err.to_string(),
            "No baseline file found in 'benchmarks/baselines'"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_malformed_input_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GateError::malformed("current.json", &json_err);
        assert!(err.to_string().starts_with("Malformed input 'current.json'"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_file_too_large_display() {
        let err = GateError::file_too_large("big.json", 2_000, 1_000);
        let msg = err.to_string();
        assert!(msg.contains("2000 bytes"));
        assert!(msg.contains("1000 bytes"));
    }

    #[test]
    fn test_error_cloning() {
        let err = GateError::invalid_input("bad threshold");
        assert_eq!(err.clone(), err);
    }
}
