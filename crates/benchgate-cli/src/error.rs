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

//! Error type for the benchgate CLI.

use benchgate::GateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by CLI commands.
///
/// Every variant maps to exit code 1; the message is printed as
/// `Error: {message}` on stderr.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// Failure inside the comparison library (inputs, policy, locating).
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Writing the rendered report failed.
    #[error("Failed to write report to '{path}': {message}")]
    Output {
        /// Destination path, or `<stdout>`
        path: PathBuf,
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an output error.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
