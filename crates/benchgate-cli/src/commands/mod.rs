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

//! Command implementations.
//!
//! Each command resolves its inputs through a [`Locator`], builds one
//! [`Report`], renders it, writes it, and hands the gate outcome back to
//! `main`.

mod alert;
mod compare;

pub use alert::alert;
pub use compare::{compare, CompareOptions};

use crate::cli::CommonArgs;
use crate::error::{CliError, Result};
use benchgate::{load_snapshot, Locator, Snapshot};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Baseline and current snapshots for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    /// Baseline snapshot.
    pub baseline: Snapshot,
    /// Current snapshot.
    pub current: Snapshot,
}

/// Locates and reads both snapshots. Fails before any comparison work if
/// either file is missing or malformed.
pub fn load_inputs(locator: &Locator, common: &CommonArgs) -> Result<Inputs> {
    let baseline_path = locator.baseline(common.baseline.as_deref())?;
    let current_path = locator.current(common.current.as_deref());
    info!(
        baseline = %baseline_path.display(),
        current = %current_path.display(),
        "comparing"
    );

    Ok(Inputs {
        baseline: load_snapshot(&baseline_path)?,
        current: load_snapshot(&current_path)?,
    })
}

/// Label for a policy file in report footers: relative to the root when
/// possible.
pub fn policy_label(locator: &Locator, path: &Path) -> String {
    path.strip_prefix(locator.root())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Writes content to a file or stdout.
///
/// # Errors
///
/// Returns `CliError::Output` if the file cannot be written or stdout is
/// closed.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::output(p, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::output(PathBuf::from("<stdout>"), e))
        }
    }
}
