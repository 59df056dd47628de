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

//! Input discovery and reading.
//!
//! Resolves the baseline, current results, and policy file against a
//! repository root using the conventional benchmark layout, and reads JSON
//! inputs with a size ceiling.

use crate::error::{GateError, Result};
use crate::extract::extract;
use crate::measurement::Snapshot;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory holding baseline snapshots, relative to the root.
pub const BASELINES_DIR: &str = "benchmarks/baselines";
/// Conventional current-results file, relative to the root.
pub const CURRENT_RESULTS: &str = "benchmarks/results/latest.json";
/// Conventional policy file, relative to the root.
pub const POLICY_FILE: &str = ".ci/benchmark-thresholds.yaml";

/// Environment variable overriding the maximum input size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "BENCHGATE_MAX_FILE_SIZE";
/// Default maximum input size (256 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Resolves inputs relative to a repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    root: PathBuf,
}

impl Locator {
    /// Locator rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The baseline snapshot to compare against.
    ///
    /// An explicit path is used as given. Otherwise the newest baseline is
    /// the `*.json` file in the baselines directory whose name sorts last.
    ///
    /// # Errors
    ///
    /// Returns `GateError::NoBaseline` when the directory is missing or
    /// holds no JSON files.
    pub fn baseline(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let dir = self.root.join(BASELINES_DIR);
        let entries = fs::read_dir(&dir).map_err(|_| GateError::NoBaseline { dir: dir.clone() })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "json"))
            .collect();
        candidates.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        let chosen = candidates
            .into_iter()
            .next()
            .ok_or(GateError::NoBaseline { dir })?;
        info!(path = %chosen.display(), "using latest baseline");
        Ok(chosen)
    }

    /// The current results file.
    pub fn current(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.root.join(CURRENT_RESULTS),
        }
    }

    /// The policy file. Relative explicit paths resolve against the root.
    pub fn policy(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.root.join(path),
            None => self.root.join(POLICY_FILE),
        }
    }
}

fn max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Reads and parses a JSON input file.
///
/// # Errors
///
/// - `GateError::Io` if the file cannot be read
/// - `GateError::FileTooLarge` if it exceeds `BENCHGATE_MAX_FILE_SIZE`
/// - `GateError::MalformedInput` if it is not valid JSON
pub fn read_input(path: &Path) -> Result<Value> {
    read_input_limited(path, max_file_size())
}

fn read_input_limited(path: &Path, max: u64) -> Result<Value> {
    let metadata = fs::metadata(path).map_err(|e| GateError::io_error(path, e))?;
    if metadata.len() > max {
        return Err(GateError::file_too_large(path, metadata.len(), max));
    }

    let content = fs::read_to_string(path).map_err(|e| GateError::io_error(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "read input");
    serde_json::from_str(&content).map_err(|e| GateError::malformed(path, &e))
}

/// Reads a results file and extracts its snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let doc = read_input(path)?;
    Ok(extract(&doc))
}
