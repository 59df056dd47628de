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

//! Report rendering.
//!
//! All renderers consume one canonical [`Report`] and return plain text;
//! none of them performs I/O or holds state between calls.
//!
//! # Modules
//!
//! - `console`: aligned terminal report with summary block
//! - `markdown`: PR-comment tables grouped by severity tier
//! - `receipt`: fixed-width audit ledger

pub mod console;
pub mod markdown;
pub mod receipt;

pub use console::{render_console, ConsoleOptions};
pub use markdown::render_markdown;
pub use receipt::ReceiptRenderer;

use crate::compare::{compare, Comparison};
use crate::format::short_sha;
use crate::measurement::{ResultSet, RunMetadata, Snapshot, UNKNOWN};
use crate::policy::ThresholdPolicy;

/// Everything a renderer needs about one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Baseline run identity.
    pub baseline: RunMetadata,
    /// Current run identity.
    pub current: RunMetadata,
    /// Classified verdicts and counters.
    pub comparison: Comparison,
    /// Current measurements, for ledger-style output.
    pub current_results: ResultSet,
    /// Where the thresholds came from, if a policy file was used.
    pub policy_source: Option<String>,
}

impl Report {
    /// Compares two snapshots under a policy and wraps the result.
    pub fn build(baseline: &Snapshot, current: &Snapshot, policy: &ThresholdPolicy) -> Self {
        Self {
            baseline: baseline.metadata.clone(),
            current: current.metadata.clone(),
            comparison: compare(&baseline.results, &current.results, policy),
            current_results: current.results.clone(),
            policy_source: None,
        }
    }

    /// Records the policy file the thresholds were read from.
    pub fn with_policy_source(mut self, source: impl Into<String>) -> Self {
        self.policy_source = Some(source.into());
        self
    }
}

/// The closed set of output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Terminal report.
    Console(ConsoleOptions),
    /// PR-comment markdown.
    Markdown,
    /// Audit receipt stamped with the current time.
    Receipt,
}

impl ReportFormat {
    /// Renders a report in this format.
    pub fn render(&self, report: &Report) -> String {
        match self {
            ReportFormat::Console(options) => render_console(report, options),
            ReportFormat::Markdown => render_markdown(report),
            ReportFormat::Receipt => ReceiptRenderer::now().render(report),
        }
    }
}

/// `v1.2.0 (0123abcd)` style identity for the baseline side.
pub(crate) fn baseline_label(meta: &RunMetadata) -> String {
    format!("{} ({})", version_label(&meta.version), short_sha(&meta.git_sha))
}

fn version_label(version: &str) -> String {
    if version == UNKNOWN || version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{}", version)
    }
}
