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

//! `compare` command.

use super::{load_inputs, policy_label, write_output};
use crate::cli::CommonArgs;
use crate::error::Result;
use benchgate::report::{ConsoleOptions, Report, ReportFormat};
use benchgate::{load_policy, Gate, GateOutcome, Locator, ThresholdPolicy};
use tracing::{debug, info};

/// Flags specific to `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompareOptions {
    /// Fail on any REGRESSION or CRITICAL verdict.
    pub fail_on_regression: bool,
    /// Replacement default regression threshold, in percent.
    pub threshold: Option<u32>,
    /// Emit markdown.
    pub markdown: bool,
    /// Emit a receipt.
    pub receipt: bool,
}

impl CompareOptions {
    fn format(&self, color: bool) -> ReportFormat {
        if self.receipt {
            ReportFormat::Receipt
        } else if self.markdown {
            ReportFormat::Markdown
        } else {
            ReportFormat::Console(ConsoleOptions {
                color,
                critical_gated: self.fail_on_regression,
            })
        }
    }
}

/// Compares current results against the baseline.
///
/// The policy file is optional: an explicit `--config` must exist, but a
/// missing conventional policy falls back to built-in thresholds.
pub fn compare(common: &CommonArgs, options: &CompareOptions) -> Result<GateOutcome> {
    let locator = Locator::new(common.root.clone());
    let policy_path = locator.policy(common.config.as_deref());

    let (mut policy, source) = if common.config.is_some() || policy_path.is_file() {
        let policy = load_policy(&policy_path)?;
        debug!(path = %policy_path.display(), "loaded policy");
        (policy, Some(policy_label(&locator, &policy_path)))
    } else {
        info!("no policy file; using built-in thresholds");
        (ThresholdPolicy::default(), None)
    };
    if let Some(pct) = options.threshold {
        policy = policy.with_regression_threshold(f64::from(pct));
    }

    let inputs = load_inputs(&locator, common)?;
    let mut report = Report::build(&inputs.baseline, &inputs.current, &policy);
    if let Some(source) = source {
        report = report.with_policy_source(source);
    }

    let rendered = options.format(!common.no_color).render(&report);
    write_output(&rendered, common.output.as_deref())?;

    let gate = Gate::Compare {
        fail_on_regression: options.fail_on_regression,
    };
    Ok(gate.evaluate(&report.comparison.counters))
}
