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

//! `alert` command.

use super::{load_inputs, policy_label, write_output};
use crate::cli::{AlertFormat, CommonArgs};
use crate::error::Result;
use benchgate::report::{ConsoleOptions, Report, ReportFormat};
use benchgate::{load_policy, Gate, GateOutcome, Locator};
use tracing::debug;

/// Renders the alert report under the policy file, which must exist.
///
/// With `check`, the outcome fails when a CRITICAL verdict exists and the
/// policy sets `alerting.fail_on_critical`.
pub fn alert(common: &CommonArgs, format: AlertFormat, check: bool) -> Result<GateOutcome> {
    let locator = Locator::new(common.root.clone());
    let policy_path = locator.policy(common.config.as_deref());
    let policy = load_policy(&policy_path)?;
    debug!(path = %policy_path.display(), "loaded policy");

    let inputs = load_inputs(&locator, common)?;
    let report = Report::build(&inputs.baseline, &inputs.current, &policy)
        .with_policy_source(policy_label(&locator, &policy_path));

    let gate = Gate::Alert {
        check,
        fail_on_critical: policy.alerting.fail_on_critical,
    };
    let format = match format {
        AlertFormat::Terminal => ReportFormat::Console(ConsoleOptions {
            color: !common.no_color,
            critical_gated: check && policy.alerting.fail_on_critical,
        }),
        AlertFormat::Markdown => ReportFormat::Markdown,
    };
    write_output(&format.render(&report), common.output.as_deref())?;

    Ok(gate.evaluate(&report.comparison.counters))
}
