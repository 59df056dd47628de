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

//! Exit-code gating.
//!
//! Each CLI mode has its own rule for turning counters into an exit code.
//! MISSING benchmarks never trip a gate in either mode.

use crate::compare::Counters;

/// Gate rule for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Alert mode: fail on CRITICAL only when both `--check` and the
    /// policy's `fail_on_critical` are set.
    Alert {
        /// `--check` was given.
        check: bool,
        /// Policy `alerting.fail_on_critical`.
        fail_on_critical: bool,
    },
    /// Comparison mode: fail on any REGRESSION or CRITICAL when
    /// `--fail-on-regression` is set.
    Compare {
        /// `--fail-on-regression` was given.
        fail_on_regression: bool,
    },
}

/// Result of evaluating a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Nothing gated.
    Pass,
    /// Gate tripped, with a human-readable reason.
    Fail(String),
}

impl GateOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            GateOutcome::Pass => 0,
            GateOutcome::Fail(_) => 1,
        }
    }

    /// Returns true if the gate passed.
    pub fn passed(&self) -> bool {
        matches!(self, GateOutcome::Pass)
    }
}

impl Gate {
    /// Evaluates the gate against comparison counters.
    pub fn evaluate(&self, counters: &Counters) -> GateOutcome {
        match *self {
            Gate::Alert {
                check,
                fail_on_critical,
            } => {
                if check && fail_on_critical && counters.critical > 0 {
                    GateOutcome::Fail(format!(
                        "{} benchmark(s) exceed the critical threshold",
                        counters.critical
                    ))
                } else {
                    GateOutcome::Pass
                }
            }
            Gate::Compare { fail_on_regression } => {
                let regressed = counters.regressions + counters.critical;
                if fail_on_regression && regressed > 0 {
                    GateOutcome::Fail(format!("{} benchmark(s) regressed", regressed))
                } else {
                    GateOutcome::Pass
                }
            }
        }
    }
}
