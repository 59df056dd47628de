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

//! Command definitions and argument parsing.
//!
//! - `alert`: policy-driven alert report with an optional critical gate
//! - `compare`: baseline comparison with an optional regression gate

use crate::commands;
use crate::error::Result;
use benchgate::GateOutcome;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Options shared by every command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// Baseline results file (defaults to the newest file in benchmarks/baselines/)
    #[arg(value_name = "BASELINE")]
    pub baseline: Option<PathBuf>,

    /// Current results file (defaults to benchmarks/results/latest.json)
    #[arg(value_name = "CURRENT")]
    pub current: Option<PathBuf>,

    /// Repository root used to resolve default paths
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Threshold policy file (defaults to .ci/benchmark-thresholds.yaml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable ANSI colours in terminal output
    #[arg(long)]
    pub no_color: bool,
}

/// Output format of the `alert` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertFormat {
    /// Plain-text terminal report
    #[default]
    Terminal,
    /// PR-comment markdown
    Markdown,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Report performance alerts against the threshold policy
    ///
    /// Requires a policy file. With --check, exits 1 when a CRITICAL
    /// verdict exists and the policy sets alerting.fail_on_critical.
    Alert {
        #[command(flatten)]
        common: CommonArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = AlertFormat::Terminal)]
        format: AlertFormat,

        /// Gate on CRITICAL verdicts when the policy requests it
        #[arg(long)]
        check: bool,
    },

    /// Compare current results against a baseline
    ///
    /// The policy file is optional; built-in thresholds apply without one.
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Exit 1 on any REGRESSION or CRITICAL verdict
        #[arg(short = 'f', long)]
        fail_on_regression: bool,

        /// Regression threshold in percent (replaces the policy default)
        #[arg(short, long, value_name = "PCT")]
        threshold: Option<u32>,

        /// Emit PR-comment markdown
        #[arg(short, long, conflicts_with = "receipt")]
        markdown: bool,

        /// Emit a fixed-width audit receipt
        #[arg(short, long)]
        receipt: bool,
    },
}

impl Commands {
    /// Runs the command and returns the gate outcome.
    ///
    /// The report is written before the outcome is returned, so a failing
    /// gate still produces full output.
    ///
    /// # Errors
    ///
    /// Returns `Err` for missing or malformed inputs, an unusable policy, or
    /// a failed write.
    pub fn execute(self) -> Result<GateOutcome> {
        match self {
            Commands::Alert {
                common,
                format,
                check,
            } => commands::alert(&common, format, check),
            Commands::Compare {
                common,
                fail_on_regression,
                threshold,
                markdown,
                receipt,
            } => commands::compare(
                &common,
                &commands::CompareOptions {
                    fail_on_regression,
                    threshold,
                    markdown,
                    receipt,
                },
            ),
        }
    }
}
