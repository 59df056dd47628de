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

//! Benchgate command line interface

use benchgate::GateOutcome;
use benchgate_cli::cli::Commands;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Benchgate - benchmark regression gate
///
/// Compares a benchmark run against a baseline, classifies each change
/// against a threshold policy, and reports the result for a terminal, a
/// pull request, or an audit trail.
///
/// # Examples
///
/// ```bash
/// # Alert report using the conventional paths
/// benchgate alert --check
///
/// # PR comment from explicit files
/// benchgate alert base.json latest.json -c thresholds.yaml -f markdown
///
/// # Fail CI on any regression above 15%
/// benchgate compare -f -t 15
/// ```
#[derive(Parser)]
#[command(name = "benchgate")]
#[command(author, version, about = "Benchgate - benchmark regression gate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("benchgate=warn".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(GateOutcome::Pass) => ExitCode::SUCCESS,
        Ok(GateOutcome::Fail(reason)) => {
            eprintln!("Gate failed: {}", reason);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
