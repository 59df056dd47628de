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

//! Fixed-width audit receipt.
//!
//! The receipt records what was measured in the current run and how it was
//! classified. It is an audit artifact: it always ends with
//! `STATUS: COMPLETE`, whatever the verdicts say.

use super::{baseline_label, Report};
use crate::format::{format_duration, short_sha};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// Total receipt width in columns.
pub const RECEIPT_WIDTH: usize = 72;

const NAME_WIDTH: usize = 40;
const MEAN_WIDTH: usize = 12;
const VERDICT_WIDTH: usize = 12;

/// Renders receipts stamped with a fixed generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptRenderer {
    generated_at: DateTime<Utc>,
}

impl ReceiptRenderer {
    /// Renderer stamped with the given time.
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }

    /// Renderer stamped with the current wall-clock time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Run identifier derived from the generation time.
    pub fn run_id(&self) -> String {
        format!("BG-{}", self.generated_at.format("%Y%m%d-%H%M%S"))
    }

    /// Renders the receipt.
    pub fn render(&self, report: &Report) -> String {
        let heavy = "=".repeat(RECEIPT_WIDTH);
        let light = "-".repeat(RECEIPT_WIDTH);
        let counters = &report.comparison.counters;
        let mut out = String::new();

        out.push_str(&format!("{heavy}\n"));
        out.push_str(&format!("{:^width$}\n", "BENCHMARK RECEIPT", width = RECEIPT_WIDTH));
        out.push_str(&format!("{heavy}\n"));
        out.push_str(&format!("RUN ID:     {}\n", self.run_id()));
        out.push_str(&format!(
            "GENERATED:  {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        out.push_str(&format!(
            "BASELINE:   {}  {}\n",
            baseline_label(&report.baseline),
            report.baseline.date
        ));
        out.push_str(&format!(
            "CURRENT:    {}  {}\n",
            short_sha(&report.current.git_sha),
            report.current.date
        ));
        out.push_str(&format!("{light}\n"));
        out.push_str(&ledger_row("BENCHMARK", "MEAN", "VERDICT", "TARGET"));
        out.push_str(&format!("{light}\n"));

        // benchmarks never compared (current-only, exempt) show "-"
        let verdicts: HashMap<(&str, &str), &str> = report
            .comparison
            .verdicts
            .iter()
            .chain(&report.comparison.unchanged)
            .map(|v| ((v.category.as_str(), v.name.as_str()), v.status.label()))
            .collect();

        if report.current_results.is_empty() {
            out.push_str("  (no measurements)\n");
        }
        for (category, name, measurement) in report.current_results.iter() {
            let mean = measurement
                .display
                .clone()
                .unwrap_or_else(|| format_duration(measurement.mean_ns));
            let verdict = verdicts.get(&(category, name)).copied().unwrap_or("-");
            let target = match measurement.meets_target {
                Some(true) => "[PASS]",
                Some(false) => "[FAIL]",
                None => "",
            };
            out.push_str(&ledger_row(
                &fit(&format!("{category}/{name}"), NAME_WIDTH - 1),
                &fit(&mean, MEAN_WIDTH - 1),
                verdict,
                target,
            ));
        }

        out.push_str(&format!("{light}\nVERDICTS\n"));
        for (label, count) in [
            ("CRITICAL", counters.critical),
            ("REGRESSION", counters.regressions),
            ("WARNING", counters.warnings),
            ("IMPROVED", counters.improvements),
            ("OK", counters.unchanged),
            ("MISSING", counters.missing),
        ] {
            out.push_str(&format!("  {:<14}{:>6}\n", label, count));
        }
        out.push_str(&format!("{heavy}\n"));
        out.push_str("STATUS: COMPLETE\n");
        out
    }
}

fn ledger_row(name: &str, mean: &str, verdict: &str, target: &str) -> String {
    format!(
        "{:<nw$}{:>mw$}{:>vw$}{:>8}\n",
        name,
        mean,
        verdict,
        target,
        nw = NAME_WIDTH,
        mw = MEAN_WIDTH,
        vw = VERDICT_WIDTH
    )
}

/// Truncates `text` to at most `width` characters, marking the cut with `~`.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
