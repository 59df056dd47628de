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

//! Console reporter.
//!
//! Groups verdicts by category and prints one aligned line per verdict,
//! followed by a summary block.

use super::{baseline_label, Report};
use crate::compare::{Status, Verdict};
use crate::format::{format_duration, format_pct, short_sha};
use colored::{Color, Colorize};

/// Console rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Emit ANSI colours.
    pub color: bool,
    /// Whether CRITICAL verdicts fail this run. When false the closing line
    /// reports them as not gated.
    pub critical_gated: bool,
}

impl ConsoleOptions {
    /// Options without colour, for files and pipes.
    pub fn plain() -> Self {
        Self {
            color: false,
            critical_gated: true,
        }
    }

    /// Options with colour.
    pub fn colored() -> Self {
        Self {
            color: true,
            critical_gated: true,
        }
    }

    /// Sets whether CRITICAL verdicts are gated.
    pub fn gated(mut self, critical_gated: bool) -> Self {
        self.critical_gated = critical_gated;
        self
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::colored()
    }
}

const RULE_WIDTH: usize = 40;

/// Renders the console report.
pub fn render_console(report: &Report, options: &ConsoleOptions) -> String {
    let paint = |text: &str, color: Color| -> String {
        if options.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    };
    let rule = paint(&"=".repeat(RULE_WIDTH), Color::Blue);
    let counters = &report.comparison.counters;
    let mut out = String::new();

    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("{}\n", paint("Performance Regression Alert", Color::Blue)));
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!("Baseline: {}\n", baseline_label(&report.baseline)));
    out.push_str(&format!("Current:  {}\n\n", short_sha(&report.current.git_sha)));

    let verdicts = &report.comparison.verdicts;
    if verdicts.is_empty() {
        out.push_str(&format!("{}\n\n", paint("No performance alerts detected.", Color::Green)));
    } else {
        // verdicts arrive grouped by category in lexicographic order
        let mut current_category: Option<&str> = None;
        for verdict in verdicts {
            if current_category != Some(verdict.category.as_str()) {
                if current_category.is_some() {
                    out.push('\n');
                }
                out.push_str(&format!("{}\n", paint(&format!("{}:", verdict.category), Color::Blue)));
                current_category = Some(verdict.category.as_str());
            }
            out.push_str(&verdict_line(verdict, &paint));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("{}\n", paint("Summary", Color::Blue)));
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!("  Critical:     {}\n", paint(&counters.critical.to_string(), Color::Red)));
    out.push_str(&format!("  Regressions:  {}\n", paint(&counters.regressions.to_string(), Color::Red)));
    out.push_str(&format!("  Warnings:     {}\n", paint(&counters.warnings.to_string(), Color::Yellow)));
    out.push_str(&format!("  Improvements: {}\n", paint(&counters.improvements.to_string(), Color::Green)));
    out.push_str(&format!("  Unchanged:    {}\n", counters.unchanged));
    out.push_str(&format!("  Missing:      {}\n\n", counters.missing));

    let closing = if counters.critical > 0 && options.critical_gated {
        paint(
            &format!(
                "CRITICAL: {} benchmark(s) exceed the critical threshold.",
                counters.critical
            ),
            Color::Red,
        )
    } else if counters.critical > 0 {
        paint(
            "WARNING: Critical performance regressions detected (not gated).",
            Color::Yellow,
        )
    } else if counters.regressions > 0 {
        paint("WARNING: Performance regressions detected.", Color::Yellow)
    } else {
        paint("PASS: No significant performance regressions.", Color::Green)
    };
    out.push_str(&format!("{}\n", closing));

    out
}

fn verdict_line(verdict: &Verdict, paint: &dyn Fn(&str, Color) -> String) -> String {
    let current = verdict
        .current_ns
        .filter(|_| verdict.pct_change.is_some())
        .map(format_duration)
        .unwrap_or_else(|| "-".to_string());
    let change = verdict
        .pct_change
        .map(format_pct)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "  {} {:30}  {:>10} -> {:<10}  ({})  [{}]\n",
        verdict.status.emoji(),
        verdict.name,
        format_duration(verdict.baseline_ns),
        current,
        change,
        paint(verdict.status.label(), status_color(verdict.status))
    )
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Critical | Status::Regression => Color::Red,
        Status::Warning => Color::Yellow,
        Status::Improved => Color::Green,
        Status::Ok | Status::Missing => Color::White,
    }
}
