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

//! Markdown reporter for pull-request comments.
//!
//! One table per non-empty severity tier, always in the order critical,
//! regression, warning, improvement. Output depends only on the report, so
//! identical inputs give byte-identical comments.

use super::{baseline_label, Report};
use crate::compare::{Status, Verdict};
use crate::format::{format_duration, format_pct, short_sha};
struct Tier {
    status: Status,
    heading: &'static str,
    with_status_column: bool,
}

const TIERS: [Tier; 4] = [
    Tier {
        status: Status::Critical,
        heading: "🔴 Critical Regressions",
        with_status_column: true,
    },
    Tier {
        status: Status::Regression,
        heading: "⚠️ Performance Regressions",
        with_status_column: true,
    },
    Tier {
        status: Status::Warning,
        heading: "⚡ Performance Warnings",
        with_status_column: false,
    },
    Tier {
        status: Status::Improved,
        heading: "✅ Performance Improvements",
        with_status_column: false,
    },
];

/// Renders the markdown report.
pub fn render_markdown(report: &Report) -> String {
    let comparison = &report.comparison;
    let counters = &comparison.counters;
    let mut md = String::new();

    md.push_str("## Performance Benchmark Results\n\n");
    md.push_str(&format!("**Baseline:** {}\n", baseline_label(&report.baseline)));
    md.push_str(&format!("**Current:**  {}\n\n", short_sha(&report.current.git_sha)));

    for tier in &TIERS {
        let rows: Vec<&Verdict> = comparison.with_status(tier.status).collect();
        if rows.is_empty() {
            continue;
        }
        md.push_str(&format!("### {}\n\n", tier.heading));
        if tier.with_status_column {
            md.push_str("| Benchmark | Baseline | Current | Change | Status |\n");
            md.push_str("|-----------|----------|---------|--------|--------|\n");
        } else {
            md.push_str("| Benchmark | Baseline | Current | Change |\n");
            md.push_str("|-----------|----------|---------|--------|\n");
        }
        for verdict in rows {
            md.push_str(&table_row(verdict, tier.with_status_column));
        }
        md.push('\n');
    }

    if counters.alerts() == 0 {
        md.push_str("✅ No significant performance changes detected.\n\n");
    }

    let missing: Vec<&Verdict> = comparison.with_status(Status::Missing).collect();
    if !missing.is_empty() {
        md.push_str("### ❔ Missing Benchmarks\n\n");
        for verdict in missing {
            md.push_str(&format!(
                "- `{}` (baseline {})\n",
                verdict.full_name(),
                format_duration(verdict.baseline_ns)
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str(&format!(
        "📊 **Summary:** {} critical, {} regressions, {} warnings, {} improvements, {} missing\n\n",
        counters.critical, counters.regressions, counters.warnings, counters.improvements, counters.missing
    ));
    match &report.policy_source {
        Some(source) => {
            md.push_str(&format!("<sub>Thresholds configured in `{}`</sub>\n", source));
        }
        None => md.push_str("<sub>Thresholds: built-in defaults</sub>\n"),
    }

    md
}

fn table_row(verdict: &Verdict, with_status_column: bool) -> String {
    let current = verdict.current_ns.map(format_duration).unwrap_or_else(|| "-".to_string());
    let change = verdict.pct_change.map(format_pct).unwrap_or_else(|| "-".to_string());
    let mut row = format!(
        "| `{}` | {} | {} | {} |",
        verdict.full_name(),
        format_duration(verdict.baseline_ns),
        current,
        change
    );
    if with_status_column {
        row.push_str(&format!(" {} {} |", verdict.status.emoji(), verdict.status.label()));
    }
    row.push('\n');
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::measurement::{Measurement, ResultSet, RunMetadata};
    use crate::policy::ThresholdPolicy;

    fn report(baseline: &ResultSet, current: &ResultSet) -> Report {
        Report {
            baseline: RunMetadata::default(),
            current: RunMetadata::default(),
            comparison: compare(baseline, current, &ThresholdPolicy::default()),
            current_results: current.clone(),
            policy_source: None,
        }
    }

    #[test]
    fn test_regression_table() {
        let baseline = ResultSet::new().with("parser", "tokenize", Measurement::new(1_000_000));
        let current = ResultSet::new().with("parser", "tokenize", Measurement::new(1_300_000));
        let md = render_markdown(&report(&baseline, &current));

        assert!(md.contains("### ⚠️ Performance Regressions"));
        assert!(md.contains("| `parser/tokenize` | 1.0ms | 1.3ms | +30.0% | ⚠️ REGRESSION |"));
        assert!(!md.contains("Critical Regressions"));
        assert!(!md.contains("Performance Warnings"));
        assert!(md.contains("0 critical, 1 regressions, 0 warnings, 0 improvements, 0 missing"));
        assert!(md.contains("built-in defaults"));
    }

    #[test]
    fn test_tier_order() {
        let baseline = ResultSet::new()
            .with("a", "fast", Measurement::new(1_000))
            .with("a", "slow", Measurement::new(1_000))
            .with("a", "warn", Measurement::new(1_000));
        let current = ResultSet::new()
            .with("a", "fast", Measurement::new(500))
            .with("a", "slow", Measurement::new(3_000))
            .with("a", "warn", Measurement::new(1_150));
        let md = render_markdown(&report(&baseline, &current));

        let critical = md.find("Critical Regressions").unwrap();
        let warnings = md.find("Performance Warnings").unwrap();
        let improvements = md.find("Performance Improvements").unwrap();
        assert!(critical < warnings && warnings < improvements);
        assert!(md.contains("| `a/fast` | 1.0µs | 500ns | -50.0% |"));
    }

    #[test]
    fn test_no_changes_and_missing() {
        let baseline = ResultSet::new()
            .with("a", "same", Measurement::new(1_000))
            .with("a", "gone", Measurement::new(2_000));
        let current = ResultSet::new().with("a", "same", Measurement::new(1_000));
        let md = render_markdown(&report(&baseline, &current).with_policy_source("thresholds.yaml"));

        assert!(md.contains("✅ No significant performance changes detected."));
        assert!(md.contains("### ❔ Missing Benchmarks"));
        assert!(md.contains("- `a/gone` (baseline 2.0µs)"));
        assert!(md.contains("Thresholds configured in `thresholds.yaml`"));
    }
}
