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

//! Baseline/current comparison and classification.
//!
//! Pairs measurements by `(category, name)`, computes the percentage change
//! and classifies it against the resolved thresholds. Coverage is anchored
//! to the baseline: only categories present on both sides are visited, and
//! within them only benchmarks present in the baseline.

use crate::measurement::{CategoryResults, ResultSet};
use crate::policy::{ThresholdPolicy, Thresholds};
use serde::Serialize;
use tracing::debug;

/// Classification of one benchmark's change.
///
/// Variants are declared in severity order so `Ord` can be used to compare
/// tiers; `Missing` sits outside that order and is never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Faster than the improvement threshold.
    Improved,
    /// Within all thresholds.
    Ok,
    /// Above the warning threshold.
    Warning,
    /// Above the regression threshold.
    Regression,
    /// Above the critical threshold.
    Critical,
    /// No comparable measurement.
    Missing,
}

impl Status {
    /// Upper-case label used in every report.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Improved => "IMPROVED",
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Regression => "REGRESSION",
            Status::Critical => "CRITICAL",
            Status::Missing => "MISSING",
        }
    }

    /// Emoji marker used by the console and markdown reports.
    pub fn emoji(&self) -> &'static str {
        match self {
            Status::Improved => "✅",
            Status::Ok => "✓",
            Status::Warning => "⚡",
            Status::Regression => "⚠️",
            Status::Critical => "🔴",
            Status::Missing => "❔",
        }
    }

    /// Returns true for statuses that appear in the verdict list.
    pub fn is_alert(&self) -> bool {
        !matches!(self, Status::Ok)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a percentage change.
///
/// Every comparison is strict: a change exactly at a threshold stays in the
/// tier below it.
pub fn classify(pct_change: f64, thresholds: &Thresholds) -> Status {
    if pct_change > thresholds.critical_pct {
        Status::Critical
    } else if pct_change > thresholds.regression_pct {
        Status::Regression
    } else if pct_change > thresholds.warn_pct {
        Status::Warning
    } else if pct_change < -thresholds.improvement_pct {
        Status::Improved
    } else {
        Status::Ok
    }
}

/// Percentage change from `baseline_ns` to `current_ns`.
///
/// Returns `None` for a zero baseline, where the change is undefined.
pub fn percent_change(baseline_ns: u64, current_ns: u64) -> Option<f64> {
    if baseline_ns == 0 {
        return None;
    }
    Some((current_ns as f64 - baseline_ns as f64) * 100.0 / baseline_ns as f64)
}

/// One classified benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    /// Category name.
    pub category: String,
    /// Benchmark name.
    pub name: String,
    /// Baseline mean in nanoseconds.
    pub baseline_ns: u64,
    /// Current mean in nanoseconds, if one exists.
    pub current_ns: Option<u64>,
    /// Percentage change; `None` when the pair is unclassifiable.
    pub pct_change: Option<f64>,
    /// Classification.
    pub status: Status,
}

impl Verdict {
    /// `category/name` key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

/// Aggregate counts for one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// CRITICAL verdicts.
    pub critical: usize,
    /// REGRESSION verdicts.
    pub regressions: usize,
    /// WARNING verdicts.
    pub warnings: usize,
    /// IMPROVED verdicts.
    pub improvements: usize,
    /// OK results (not in the verdict list).
    pub unchanged: usize,
    /// MISSING verdicts.
    pub missing: usize,
}

impl Counters {
    fn record(&mut self, status: Status) {
        match status {
            Status::Critical => self.critical += 1,
            Status::Regression => self.regressions += 1,
            Status::Warning => self.warnings += 1,
            Status::Improved => self.improvements += 1,
            Status::Ok => self.unchanged += 1,
            Status::Missing => self.missing += 1,
        }
    }

    /// Count of the four severity tiers.
    pub fn alerts(&self) -> usize {
        self.critical + self.regressions + self.warnings + self.improvements
    }

    /// Count of every benchmark that was compared.
    pub fn total(&self) -> usize {
        self.alerts() + self.unchanged + self.missing
    }
}

/// Output of [`compare`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Non-OK verdicts in category then name order.
    pub verdicts: Vec<Verdict>,
    /// OK verdicts, kept out of `verdicts` and counted as `unchanged`.
    pub unchanged: Vec<Verdict>,
    /// Aggregate counts.
    pub counters: Counters,
}

impl Comparison {
    /// Verdicts with the given status, in report order.
    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(move |v| v.status == status)
    }
}

/// Compares two result sets under a policy.
///
/// Only categories present on both sides are compared, except that an
/// entirely empty `current` reports every non-exempt baseline benchmark as
/// [`Status::Missing`].
///
/// # Example
///
/// ```
/// use benchgate::compare::{compare, Status};
/// use benchgate::measurement::{Measurement, ResultSet};
/// use benchgate::policy::ThresholdPolicy;
///
/// let baseline = ResultSet::new().with("parser", "tokenize", Measurement::new(1_000_000));
/// let current = ResultSet::new().with("parser", "tokenize", Measurement::new(1_300_000));
///
/// let comparison = compare(&baseline, &current, &ThresholdPolicy::default());
/// assert_eq!(comparison.verdicts[0].status, Status::Regression);
/// assert_eq!(comparison.counters.regressions, 1);
/// ```
pub fn compare(baseline: &ResultSet, current: &ResultSet, policy: &ThresholdPolicy) -> Comparison {
    let mut comparison = Comparison::default();
    let nothing_measured = current.is_empty();
    let no_benches = CategoryResults::new();

    for (category, base_benches) in baseline.categories() {
        let curr_benches = match current.category(category) {
            Some(benches) => benches,
            // An empty current set means nothing was measured at all.
            None if nothing_measured => &no_benches,
            None => {
                debug!(%category, "category absent from current results; skipped");
                continue;
            }
        };

        for (name, base) in base_benches {
            if policy.is_exempt(category, name) {
                debug!(%category, %name, "exempt; skipped");
                continue;
            }

            let current_ns = curr_benches.get(name).map(|m| m.mean_ns);
            let pct_change = current_ns.and_then(|ns| percent_change(base.mean_ns, ns));

            let status = match pct_change {
                Some(pct) => classify(pct, &policy.effective_thresholds(category, name)),
                None => Status::Missing,
            };

            comparison.counters.record(status);
            let verdict = Verdict {
                category: category.clone(),
                name: name.clone(),
                baseline_ns: base.mean_ns,
                current_ns,
                pct_change,
                status,
            };
            if status.is_alert() {
                comparison.verdicts.push(verdict);
            } else {
                comparison.unchanged.push(verdict);
            }
        }
    }

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Measurement;
    use crate::policy::{CriticalPathEntry, ThresholdOverride};

    fn single(category: &str, name: &str, ns: u64) -> ResultSet {
        ResultSet::new().with(category, name, Measurement::new(ns))
    }

    #[test]
    fn test_classify_boundaries_are_strict() {
        let t = Thresholds::default();
        assert_eq!(classify(50.0, &t), Status::Regression);
        assert_eq!(classify(50.0001, &t), Status::Critical);
        assert_eq!(classify(20.0, &t), Status::Warning);
        assert_eq!(classify(10.0, &t), Status::Ok);
        assert_eq!(classify(-10.0, &t), Status::Ok);
        assert_eq!(classify(-10.5, &t), Status::Improved);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(1_000_000, 1_300_000), Some(30.0));
        assert_eq!(percent_change(200, 100), Some(-50.0));
        assert_eq!(percent_change(0, 100), None);
    }

    #[test]
    fn test_regression_scenario() {
        let baseline = single("parser", "tokenize", 1_000_000);
        let current = single("parser", "tokenize", 1_300_000);

        let result = compare(&baseline, &current, &ThresholdPolicy::default());
        assert_eq!(result.verdicts.len(), 1);
        let v = &result.verdicts[0];
        assert_eq!(v.status, Status::Regression);
        assert_eq!(v.pct_change, Some(30.0));
        assert_eq!(v.full_name(), "parser/tokenize");
    }

    #[test]
    fn test_ok_is_counted_not_listed() {
        let baseline = single("parser", "tokenize", 1_000);
        let current = single("parser", "tokenize", 1_050);

        let result = compare(&baseline, &current, &ThresholdPolicy::default());
        assert!(result.verdicts.is_empty());
        assert_eq!(result.counters.unchanged, 1);
        assert_eq!(result.unchanged.len(), 1);
        assert_eq!(result.unchanged[0].status, Status::Ok);
    }

    #[test]
    fn test_missing_and_zero_baseline() {
        let baseline = ResultSet::new()
            .with("parser", "gone", Measurement::new(1_000))
            .with("parser", "zero", Measurement::new(0));
        let current = single("parser", "zero", 10);

        let result = compare(&baseline, &current, &ThresholdPolicy::default());
        assert_eq!(result.counters.missing, 2);
        assert_eq!(result.counters.total(), 2);
        assert!(result.verdicts.iter().all(|v| v.status == Status::Missing));
        assert!(result.verdicts.iter().all(|v| v.pct_change.is_none()));
        let zero = result.verdicts.iter().find(|v| v.name == "zero").unwrap();
        assert_eq!(zero.current_ns, Some(10));
    }

    #[test]
    fn test_one_sided_categories_and_current_only_benchmarks_are_ignored() {
        let baseline = ResultSet::new()
            .with("parser", "a", Measurement::new(100))
            .with("lsp", "hover", Measurement::new(100));
        let current = ResultSet::new()
            .with("parser", "a", Measurement::new(100))
            .with("parser", "new", Measurement::new(900))
            .with("dap", "step", Measurement::new(100));

        let result = compare(&baseline, &current, &ThresholdPolicy::default());
        assert_eq!(result.counters, Counters { unchanged: 1, ..Counters::default() });
    }

    #[test]
    fn test_declared_category_without_measurements_reports_missing() {
        let baseline = ResultSet::new()
            .with("parser", "tokenize", Measurement::new(1_000))
            .with("lexer", "scan", Measurement::new(1_000));
        let mut current = single("lexer", "scan", 1_000);
        current.declare("parser");

        let result = compare(&baseline, &current, &ThresholdPolicy::default());
        assert_eq!(result.counters.missing, 1);
        assert_eq!(result.counters.unchanged, 1);
        assert_eq!(result.verdicts.len(), 1);
        assert_eq!(result.verdicts[0].full_name(), "parser/tokenize");
        assert_eq!(result.verdicts[0].current_ns, None);
    }

    #[test]
    fn test_empty_current_reports_all_missing() {
        let baseline = ResultSet::new()
            .with("parser", "a", Measurement::new(100))
            .with("lsp", "hover", Measurement::new(100))
            .with("fuzz", "x", Measurement::new(100));
        let policy = ThresholdPolicy {
            exemptions: vec!["fuzz/*".to_string()],
            ..ThresholdPolicy::default()
        };

        let result = compare(&baseline, &ResultSet::new(), &policy);
        assert_eq!(result.counters.missing, 2);
        assert_eq!(result.counters.total(), 2);
        let names: Vec<String> = result.verdicts.iter().map(Verdict::full_name).collect();
        assert_eq!(names, vec!["lsp/hover", "parser/a"]);
    }

    #[test]
    fn test_exempt_skips_everything() {
        let baseline = ResultSet::new()
            .with("fuzz", "slow", Measurement::new(100))
            .with("fuzz", "gone", Measurement::new(100));
        let current = single("fuzz", "slow", 10_000);
        let policy = ThresholdPolicy {
            exemptions: vec!["fuzz/*".to_string()],
            ..ThresholdPolicy::default()
        };

        let result = compare(&baseline, &current, &policy);
        assert_eq!(result.counters.total(), 0);
        assert!(result.verdicts.is_empty());
    }

    #[test]
    fn test_critical_path_override() {
        let baseline = ResultSet::new()
            .with("parser", "tokenize", Measurement::new(1_000_000))
            .with("parser", "parse", Measurement::new(1_000_000));
        let current = ResultSet::new()
            .with("parser", "tokenize", Measurement::new(1_300_000))
            .with("parser", "parse", Measurement::new(1_300_000));
        let policy = ThresholdPolicy {
            critical_path: vec![CriticalPathEntry {
                name: "parser/tokenize".to_string(),
                overrides: ThresholdOverride {
                    critical_pct: Some(25.0),
                    ..ThresholdOverride::default()
                },
            }],
            ..ThresholdPolicy::default()
        };

        let result = compare(&baseline, &current, &policy);
        let statuses: Vec<_> = result.verdicts.iter().map(|v| (v.name.as_str(), v.status)).collect();
        assert_eq!(
            statuses,
            vec![("parse", Status::Regression), ("tokenize", Status::Critical)]
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Status::Improved < Status::Ok);
        assert!(Status::Ok < Status::Warning);
        assert!(Status::Warning < Status::Regression);
        assert!(Status::Regression < Status::Critical);
    }
}
