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

//! Canonical measurement model.
//!
//! Every supported result-file schema is normalised into a [`ResultSet`]:
//! `category -> benchmark name -> Measurement`. Comparison and every
//! renderer consume this one shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder used for metadata fields a result file does not carry.
pub const UNKNOWN: &str = "unknown";

/// A single benchmark measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Mean duration in nanoseconds.
    pub mean_ns: u64,
    /// Lower confidence bound in nanoseconds.
    pub lower_ns: Option<u64>,
    /// Upper confidence bound in nanoseconds.
    pub upper_ns: Option<u64>,
    /// Unit reported by the producer (informational).
    pub unit: Option<String>,
    /// Pre-formatted display string supplied by the producer.
    pub display: Option<String>,
    /// Whether the benchmark met its target, when the producer says so.
    pub meets_target: Option<bool>,
}

impl Measurement {
    /// Creates a measurement with only a mean.
    pub fn new(mean_ns: u64) -> Self {
        Self {
            mean_ns,
            lower_ns: None,
            upper_ns: None,
            unit: None,
            display: None,
            meets_target: None,
        }
    }

    /// Sets confidence bounds.
    pub fn with_bounds(mut self, lower_ns: u64, upper_ns: u64) -> Self {
        self.lower_ns = Some(lower_ns);
        self.upper_ns = Some(upper_ns);
        self
    }

    /// Sets the target marker.
    pub fn with_target(mut self, meets_target: bool) -> Self {
        self.meets_target = Some(meets_target);
        self
    }

    /// Sets the display string.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// Benchmarks of one category keyed by name.
pub type CategoryResults = BTreeMap<String, Measurement>;

/// Normalised results of one run, keyed by category then benchmark name.
///
/// Both levels are ordered maps so iteration is always lexicographic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    categories: BTreeMap<String, CategoryResults>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a measurement; a later insert for the same key wins.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        measurement: Measurement,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), measurement);
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        measurement: Measurement,
    ) -> Self {
        self.insert(category, name, measurement);
        self
    }

    /// Returns the benchmarks of a category.
    pub fn category(&self, category: &str) -> Option<&CategoryResults> {
        self.categories.get(category)
    }

    /// Returns one measurement.
    pub fn get(&self, category: &str, name: &str) -> Option<&Measurement> {
        self.categories.get(category).and_then(|c| c.get(name))
    }

    /// Iterates categories in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = (&String, &CategoryResults)> {
        self.categories.iter()
    }

    /// Iterates every `(category, name, measurement)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Measurement)> {
        self.categories.iter().flat_map(|(category, benches)| {
            benches
                .iter()
                .map(move |(name, m)| (category.as_str(), name.as_str(), m))
        })
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total number of measurements.
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no measurement is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records that a category exists even if none of its entries yield a
    /// measurement, so its baseline benchmarks are compared as missing.
    pub fn declare(&mut self, category: impl Into<String>) {
        self.categories.entry(category.into()).or_default();
    }
}

/// Identity of one run, as stamped into the result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Version label.
    pub version: String,
    /// Commit SHA.
    pub git_sha: String,
    /// Date or timestamp of the run.
    pub date: String,
}

impl Default for RunMetadata {
    fn default() -> Self {
        Self {
            version: UNKNOWN.to_string(),
            git_sha: UNKNOWN.to_string(),
            date: UNKNOWN.to_string(),
        }
    }
}

/// One extracted result file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Run identity.
    pub metadata: RunMetadata,
    /// Normalised measurements.
    pub results: ResultSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut set = ResultSet::new();
        set.insert("parser", "tokenize", Measurement::new(100));
        set.insert("parser", "tokenize", Measurement::new(200));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("parser", "tokenize").map(|m| m.mean_ns), Some(200));
    }

    #[test]
    fn test_iteration_is_lexicographic() {
        let set = ResultSet::new()
            .with("zeta", "b", Measurement::new(1))
            .with("alpha", "z", Measurement::new(2))
            .with("alpha", "a", Measurement::new(3));

        let keys: Vec<_> = set.iter().map(|(c, n, _)| format!("{c}/{n}")).collect();
        assert_eq!(keys, vec!["alpha/a", "alpha/z", "zeta/b"]);
    }

    #[test]
    fn test_declared_category_without_measurements() {
        let mut set = ResultSet::new().with("parser", "lex", Measurement::new(1));
        set.declare("lexer");
        set.declare("parser");

        assert_eq!(set.category_count(), 2);
        assert_eq!(set.len(), 1);
        assert!(set.category("lexer").is_some_and(|c| c.is_empty()));
        assert!(set.get("parser", "lex").is_some());
    }

    #[test]
    fn test_metadata_defaults_to_unknown() {
        let meta = RunMetadata::default();
        assert_eq!(meta.version, UNKNOWN);
        assert_eq!(meta.git_sha, UNKNOWN);
        assert_eq!(meta.date, UNKNOWN);
    }
}
