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

//! Result extraction.
//!
//! Benchmark result files exist in two shapes:
//!
//! - **Simplified**: a top-level `results` object of categories, each holding
//!   entries whose measurement fields sit directly on the entry.
//! - **Detailed**: a top-level `benchmarks` object whose children are either
//!   categories (when one of their own children looks like a measurement) or
//!   bare measurements, which are filed under the synthetic `other` category.
//!
//! Extraction never fails. Entries without a usable mean are left out, and
//! documents of any other shape yield an empty [`ResultSet`].

use crate::measurement::{Measurement, ResultSet, RunMetadata, Snapshot, UNKNOWN};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Category used for detailed-schema measurements that have no category.
pub const OTHER_CATEGORY: &str = "other";

/// Which result-file shape a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Top-level `results` object.
    Simplified,
    /// Top-level `benchmarks` object.
    Detailed,
    /// Neither shape matched.
    Unrecognized,
}

impl SchemaVariant {
    /// Detects the shape of a document. `results` takes precedence.
    pub fn detect(doc: &Value) -> Self {
        match doc {
            Value::Object(map) if map.get("results").is_some_and(Value::is_object) => {
                SchemaVariant::Simplified
            }
            Value::Object(map) if map.get("benchmarks").is_some_and(Value::is_object) => {
                SchemaVariant::Detailed
            }
            _ => SchemaVariant::Unrecognized,
        }
    }
}

/// Extracts measurements and run identity from one result document.
pub fn extract(doc: &Value) -> Snapshot {
    Snapshot {
        metadata: extract_metadata(doc),
        results: extract_results(doc),
    }
}

/// Extracts the normalised result set from a document of either shape.
pub fn extract_results(doc: &Value) -> ResultSet {
    let variant = SchemaVariant::detect(doc);
    debug!(?variant, "detected result schema");

    match variant {
        SchemaVariant::Simplified => extract_simplified(&doc["results"]),
        SchemaVariant::Detailed => extract_detailed(&doc["benchmarks"]),
        SchemaVariant::Unrecognized => {
            warn!("document matches no supported result schema; treating it as empty");
            ResultSet::new()
        }
    }
}

fn extract_simplified(results: &Value) -> ResultSet {
    let mut set = ResultSet::new();
    let Some(categories) = results.as_object() else {
        return set;
    };

    for (category, benchmarks) in categories {
        if is_marker(category) {
            continue;
        }
        let Some(benchmarks) = benchmarks.as_object() else {
            continue;
        };
        set.declare(category.as_str());
        for (name, entry) in benchmarks {
            if is_marker(name) {
                continue;
            }
            match extract_measurement(entry) {
                Some(m) => set.insert(category.as_str(), name.as_str(), m),
                None => debug!(%category, %name, "entry has no usable mean; skipped"),
            }
        }
    }
    set
}

fn extract_detailed(benchmarks: &Value) -> ResultSet {
    let mut set = ResultSet::new();
    let Some(children) = benchmarks.as_object() else {
        return set;
    };

    for (key, value) in children {
        if is_marker(key) {
            continue;
        }
        let Some(child) = value.as_object() else {
            continue;
        };

        if child.values().any(looks_like_measurement) {
            set.declare(key.as_str());
            for (name, entry) in child {
                if is_marker(name) || !looks_like_measurement(entry) {
                    continue;
                }
                match extract_measurement(entry) {
                    Some(m) => set.insert(key.as_str(), name.as_str(), m),
                    None => debug!(category = %key, %name, "entry has no usable mean; skipped"),
                }
            }
        } else if has_mean_key(child) {
            set.declare(OTHER_CATEGORY);
            match extract_measurement(value) {
                Some(m) => set.insert(OTHER_CATEGORY, key.as_str(), m),
                None => debug!(name = %key, "entry has no usable mean; skipped"),
            }
        }
    }
    set
}

/// Builds a [`Measurement`] from one entry, or `None` when it has no usable mean.
pub fn extract_measurement(entry: &Value) -> Option<Measurement> {
    let fields = entry.as_object()?;
    let mean_ns = extract_mean_ns(fields)?;

    let interval = fields
        .get("mean")
        .and_then(|m| m.get("confidence_interval"));
    let lower_ns = fields
        .get("lower_ns")
        .and_then(as_nanos)
        .or_else(|| interval.and_then(|ci| ci.get("lower_bound")).and_then(as_nanos));
    let upper_ns = fields
        .get("upper_ns")
        .and_then(as_nanos)
        .or_else(|| interval.and_then(|ci| ci.get("upper_bound")).and_then(as_nanos));

    Some(Measurement {
        mean_ns,
        lower_ns,
        upper_ns,
        unit: string_field(fields, "unit"),
        display: string_field(fields, "display"),
        meets_target: fields.get("meets_target").and_then(Value::as_bool),
    })
}

/// Reads the mean in nanoseconds.
///
/// Precedence: `mean_ns`, then `mean.nanoseconds`, then `mean.point_estimate`.
pub fn extract_mean_ns(fields: &Map<String, Value>) -> Option<u64> {
    if let Some(direct) = fields.get("mean_ns") {
        return as_nanos(direct);
    }
    let mean = fields.get("mean")?.as_object()?;
    if let Some(ns) = mean.get("nanoseconds") {
        return as_nanos(ns);
    }
    mean.get("point_estimate").and_then(as_nanos)
}

/// Reads run identity, falling back to `"unknown"` for each absent field.
pub fn extract_metadata(doc: &Value) -> RunMetadata {
    RunMetadata {
        version: lookup(doc, &["version"]),
        git_sha: lookup(doc, &["git_sha"]),
        date: lookup(doc, &["date", "timestamp"]),
    }
}

fn lookup(doc: &Value, fields: &[&str]) -> String {
    fields
        .iter()
        .find_map(|field| {
            non_empty_str(doc.get("metadata").and_then(|m| m.get(*field)))
                .or_else(|| non_empty_str(doc.get(*field)))
        })
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Converts a JSON number into whole nanoseconds.
///
/// Negative, non-finite and non-numeric values are rejected; fractional
/// values are truncated toward zero.
fn as_nanos(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn looks_like_measurement(value: &Value) -> bool {
    value.as_object().is_some_and(has_mean_key)
}

fn has_mean_key(fields: &Map<String, Value>) -> bool {
    fields.contains_key("mean") || fields.contains_key("mean_ns")
}

fn is_marker(key: &str) -> bool {
    key.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simplified_schema() {
        let doc = json!({
            "results": {
                "parser": {
                    "_meta": {"mean_ns": 1},
                    "tokenize": {"mean_ns": 1_000_000, "unit": "ns", "display": "1.0ms"},
                    "parse": {"mean": {"nanoseconds": 2_500}}
                }
            }
        });

        let set = extract_results(&doc);
        assert_eq!(set.len(), 2);
        let tokenize = set.get("parser", "tokenize").unwrap();
        assert_eq!(tokenize.mean_ns, 1_000_000);
        assert_eq!(tokenize.unit.as_deref(), Some("ns"));
        assert_eq!(tokenize.display.as_deref(), Some("1.0ms"));
        assert_eq!(set.get("parser", "parse").unwrap().mean_ns, 2_500);
        assert!(set.get("parser", "_meta").is_none());
    }

    #[test]
    fn test_detailed_schema_with_categories() {
        let doc = json!({
            "benchmarks": {
                "lsp": {
                    "hover": {"mean": {"point_estimate": 1234.9}},
                    "config": "not a benchmark"
                }
            }
        });

        let set = extract_results(&doc);
        assert_eq!(set.get("lsp", "hover").unwrap().mean_ns, 1234);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_detailed_schema_bare_measurements_go_to_other() {
        let doc = json!({
            "benchmarks": {
                "startup": {"mean_ns": 500},
                "notes": {"author": "ci"}
            }
        });

        let set = extract_results(&doc);
        assert_eq!(set.get(OTHER_CATEGORY, "startup").unwrap().mean_ns, 500);
        assert_eq!(set.category_count(), 1);
    }

    #[test]
    fn test_declared_categories_survive_unusable_means() {
        let simplified = extract_results(&json!({
            "results": {
                "parser": {"tokenize": {"mean_ns": "garbage"}},
                "_private": {"x": {"mean_ns": "garbage"}},
                "notes": "not a category"
            }
        }));
        assert!(simplified.is_empty());
        assert!(simplified.category("parser").is_some());
        assert_eq!(simplified.category_count(), 1);

        let detailed = extract_results(&json!({
            "benchmarks": {
                "lexer": {"scan": {"mean": "x"}},
                "startup": {"mean_ns": -1}
            }
        }));
        assert!(detailed.is_empty());
        assert!(detailed.category("lexer").is_some());
        assert!(detailed.category(OTHER_CATEGORY).is_some());
    }

    #[test]
    fn test_direct_mean_wins_over_nested() {
        let doc = json!({"mean_ns": 10, "mean": {"nanoseconds": 20, "point_estimate": 30.0}});
        assert_eq!(extract_measurement(&doc).unwrap().mean_ns, 10);

        let doc = json!({"mean": {"nanoseconds": 20, "point_estimate": 30.0}});
        assert_eq!(extract_measurement(&doc).unwrap().mean_ns, 20);

        let doc = json!({"mean": {"point_estimate": 30.0}});
        assert_eq!(extract_measurement(&doc).unwrap().mean_ns, 30);
    }

    #[test]
    fn test_unusable_means_are_absent() {
        assert!(extract_measurement(&json!({"mean_ns": -5})).is_none());
        assert!(extract_measurement(&json!({"mean_ns": "fast"})).is_none());
        assert!(extract_measurement(&json!({"mean": 42})).is_none());
        assert!(extract_measurement(&json!({"median_ns": 42})).is_none());
        assert!(extract_measurement(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_confidence_bounds() {
        let doc = json!({
            "mean": {
                "point_estimate": 100.0,
                "confidence_interval": {"lower_bound": 90.0, "upper_bound": 110.0}
            }
        });
        let m = extract_measurement(&doc).unwrap();
        assert_eq!((m.lower_ns, m.upper_ns), (Some(90), Some(110)));

        let doc = json!({"mean_ns": 100, "lower_ns": 95, "upper_ns": 105, "meets_target": true});
        let m = extract_measurement(&doc).unwrap();
        assert_eq!((m.lower_ns, m.upper_ns), (Some(95), Some(105)));
        assert_eq!(m.meets_target, Some(true));
    }

    #[test]
    fn test_unsupported_shapes_are_empty() {
        assert!(extract_results(&json!([1, 2])).is_empty());
        assert!(extract_results(&json!({"tests": {"a": {"mean_ns": 1}}})).is_empty());
        assert!(extract_results(&json!({"results": [1]})).is_empty());
        assert!(extract_results(&Value::Null).is_empty());
        assert_eq!(
            SchemaVariant::detect(&json!({"results": {}})),
            SchemaVariant::Simplified
        );
    }

    #[test]
    fn test_metadata_precedence() {
        let doc = json!({
            "metadata": {"version": "1.2.0", "git_sha": ""},
            "git_sha": "abcdef0123456789",
            "timestamp": "2025-01-01T00:00:00Z"
        });
        let meta = extract_metadata(&doc);
        assert_eq!(meta.version, "1.2.0");
        assert_eq!(meta.git_sha, "abcdef0123456789");
        assert_eq!(meta.date, "2025-01-01T00:00:00Z");

        let meta = extract_metadata(&json!({"version": 3}));
        assert_eq!(meta.version, UNKNOWN);
    }
}
