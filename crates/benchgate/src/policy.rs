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

//! Threshold policy and its three-tier resolution.
//!
//! Thresholds resolve in order of increasing specificity:
//!
//! 1. global `defaults` (falling back to built-in values per field),
//! 2. `categories[category]` partial overrides,
//! 3. the first `critical_path` entry whose name is exactly `category/name`.
//!
//! A later tier replaces only the fields it sets; it never clears a field
//! resolved by an earlier tier. Exemption patterns are evaluated separately
//! by [`ThresholdPolicy::is_exempt`].

use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Built-in warning threshold (percent).
pub const DEFAULT_WARN_PCT: f64 = 10.0;
/// Built-in regression threshold (percent).
pub const DEFAULT_REGRESSION_PCT: f64 = 20.0;
/// Built-in critical threshold (percent).
pub const DEFAULT_CRITICAL_PCT: f64 = 50.0;
/// Built-in improvement threshold (percent).
pub const DEFAULT_IMPROVEMENT_PCT: f64 = 10.0;

/// Fully resolved thresholds for one benchmark, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Change above this is a warning.
    pub warn_pct: f64,
    /// Change above this is a regression.
    pub regression_pct: f64,
    /// Change above this is critical.
    pub critical_pct: f64,
    /// Change below the negation of this is an improvement.
    pub improvement_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn_pct: DEFAULT_WARN_PCT,
            regression_pct: DEFAULT_REGRESSION_PCT,
            critical_pct: DEFAULT_CRITICAL_PCT,
            improvement_pct: DEFAULT_IMPROVEMENT_PCT,
        }
    }
}

impl Thresholds {
    /// Applies the fields an override sets and keeps the rest.
    pub fn overlay(mut self, layer: &ThresholdOverride) -> Self {
        if let Some(v) = layer.warn_pct {
            self.warn_pct = v;
        }
        if let Some(v) = layer.regression_pct {
            self.regression_pct = v;
        }
        if let Some(v) = layer.critical_pct {
            self.critical_pct = v;
        }
        if let Some(v) = layer.improvement_pct {
            self.improvement_pct = v;
        }
        self
    }
}

/// A partial set of thresholds; unset fields inherit from the tier below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverride {
    /// Warning threshold.
    #[serde(default, rename = "warn_threshold_pct")]
    pub warn_pct: Option<f64>,
    /// Regression threshold.
    #[serde(default, rename = "regression_threshold_pct")]
    pub regression_pct: Option<f64>,
    /// Critical threshold.
    #[serde(default, rename = "critical_threshold_pct")]
    pub critical_pct: Option<f64>,
    /// Improvement threshold.
    #[serde(default, rename = "improvement_threshold_pct")]
    pub improvement_pct: Option<f64>,
}

impl ThresholdOverride {
    fn values(&self) -> [Option<f64>; 4] {
        [
            self.warn_pct,
            self.regression_pct,
            self.critical_pct,
            self.improvement_pct,
        ]
    }
}

/// A benchmark singled out for tighter thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathEntry {
    /// Exact `category/name` key.
    pub name: String,
    /// Fields to override.
    #[serde(flatten)]
    pub overrides: ThresholdOverride,
}

/// Alerting switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Whether a CRITICAL verdict should fail a `--check` run.
    #[serde(default)]
    pub fail_on_critical: bool,
}

/// The complete threshold policy document.
///
/// # Example
///
/// ```
/// use benchgate::policy::ThresholdPolicy;
///
/// let policy = ThresholdPolicy::from_yaml_str(
///     "defaults:\n  critical_threshold_pct: 50\n\
///      critical_path:\n  - name: parser/tokenize\n    critical_threshold_pct: 10\n",
/// )
/// .unwrap();
///
/// assert_eq!(policy.effective_thresholds("parser", "tokenize").critical_pct, 10.0);
/// assert_eq!(policy.effective_thresholds("parser", "parse").critical_pct, 50.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    /// Global defaults.
    pub defaults: ThresholdOverride,
    /// Per-category partial overrides.
    pub categories: BTreeMap<String, ThresholdOverride>,
    /// Per-benchmark overrides; the first matching entry applies.
    pub critical_path: Vec<CriticalPathEntry>,
    /// Exact `category/name` or `category/*` patterns.
    pub exemptions: Vec<String>,
    /// Alerting switches.
    pub alerting: AlertingConfig,
}

impl ThresholdPolicy {
    /// Parses a YAML policy document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse_policy(content, "<yaml>", PolicyFormat::Yaml)
    }

    /// Parses a JSON policy document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        parse_policy(content, "<json>", PolicyFormat::Json)
    }

    /// Returns a copy whose default regression threshold is `pct`.
    pub fn with_regression_threshold(mut self, pct: f64) -> Self {
        self.defaults.regression_pct = Some(pct);
        self
    }

    /// Global defaults with built-in fallbacks applied.
    pub fn default_thresholds(&self) -> Thresholds {
        Thresholds::default().overlay(&self.defaults)
    }

    /// Resolves the thresholds that apply to one benchmark.
    pub fn effective_thresholds(&self, category: &str, name: &str) -> Thresholds {
        let mut resolved = self.default_thresholds();

        if let Some(layer) = self.categories.get(category) {
            resolved = resolved.overlay(layer);
        }

        let full_name = full_name(category, name);
        if let Some(entry) = self.critical_path.iter().find(|e| e.name == full_name) {
            resolved = resolved.overlay(&entry.overrides);
        }

        resolved
    }

    /// Returns true if any exemption pattern matches the benchmark.
    pub fn is_exempt(&self, category: &str, name: &str) -> bool {
        let full_name = full_name(category, name);
        self.exemptions
            .iter()
            .any(|pattern| pattern_matches(pattern, &full_name))
    }

    /// Checks that every configured threshold is a finite, non-negative number.
    ///
    /// Inverted tiers (for example a warning threshold above the regression
    /// threshold) are accepted but logged.
    pub fn validate(&self) -> Result<()> {
        let layers = std::iter::once(("defaults".to_string(), &self.defaults))
            .chain(
                self.categories
                    .iter()
                    .map(|(name, layer)| (format!("categories.{name}"), layer)),
            )
            .chain(
                self.critical_path
                    .iter()
                    .map(|entry| (format!("critical_path[{}]", entry.name), &entry.overrides)),
            );

        for (label, layer) in layers {
            if let Some(bad) = layer
                .values()
                .into_iter()
                .flatten()
                .find(|v| !v.is_finite() || *v < 0.0)
            {
                return Err(GateError::InvalidPolicy(format!(
                    "{label} contains threshold {bad}; thresholds must be finite and non-negative"
                )));
            }
        }

        let base = self.default_thresholds();
        if !(base.warn_pct <= base.regression_pct && base.regression_pct <= base.critical_pct) {
            warn!(
                warn = base.warn_pct,
                regression = base.regression_pct,
                critical = base.critical_pct,
                "default thresholds are not ordered warn <= regression <= critical"
            );
        }
        for entry in &self.critical_path {
            if !entry.name.contains('/') {
                warn!(name = %entry.name, "critical_path entry is not of the form category/name");
            }
        }
        Ok(())
    }
}

/// Loads and validates a policy file.
///
/// `.yaml` and `.yml` files are parsed as YAML; anything else as JSON.
pub fn load_policy(path: &Path) -> Result<ThresholdPolicy> {
    if !path.is_file() {
        return Err(GateError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| GateError::io_error(path, e))?;
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => PolicyFormat::Yaml,
        _ => PolicyFormat::Json,
    };
    let policy = parse_policy(&content, &path.display().to_string(), format)?;
    debug!(path = %path.display(), exemptions = policy.exemptions.len(), "loaded threshold policy");
    Ok(policy)
}

#[derive(Debug, Clone, Copy)]
enum PolicyFormat {
    Yaml,
    Json,
}

fn parse_policy(content: &str, source_name: &str, format: PolicyFormat) -> Result<ThresholdPolicy> {
    if content.trim().is_empty() {
        return Ok(ThresholdPolicy::default());
    }
    let policy: ThresholdPolicy = match format {
        PolicyFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| GateError::policy_parse(source_name, e))?
        }
        PolicyFormat::Json => {
            serde_json::from_str(content).map_err(|e| GateError::policy_parse(source_name, e))?
        }
    };
    policy.validate()?;
    Ok(policy)
}

fn full_name(category: &str, name: &str) -> String {
    format!("{category}/{name}")
}

fn pattern_matches(pattern: &str, full_name: &str) -> bool {
    if pattern == full_name {
        return true;
    }
    match pattern.strip_suffix('*') {
        Some(prefix) if prefix.ends_with('/') => full_name.starts_with(prefix),
        _ => false,
    }
}
