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

//! Benchgate: benchmark regression gate.
//!
//! Compares a current benchmark run against a baseline, classifies every
//! change against a tiered threshold policy, and renders the verdicts for a
//! terminal, a pull-request comment, or an audit receipt.
//!
//! ## Features
//!
//! - **Schema reconciliation**: simplified (`results`) and detailed
//!   (`benchmarks`) result files extract to the same [`ResultSet`]
//! - **Tiered policy**: global defaults, per-category overrides, critical-path
//!   overrides, and exemption patterns
//! - **Gating**: alert and comparison gates that map counters to exit codes
//!
//! ## Usage
//!
//! ```
//! use benchgate::{compare, Measurement, ResultSet, Status, ThresholdPolicy};
//!
//! let baseline = ResultSet::new().with("parser", "tokenize", Measurement::new(1_000_000));
//! let current = ResultSet::new().with("parser", "tokenize", Measurement::new(2_500_000));
//!
//! let comparison = compare(&baseline, &current, &ThresholdPolicy::default());
//! assert_eq!(comparison.verdicts[0].status, Status::Critical);
//! ```

pub mod compare;
pub mod error;
pub mod extract;
pub mod format;
pub mod gate;
pub mod locate;
pub mod measurement;
pub mod policy;
pub mod report;

pub use compare::{classify, compare, percent_change, Comparison, Counters, Status, Verdict};
pub use error::{GateError, Result};
pub use extract::{extract, extract_results, SchemaVariant};
pub use gate::{Gate, GateOutcome};
pub use locate::{load_snapshot, read_input, Locator};
pub use measurement::{Measurement, ResultSet, RunMetadata, Snapshot};
pub use policy::{load_policy, ThresholdPolicy, Thresholds};
pub use report::{ConsoleOptions, ReceiptRenderer, Report, ReportFormat};
