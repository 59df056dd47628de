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

//! Benchgate CLI library for argument parsing and command execution.
//!
//! # Commands
//!
//! - **alert**: policy-driven alert report (terminal or markdown), gated
//!   with `--check`
//! - **compare**: baseline comparison (terminal, markdown, or receipt),
//!   gated with `--fail-on-regression`
//!
//! # Exit Codes
//!
//! - `0`: report written and no gate tripped
//! - `1`: configuration or input error, or a tripped gate

pub mod cli;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};
