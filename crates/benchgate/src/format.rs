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

//! Shared formatting helpers used by every report.

/// Formats nanoseconds as a human-readable duration.
///
/// ```
/// use benchgate::format::format_duration;
///
/// assert_eq!(format_duration(999), "999ns");
/// assert_eq!(format_duration(1_500), "1.5µs");
/// assert_eq!(format_duration(1_300_000), "1.3ms");
/// assert_eq!(format_duration(2_000_000_000), "2.00s");
/// ```
pub fn format_duration(ns: u64) -> String {
    if ns < 1_000 {
        format!("{}ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.1}µs", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.1}ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", ns as f64 / 1_000_000_000.0)
    }
}

/// Formats a percentage with an explicit sign and one decimal.
pub fn format_pct(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.1}%", pct.abs())
    } else {
        format!("{:.1}%", pct)
    }
}

/// Shortens a commit SHA to eight characters.
pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(8) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(0), "0ns");
        assert_eq!(format_duration(1_000), "1.0µs");
        assert_eq!(format_duration(999_999), "1000.0µs");
        assert_eq!(format_duration(1_000_000), "1.0ms");
        assert_eq!(format_duration(1_000_000_000), "1.00s");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(30.0), "+30.0%");
        assert_eq!(format_pct(0.0), "+0.0%");
        assert_eq!(format_pct(-12.46), "-12.5%");
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "01234567");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha("unknown"), "unknown");
    }
}
