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

//! Comparator and renderer throughput over large result sets.

use benchgate::report::{render_markdown, Report};
use benchgate::{compare, extract_results, Measurement, ResultSet, ThresholdPolicy};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Map, Value};

fn result_set(categories: usize, per_category: usize, scale: u64) -> ResultSet {
    let mut set = ResultSet::new();
    for c in 0..categories {
        for b in 0..per_category {
            let mean = 1_000 + (c * per_category + b) as u64 * 17;
            set.insert(format!("cat{c}"), format!("bench{b}"), Measurement::new(mean * scale / 100));
        }
    }
    set
}

fn simplified_doc(categories: usize, per_category: usize) -> Value {
    let mut results = Map::new();
    for c in 0..categories {
        let mut entries = Map::new();
        for b in 0..per_category {
            entries.insert(format!("bench{b}"), json!({ "mean_ns": 1_000 + b * 13 }));
        }
        results.insert(format!("cat{c}"), Value::Object(entries));
    }
    json!({ "version": "1.0.0", "results": results })
}

fn policy() -> ThresholdPolicy {
    ThresholdPolicy::from_yaml_str(
        "categories:\n  cat1:\n    regression_threshold_pct: 5\n\
         critical_path:\n  - name: cat0/bench0\n    critical_threshold_pct: 10\n\
         exemptions:\n  - cat2/*\n",
    )
    .unwrap()
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let policy = policy();

    for (name, categories, per_category) in [("small", 4, 25), ("medium", 10, 200), ("large", 20, 500)] {
        let baseline = result_set(categories, per_category, 100);
        let current = result_set(categories, per_category, 115);

        group.throughput(Throughput::Elements((categories * per_category) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(baseline, current), |b, (base, cur)| {
            b.iter(|| black_box(compare(base, cur, &policy)));
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for (name, categories, per_category) in [("small", 4, 25), ("large", 20, 500)] {
        let doc = simplified_doc(categories, per_category);
        group.throughput(Throughput::Elements((categories * per_category) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| black_box(extract_results(doc)));
        });
    }

    group.finish();
}

fn bench_markdown(c: &mut Criterion) {
    let baseline = result_set(10, 200, 100);
    let current = result_set(10, 200, 130);
    let report = Report {
        baseline: Default::default(),
        current: Default::default(),
        comparison: compare(&baseline, &current, &policy()),
        current_results: current,
        policy_source: None,
    };

    c.bench_function("render_markdown", |b| {
        b.iter(|| black_box(render_markdown(&report)));
    });
}

criterion_group!(benches, bench_compare, bench_extract, bench_markdown);
criterion_main!(benches);
