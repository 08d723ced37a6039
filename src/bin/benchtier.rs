//! Benchtier demo binary
//!
//! A handful of small suites showing suite-level and benchmark-level settings. Run with
//! `--show-settings` to see how each benchmark's settings were resolved.

use benchtier::layer;
use benchtier::settings::{Iterations, TimeUnit, WarmupIterations};
use benchtier::Suite;
use std::collections::HashMap;
use std::hint::black_box;
use std::process::ExitCode;

fn strings() -> Suite {
    Suite::new("strings")
        .with_settings(layer![Iterations(10_000), WarmupIterations(100)])
        .benchmark("concat", || {
            let s = String::from("bench") + black_box("tier");
            black_box(s);
        })
        .benchmark("format", || {
            black_box(format!("{}-{}", black_box("bench"), black_box(42)));
        })
        .benchmark_with_settings("repeat", layer![Iterations(1_000)], || {
            black_box(black_box("ab").repeat(256));
        })
}

fn collections() -> Suite {
    Suite::new("collections")
        .with_settings(layer![Iterations(1_000), TimeUnit::Us])
        .benchmark("vec_push", || {
            let mut v = Vec::new();
            for i in 0..black_box(1_000u32) {
                v.push(i);
            }
            black_box(v);
        })
        .benchmark("hashmap_insert", || {
            let mut map = HashMap::new();
            for i in 0..black_box(1_000u32) {
                map.insert(i, i);
            }
            black_box(map);
        })
}

fn main() -> ExitCode {
    benchtier::main(vec![strings(), collections()])
}
