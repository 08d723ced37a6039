//! Precedence between built-in defaults, custom defaults, suite, benchmark and CLI settings,
//! observed through the number of measurements each benchmark records.

use super::test_utils::assert_iteration_counts;
use benchtier::layer;
use benchtier::settings::Iterations;
use benchtier::Suite;

fn suite(settings: Option<Iterations>, b_settings: Option<Iterations>) -> Suite {
    let mut suite = Suite::new("Test");
    if let Some(iterations) = settings {
        suite = suite.with_settings(layer![iterations]);
    }
    suite = suite.benchmark("a", || {});
    match b_settings {
        Some(iterations) => suite.benchmark_with_settings("b", layer![iterations], || {}),
        None => suite.benchmark("b", || {}),
    }
}

#[test]
fn test_default_setting() {
    assert_iteration_counts(suite(None, None), &[1_000_000, 1_000_000], layer![], layer![]);
}

#[test]
fn test_suite_setting() {
    assert_iteration_counts(suite(Some(Iterations(42)), None), &[42, 42], layer![], layer![]);
}

#[test]
fn test_benchmark_setting() {
    assert_iteration_counts(
        suite(None, Some(Iterations(42))),
        &[1_000_000, 42],
        layer![],
        layer![],
    );
}

#[test]
fn test_benchmark_setting_overrides_suite_setting() {
    assert_iteration_counts(
        suite(Some(Iterations(42)), Some(Iterations(21))),
        &[42, 21],
        layer![],
        layer![],
    );
}

#[test]
fn test_cli_setting() {
    assert_iteration_counts(suite(None, None), &[1, 1], layer![Iterations(1)], layer![]);
}

#[test]
fn test_cli_overrides_suite_setting() {
    assert_iteration_counts(
        suite(Some(Iterations(2)), None),
        &[1, 1],
        layer![Iterations(1)],
        layer![],
    );
}

#[test]
fn test_cli_overrides_benchmark_setting() {
    assert_iteration_counts(
        suite(None, Some(Iterations(2))),
        &[1, 1],
        layer![Iterations(1)],
        layer![],
    );
}

#[test]
fn test_cli_overrides_benchmark_and_suite_setting() {
    assert_iteration_counts(
        suite(Some(Iterations(2)), Some(Iterations(3))),
        &[1, 1],
        layer![Iterations(1)],
        layer![],
    );
}

#[test]
fn test_custom_defaults() {
    assert_iteration_counts(suite(None, None), &[1, 1], layer![], layer![Iterations(1)]);
}

#[test]
fn test_custom_defaults_overridden_by_suite() {
    assert_iteration_counts(
        suite(Some(Iterations(3)), None),
        &[3, 3],
        layer![],
        layer![Iterations(1)],
    );
}

#[test]
fn test_custom_defaults_overridden_by_benchmark() {
    assert_iteration_counts(
        suite(Some(Iterations(3)), Some(Iterations(4))),
        &[3, 4],
        layer![],
        layer![Iterations(1)],
    );
}

#[test]
fn test_custom_defaults_overridden_by_cli() {
    assert_iteration_counts(
        suite(Some(Iterations(3)), Some(Iterations(4))),
        &[5, 5],
        layer![Iterations(5)],
        layer![Iterations(1)],
    );
}

#[test]
fn test_last_setting_in_a_layer_wins() {
    let suite = Suite::new("Test")
        .with_settings(layer![Iterations(2), Iterations(5)])
        .benchmark("a", || {});
    assert_iteration_counts(suite, &[5], layer![], layer![]);
}

#[test]
fn test_multiple_suites_resolve_independently() {
    use benchtier::settings::{Format, Quiet};
    use benchtier::Runner;

    let first = Suite::new("first")
        .with_settings(layer![Iterations(3)])
        .benchmark("a", || {});
    let second = Suite::new("second")
        .with_settings(layer![Iterations(6)])
        .benchmark("a", || {})
        .benchmark_with_settings("b", layer![Iterations(2)], || {});

    let results = Runner::new(vec![first, second])
        .with_cli(layer![Format::None, Quiet(true)])
        .run()
        .unwrap();

    let summary: Vec<(String, usize)> = results
        .iter()
        .map(|r| (r.full_name(), r.measurements.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("first/a".to_string(), 3),
            ("second/a".to_string(), 6),
            ("second/b".to_string(), 2),
        ]
    );
}
