//! Custom defaults loaded from configuration files

use super::test_utils::assert_iteration_counts;
use benchtier::config::{ConfigLoader, WORKSPACE_FILE};
use benchtier::layer;
use benchtier::settings::{Format, Iterations, Quiet, TimeUnit};
use benchtier::{Registry, Runner, Suite, Tier};
use std::fs;
use tempfile::TempDir;

fn two_benchmarks(b_iterations: Option<u64>) -> Suite {
    let suite = Suite::new("Test").benchmark("a", || {});
    match b_iterations {
        Some(n) => suite.benchmark_with_settings("b", layer![Iterations(n)], || {}),
        None => suite.benchmark("b", || {}),
    }
}

#[test]
fn test_workspace_file_supplies_custom_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(WORKSPACE_FILE),
        "[defaults]\niterations = 7\ntime_unit = \"ms\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_sources(None, dir.path()).unwrap();
    let defaults = config.defaults_layer(&Registry::builtin()).unwrap();
    assert_eq!(defaults.get::<Iterations>(), Some(&Iterations(7)));
    assert_eq!(defaults.get::<TimeUnit>(), Some(&TimeUnit::Ms));

    assert_iteration_counts(two_benchmarks(Some(2)), &[7, 2], layer![], defaults);
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    fs::write(&global, "[defaults]\niterations = 4\nwarmup_iterations = 2\n").unwrap();
    fs::write(dir.path().join(WORKSPACE_FILE), "[defaults]\niterations = 9\n").unwrap();

    let config = ConfigLoader::load_from_sources(Some(&global), dir.path()).unwrap();
    let defaults = config.defaults_layer(&Registry::builtin()).unwrap();

    let results = Runner::new(vec![two_benchmarks(None)])
        .with_custom_defaults(defaults)
        .with_cli(layer![Format::None, Quiet(true)])
        .run()
        .unwrap();
    for result in &results {
        assert_eq!(result.measurements.len(), 9);
        assert_eq!(result.warmup_measurements.len(), 2);
        assert_eq!(
            result.configuration.origin::<Iterations>(),
            Some(Tier::CustomDefaults)
        );
    }
}

#[test]
fn test_cli_overrides_file_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.toml");
    fs::write(&path, "[defaults]\niterations = 7\n").unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let defaults = config.defaults_layer(&Registry::builtin()).unwrap();
    assert_iteration_counts(two_benchmarks(Some(2)), &[1, 1], layer![Iterations(1)], defaults);
}

#[test]
fn test_unknown_setting_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.toml");
    fs::write(&path, "[defaults]\nrepeats = 3\n").unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let err = config.defaults_layer(&Registry::builtin()).unwrap_err();
    assert!(err.to_string().contains("repeats"));
}

#[test]
fn test_invalid_value_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("defaults.toml");
    fs::write(&path, "[defaults]\ntime_unit = \"fortnights\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert!(config.defaults_layer(&Registry::builtin()).is_err());
}
