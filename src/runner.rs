//! Runner
//!
//! Resolves the configuration of every declared benchmark, then executes the selected ones. The
//! precedence chain for each benchmark is always custom defaults, suite, benchmark, CLI, on top of
//! the registry's built-in defaults. All configurations are resolved (and all layers checked)
//! before the first benchmark executes, so a misconfigured run fails before measuring anything.

use crate::error::{RunError, SettingsError};
use crate::resolve::{resolve, Configuration, PrecedenceChain};
use crate::settings::{
    Filter, FilterNot, Format, Iterations, Layer, Quiet, Registry, SettingKey, TimeUnit,
    WarmupIterations,
};
use crate::suite::{Benchmark, Suite};
use owo_colors::OwoColorize;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Settings the runner and reporters read directly; a custom registry must provide them.
fn required_keys() -> [SettingKey; 7] {
    [
        SettingKey::of::<Iterations>(),
        SettingKey::of::<WarmupIterations>(),
        SettingKey::of::<Filter>(),
        SettingKey::of::<FilterNot>(),
        SettingKey::of::<TimeUnit>(),
        SettingKey::of::<Format>(),
        SettingKey::of::<Quiet>(),
    ]
}

/// A benchmark selected to run, with its resolved configuration.
#[derive(Debug)]
pub struct PlannedBenchmark<'r> {
    pub suite: &'r Suite,
    pub benchmark: &'r Benchmark,
    pub configuration: Configuration,
}

impl PlannedBenchmark<'_> {
    pub fn full_name(&self) -> String {
        full_name(self.suite, self.benchmark)
    }
}

fn full_name(suite: &Suite, benchmark: &Benchmark) -> String {
    format!("{}/{}", suite.name(), benchmark.name())
}

/// Outcome of one executed benchmark.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub suite_name: String,
    pub benchmark_name: String,
    /// Measured iteration times in nanoseconds
    pub measurements: Vec<f64>,
    /// Warmup iteration times in nanoseconds
    pub warmup_measurements: Vec<f64>,
    pub configuration: Configuration,
}

impl BenchmarkResult {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.suite_name, self.benchmark_name)
    }
}

/// Compiled filter patterns, keyed by their source text.
#[derive(Default)]
struct FilterCache {
    compiled: HashMap<String, Regex>,
}

impl FilterCache {
    fn compile(&mut self, pattern: &str) -> Result<&Regex, RunError> {
        let regex = match self.compiled.entry(pattern.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let regex = Regex::new(pattern).map_err(|e| RunError::InvalidFilter {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
                entry.insert(regex)
            }
        };
        Ok(regex)
    }

    /// Compile every filter pattern a layer mentions, overridden ones included.
    fn compile_layer(&mut self, layer: &Layer) -> Result<(), RunError> {
        for setting in layer {
            let pattern = match (
                setting.downcast_ref::<Filter>(),
                setting.downcast_ref::<FilterNot>(),
            ) {
                (Some(Filter(Some(pattern))), _) | (_, Some(FilterNot(Some(pattern)))) => pattern,
                _ => continue,
            };
            self.compile(pattern)?;
        }
        Ok(())
    }

    fn selects(&mut self, configuration: &Configuration, name: &str) -> Result<bool, RunError> {
        if let Some(pattern) = &configuration.get::<Filter>().0 {
            if !self.compile(pattern)?.is_match(name) {
                return Ok(false);
            }
        }
        if let Some(pattern) = &configuration.get::<FilterNot>().0 {
            if self.compile(pattern)?.is_match(name) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Drives a set of suites under one set of custom defaults and CLI settings.
pub struct Runner {
    registry: Arc<Registry>,
    suites: Vec<Suite>,
    custom_defaults: Layer,
    cli: Layer,
}

impl Runner {
    pub fn new(suites: Vec<Suite>) -> Self {
        Self {
            registry: Arc::new(Registry::builtin()),
            suites,
            custom_defaults: Layer::new(),
            cli: Layer::new(),
        }
    }

    /// Use a registry extended with custom settings; it must still hold the built-in ones.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_custom_defaults(mut self, custom_defaults: Layer) -> Self {
        self.custom_defaults = custom_defaults;
        self
    }

    pub fn with_cli(mut self, cli: Layer) -> Self {
        self.cli = cli;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Verify that the registry and every layer are usable for resolution.
    pub fn check(&self) -> Result<(), RunError> {
        if let Some(missing) = required_keys()
            .into_iter()
            .find(|key| !self.registry.contains(*key))
        {
            return Err(SettingsError::Unregistered(missing.name()).into());
        }

        let mut filters = FilterCache::default();
        let mut check_layer = |layer: &Layer| -> Result<(), RunError> {
            self.registry.check_layer(layer)?;
            filters.compile_layer(layer)
        };
        check_layer(&self.custom_defaults)?;
        check_layer(&self.cli)?;
        for suite in &self.suites {
            check_layer(suite.settings())?;
            for benchmark in suite.benchmarks() {
                check_layer(benchmark.settings())?;
            }
        }
        Ok(())
    }

    /// Settings as they stand outside any suite: built-in defaults, custom defaults and CLI
    /// settings, without any suite or benchmark layer.
    pub fn run_configuration(&self) -> Result<Configuration, RunError> {
        self.check()?;
        let chain = PrecedenceChain::new()
            .with_custom_defaults(&self.custom_defaults)
            .with_cli(&self.cli);
        Ok(resolve(&self.registry, &chain))
    }

    /// Resolve every benchmark and keep the ones selected by their filters, in declaration order.
    pub fn plan(&self) -> Result<Vec<PlannedBenchmark<'_>>, RunError> {
        self.check()?;

        let mut filters = FilterCache::default();
        let mut planned = Vec::new();
        for suite in &self.suites {
            for benchmark in suite.benchmarks() {
                let chain = PrecedenceChain::new()
                    .with_custom_defaults(&self.custom_defaults)
                    .with_suite(suite.settings())
                    .with_benchmark(benchmark.settings())
                    .with_cli(&self.cli);
                let configuration = resolve(&self.registry, &chain);
                let name = full_name(suite, benchmark);

                if !filters.selects(&configuration, &name)? {
                    debug!(benchmark = %name, "Benchmark skipped by filter");
                    continue;
                }

                debug!(
                    benchmark = %name,
                    iterations = configuration.get::<Iterations>().0,
                    warmup_iterations = configuration.get::<WarmupIterations>().0,
                    "Resolved benchmark settings"
                );
                planned.push(PlannedBenchmark {
                    suite,
                    benchmark,
                    configuration,
                });
            }
        }
        Ok(planned)
    }

    /// Plan, then execute every selected benchmark.
    pub fn run(&self) -> Result<Vec<BenchmarkResult>, RunError> {
        let planned = self.plan()?;
        info!(benchmarks = planned.len(), "Starting benchmark run");

        let results: Vec<BenchmarkResult> = planned.into_iter().map(execute).collect();

        info!(benchmarks = results.len(), "Benchmark run finished");
        Ok(results)
    }
}

fn measure(benchmark: &Benchmark, iterations: u64) -> Vec<f64> {
    (0..iterations)
        .map(|_| {
            let start = Instant::now();
            benchmark.run_once();
            start.elapsed().as_nanos() as f64
        })
        .collect()
}

fn execute(planned: PlannedBenchmark<'_>) -> BenchmarkResult {
    let name = planned.full_name();
    let configuration = planned.configuration;
    let iterations = configuration.get::<Iterations>().0;
    let warmup_iterations = configuration.get::<WarmupIterations>().0;
    let quiet = configuration.get::<Quiet>().0;
    let time_unit = *configuration.get::<TimeUnit>();

    if !quiet {
        eprint!("running {}...", name);
    }
    let started = Instant::now();
    let warmup_measurements = measure(planned.benchmark, warmup_iterations);
    let measurements = measure(planned.benchmark, iterations);
    let elapsed: Duration = started.elapsed();
    if !quiet {
        eprintln!(" {} ({})", "done!".green(), time_unit.format(elapsed));
    }

    debug!(
        benchmark = %name,
        measurements = measurements.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Benchmark executed"
    );

    BenchmarkResult {
        suite_name: planned.suite.name().to_string(),
        benchmark_name: planned.benchmark.name().to_string(),
        measurements,
        warmup_measurements,
        configuration,
    }
}
