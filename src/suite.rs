//! Suite and benchmark declarations.

use crate::settings::Layer;
use std::fmt;
use std::sync::Arc;

/// Body of a benchmark: the work measured once per iteration.
pub type BenchmarkBody = Arc<dyn Fn() + Send + Sync>;

/// A named piece of measured work with its own settings layer.
#[derive(Clone)]
pub struct Benchmark {
    name: String,
    settings: Layer,
    body: BenchmarkBody,
}

impl Benchmark {
    pub fn new(name: impl Into<String>, body: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            settings: Layer::new(),
            body: Arc::new(body),
        }
    }

    pub fn with_settings(mut self, settings: Layer) -> Self {
        self.settings = settings;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &Layer {
        &self.settings
    }

    pub fn run_once(&self) {
        (self.body)()
    }
}

impl fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Named group of benchmarks sharing suite-level settings.
///
/// ```
/// use benchtier::layer;
/// use benchtier::settings::Iterations;
/// use benchtier::Suite;
///
/// let suite = Suite::new("strings")
///     .with_settings(layer![Iterations(1_000)])
///     .benchmark("concat", || {
///         let _ = String::from("a") + "b";
///     })
///     .benchmark_with_settings("format", layer![Iterations(10)], || {
///         let _ = format!("{}{}", "a", "b");
///     });
/// assert_eq!(suite.benchmarks().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Suite {
    name: String,
    settings: Layer,
    benchmarks: Vec<Benchmark>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Layer::new(),
            benchmarks: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: Layer) -> Self {
        self.settings = settings;
        self
    }

    pub fn benchmark(self, name: impl Into<String>, body: impl Fn() + Send + Sync + 'static) -> Self {
        self.add(Benchmark::new(name, body))
    }

    pub fn benchmark_with_settings(
        self,
        name: impl Into<String>,
        settings: Layer,
        body: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.add(Benchmark::new(name, body).with_settings(settings))
    }

    pub fn add(mut self, benchmark: Benchmark) -> Self {
        self.benchmarks.push(benchmark);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &Layer {
        &self.settings
    }

    /// Benchmarks in declaration order
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }
}
