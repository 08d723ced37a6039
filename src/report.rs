//! Report rendering: console table, CSV and JSON summaries of a run.

use crate::error::RunError;
use crate::runner::BenchmarkResult;
use crate::settings::{Format, TimeUnit};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// Summary statistics over one benchmark's measurements, in nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub iterations: usize,
    pub warmup_iterations: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Standard deviation as a percentage of the mean
    pub std_dev_pct: f64,
}

impl Summary {
    pub fn from_measurements(measurements: &[f64], warmup_iterations: usize) -> Self {
        let iterations = measurements.len();
        if iterations == 0 {
            return Self {
                iterations,
                warmup_iterations,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                median: 0.0,
                std_dev: 0.0,
                std_dev_pct: 0.0,
            };
        }

        let mut sorted = measurements.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = iterations as f64;
        let mean = sorted.iter().sum::<f64>() / count;
        let median = if iterations % 2 == 0 {
            (sorted[iterations / 2 - 1] + sorted[iterations / 2]) / 2.0
        } else {
            sorted[iterations / 2]
        };
        let variance = if iterations > 1 {
            sorted.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / (count - 1.0)
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let std_dev_pct = if mean > 0.0 { std_dev / mean * 100.0 } else { 0.0 };

        Self {
            iterations,
            warmup_iterations,
            min: sorted[0],
            max: sorted[iterations - 1],
            mean,
            median,
            std_dev,
            std_dev_pct,
        }
    }

    pub fn of(result: &BenchmarkResult) -> Self {
        Self::from_measurements(&result.measurements, result.warmup_measurements.len())
    }
}

#[derive(Serialize)]
struct JsonBenchmark<'a> {
    name: String,
    suite: &'a str,
    benchmark: &'a str,
    time_unit: TimeUnit,
    iterations: usize,
    warmup_iterations: usize,
    median: f64,
    mean: f64,
    min: f64,
    max: f64,
    std_dev_pct: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    benchmarks: Vec<JsonBenchmark<'a>>,
}

fn time_unit(result: &BenchmarkResult) -> TimeUnit {
    *result.configuration.get::<TimeUnit>()
}

/// Render every result in its own resolved `Format` and `TimeUnit`.
///
/// Results sharing a format are rendered together, groups ordered by first appearance. Results
/// resolved to `Format::None` are left out; `None` when nothing is left to render.
pub fn render(results: &[BenchmarkResult]) -> Result<Option<String>, RunError> {
    let mut groups: Vec<(Format, Vec<&BenchmarkResult>)> = Vec::new();
    for result in results {
        let format = *result.configuration.get::<Format>();
        if format == Format::None {
            continue;
        }
        match groups.iter_mut().find(|(existing, _)| *existing == format) {
            Some((_, group)) => group.push(result),
            None => groups.push((format, vec![result])),
        }
    }

    let mut sections = Vec::with_capacity(groups.len());
    for (format, group) in groups {
        match format {
            Format::Console => sections.push(render_console(&group)),
            Format::Csv => sections.push(render_csv(&group)),
            Format::Json => sections.push(render_json(&group)?),
            Format::None => {}
        }
    }

    if sections.is_empty() {
        Ok(None)
    } else {
        Ok(Some(sections.join("\n\n")))
    }
}

fn render_console(results: &[&BenchmarkResult]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["name", "time", "std", "iterations", "warmup"]);
    for result in results {
        let summary = Summary::of(result);
        let unit = time_unit(result);
        table.add_row(vec![
            result.full_name(),
            format!("{:.3} {}", unit.convert(summary.median), unit),
            format!("± {:.2} %", summary.std_dev_pct),
            summary.iterations.to_string(),
            summary.warmup_iterations.to_string(),
        ]);
    }
    table.to_string()
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_csv(results: &[&BenchmarkResult]) -> String {
    let mut lines = vec!["name,time,unit,std_pct,iterations,warmup".to_string()];
    for result in results {
        let summary = Summary::of(result);
        let unit = time_unit(result);
        lines.push(format!(
            "{},{:.3},{},{:.2},{},{}",
            csv_field(&result.full_name()),
            unit.convert(summary.median),
            unit,
            summary.std_dev_pct,
            summary.iterations,
            summary.warmup_iterations
        ));
    }
    lines.join("\n")
}

fn render_json(results: &[&BenchmarkResult]) -> Result<String, RunError> {
    let benchmarks = results
        .iter()
        .map(|result| {
            let summary = Summary::of(result);
            let unit = time_unit(result);
            JsonBenchmark {
                name: result.full_name(),
                suite: &result.suite_name,
                benchmark: &result.benchmark_name,
                time_unit: unit,
                iterations: summary.iterations,
                warmup_iterations: summary.warmup_iterations,
                median: unit.convert(summary.median),
                mean: unit.convert(summary.mean),
                min: unit.convert(summary.min),
                max: unit.convert(summary.max),
                std_dev_pct: summary.std_dev_pct,
            }
        })
        .collect();

    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        benchmarks,
    };
    serde_json::to_string_pretty(&report).map_err(|e| RunError::Report(e.to_string()))
}
