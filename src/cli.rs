//! CLI: argument types and the harness entry point.
//!
//! Setting flags become the CLI layer, the highest-precedence tier for every benchmark. The
//! remaining flags select the custom-defaults file and configure logging.

use crate::config::{ConfigLoader, HarnessConfig};
use crate::logging::{init_logging, LoggingConfig};
use crate::report;
use crate::resolve::Configuration;
use crate::runner::Runner;
use crate::settings::{
    Filter, FilterNot, Format, Iterations, Layer, ParseSetting, Quiet, Registry, TimeUnit,
    WarmupIterations,
};
use crate::suite::Suite;
use anyhow::Context;
use clap::Parser;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

fn parse_setting<S: ParseSetting>(raw: &str) -> Result<S, crate::error::SettingsError> {
    S::parse(raw)
}

/// Benchmark harness command line
#[derive(Parser, Debug)]
#[command(about = "Run micro-benchmarks with layered settings")]
pub struct Cli {
    /// Only run benchmarks whose `suite/name` matches this regular expression
    #[arg(long, value_parser = parse_setting::<Filter>)]
    pub filter: Option<Filter>,

    /// Skip benchmarks whose `suite/name` matches this regular expression
    #[arg(long, value_parser = parse_setting::<FilterNot>)]
    pub filter_not: Option<FilterNot>,

    /// Number of measured iterations, overriding every suite and benchmark
    #[arg(long, value_parser = parse_setting::<Iterations>)]
    pub iterations: Option<Iterations>,

    /// Number of warmup iterations, overriding every suite and benchmark
    #[arg(long, value_parser = parse_setting::<WarmupIterations>)]
    pub warmup_iterations: Option<WarmupIterations>,

    /// Time unit for reports (ns, us, ms, s)
    #[arg(long, value_parser = parse_setting::<TimeUnit>)]
    pub time_unit: Option<TimeUnit>,

    /// Report format (console, csv, json, none)
    #[arg(long, value_parser = parse_setting::<Format>)]
    pub format: Option<Format>,

    /// Suppress progress output (`--quiet false` turns it back on)
    #[arg(
        long,
        value_parser = parse_setting::<Quiet>,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub quiet: Option<Quiet>,

    /// Custom defaults file (skips global and workspace config discovery)
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Workspace root searched for benchtier.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Print each benchmark's resolved settings and where they came from, then exit
    #[arg(long)]
    pub show_settings: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The CLI layer: one setting per flag given, in a fixed order.
    pub fn settings_layer(&self) -> Layer {
        let mut layer = Layer::new();
        if let Some(filter) = &self.filter {
            layer = layer.with(filter.clone());
        }
        if let Some(filter_not) = &self.filter_not {
            layer = layer.with(filter_not.clone());
        }
        if let Some(iterations) = self.iterations {
            layer = layer.with(iterations);
        }
        if let Some(warmup) = self.warmup_iterations {
            layer = layer.with(warmup);
        }
        if let Some(time_unit) = self.time_unit {
            layer = layer.with(time_unit);
        }
        if let Some(format) = self.format {
            layer = layer.with(format);
        }
        if let Some(quiet) = self.quiet {
            layer = layer.with(quiet);
        }
        layer
    }

    /// Harness configuration from `--defaults`, or discovered from the workspace
    pub fn load_config(&self) -> anyhow::Result<HarnessConfig> {
        match &self.defaults {
            Some(path) => ConfigLoader::load_from_file(path)
                .with_context(|| format!("Failed to load defaults file {}", path.display())),
            None => ConfigLoader::load(&self.workspace).context("Failed to load configuration"),
        }
    }

    /// Logging configuration: CLI flags override the configuration file.
    pub fn logging_config(&self, file_config: &LoggingConfig) -> LoggingConfig {
        let mut config = file_config.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

/// Run the harness over `suites` using the process arguments.
pub fn main(suites: Vec<Suite>) -> ExitCode {
    main_with_defaults(suites, Layer::new())
}

/// [`main`] with code-supplied custom defaults. Values from configuration files are applied after
/// these, within the same custom-defaults tier.
pub fn main_with_defaults(suites: Vec<Suite>, custom_defaults: Layer) -> ExitCode {
    let cli = Cli::parse();

    let file_config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&cli.logging_config(&file_config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run_with_config(&cli, &file_config, suites, custom_defaults) {
        Ok(Some(output)) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Benchmark run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Build the runner for parsed arguments and run it, returning the rendered report.
pub fn run_with_config(
    cli: &Cli,
    file_config: &HarnessConfig,
    suites: Vec<Suite>,
    custom_defaults: Layer,
) -> anyhow::Result<Option<String>> {
    let registry = Arc::new(Registry::builtin());
    let file_defaults = file_config
        .defaults_layer(&registry)
        .context("Invalid custom defaults")?;

    let runner = Runner::new(suites)
        .with_registry(registry)
        .with_custom_defaults(custom_defaults.merged(&file_defaults))
        .with_cli(cli.settings_layer());

    if cli.show_settings {
        let planned = runner.plan()?;
        let rows: Vec<(String, &Configuration)> = planned
            .iter()
            .map(|p| (p.full_name(), &p.configuration))
            .collect();
        return Ok(Some(format_settings(runner.registry(), &rows)));
    }

    let results = runner.run()?;
    info!(benchmarks = results.len(), "Rendering report");
    Ok(report::render(&results)?)
}

/// Table of resolved settings per benchmark with the tier each value came from. Values are shown
/// in the text form accepted by flags and defaults files.
pub fn format_settings(registry: &Registry, rows: &[(String, &Configuration)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["benchmark", "setting", "value", "from"]);
    for (name, configuration) in rows {
        for (key, entry) in configuration.iter() {
            table.add_row(vec![
                name.clone(),
                key.name().to_string(),
                registry.display(&entry.value),
                entry.origin.to_string(),
            ]);
        }
    }
    table.to_string()
}
