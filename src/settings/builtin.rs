//! Built-in settings understood by the runner and the reporters.

use super::{ParseSetting, Setting};
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

fn parse_count(name: &'static str, raw: &str) -> Result<u64, SettingsError> {
    raw.trim()
        .replace('_', "")
        .parse::<u64>()
        .map_err(|e| SettingsError::invalid(name, raw, e.to_string()))
}

fn parse_pattern(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Number of measured iterations per benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iterations(pub u64);

impl Setting for Iterations {
    const NAME: &'static str = "iterations";

    fn default_value() -> Self {
        Iterations(1_000_000)
    }
}

impl ParseSetting for Iterations {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        parse_count(Self::NAME, raw).map(Iterations)
    }

    fn to_raw(&self) -> String {
        self.0.to_string()
    }
}

/// Number of unmeasured iterations run before measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupIterations(pub u64);

impl Setting for WarmupIterations {
    const NAME: &'static str = "warmup_iterations";

    fn default_value() -> Self {
        WarmupIterations(0)
    }
}

impl ParseSetting for WarmupIterations {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        parse_count(Self::NAME, raw).map(WarmupIterations)
    }

    fn to_raw(&self) -> String {
        self.0.to_string()
    }
}

/// Only run benchmarks whose `suite/name` matches this regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter(pub Option<String>);

impl Filter {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Filter(Some(pattern.into()))
    }
}

impl Setting for Filter {
    const NAME: &'static str = "filter";

    fn default_value() -> Self {
        Filter(None)
    }
}

impl ParseSetting for Filter {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        Ok(Filter(parse_pattern(raw)))
    }

    fn to_raw(&self) -> String {
        self.0.clone().unwrap_or_default()
    }
}

/// Skip benchmarks whose `suite/name` matches this regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterNot(pub Option<String>);

impl FilterNot {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        FilterNot(Some(pattern.into()))
    }
}

impl Setting for FilterNot {
    const NAME: &'static str = "filter_not";

    fn default_value() -> Self {
        FilterNot(None)
    }
}

impl ParseSetting for FilterNot {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        Ok(FilterNot(parse_pattern(raw)))
    }

    fn to_raw(&self) -> String {
        self.0.clone().unwrap_or_default()
    }
}

/// Unit used when reporting measured times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Ns,
    Us,
    Ms,
    S,
}

impl TimeUnit {
    /// Nanoseconds per one of this unit
    pub fn nanos(self) -> f64 {
        match self {
            TimeUnit::Ns => 1.0,
            TimeUnit::Us => 1_000.0,
            TimeUnit::Ms => 1_000_000.0,
            TimeUnit::S => 1_000_000_000.0,
        }
    }

    pub fn convert(self, nanos: f64) -> f64 {
        nanos / self.nanos()
    }

    pub fn format(self, duration: Duration) -> String {
        format!("{:.3} {}", self.convert(duration.as_nanos() as f64), self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Setting for TimeUnit {
    const NAME: &'static str = "time_unit";

    fn default_value() -> Self {
        TimeUnit::Ns
    }
}

impl ParseSetting for TimeUnit {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ns" => Ok(TimeUnit::Ns),
            "us" | "µs" => Ok(TimeUnit::Us),
            "ms" => Ok(TimeUnit::Ms),
            "s" => Ok(TimeUnit::S),
            _ => Err(SettingsError::invalid(
                Self::NAME,
                raw,
                "expected one of: ns, us, ms, s",
            )),
        }
    }

    fn to_raw(&self) -> String {
        self.as_str().to_string()
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Console,
    Csv,
    Json,
    None,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Console => "console",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::None => "none",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Setting for Format {
    const NAME: &'static str = "format";

    fn default_value() -> Self {
        Format::Console
    }
}

impl ParseSetting for Format {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Format::Console),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "none" => Ok(Format::None),
            _ => Err(SettingsError::invalid(
                Self::NAME,
                raw,
                "expected one of: console, csv, json, none",
            )),
        }
    }

    fn to_raw(&self) -> String {
        self.as_str().to_string()
    }
}

/// Suppress progress output while benchmarks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quiet(pub bool);

impl Setting for Quiet {
    const NAME: &'static str = "quiet";

    fn default_value() -> Self {
        Quiet(false)
    }
}

impl ParseSetting for Quiet {
    fn parse(raw: &str) -> Result<Self, SettingsError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Quiet(true)),
            "false" | "no" | "off" | "0" => Ok(Quiet(false)),
            _ => Err(SettingsError::invalid(Self::NAME, raw, "expected a boolean")),
        }
    }

    fn to_raw(&self) -> String {
        self.0.to_string()
    }
}
