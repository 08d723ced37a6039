//! Precedence chain: the fixed five-tier order of layers for one benchmark.

use crate::settings::Layer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Precedence tier a resolved value came from, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Builtin,
    CustomDefaults,
    Suite,
    Benchmark,
    Cli,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Builtin => "builtin",
            Tier::CustomDefaults => "custom_defaults",
            Tier::Suite => "suite",
            Tier::Benchmark => "benchmark",
            Tier::Cli => "cli",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed layers for one resolution.
///
/// Each tier has its own slot, so the order layers are attached in has no effect: iteration always
/// goes custom defaults, suite, benchmark, CLI. Built-in defaults are implicit and come from the
/// registry. Missing tiers are treated as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecedenceChain<'a> {
    custom_defaults: Option<&'a Layer>,
    suite: Option<&'a Layer>,
    benchmark: Option<&'a Layer>,
    cli: Option<&'a Layer>,
}

impl<'a> PrecedenceChain<'a> {
    /// Chain with built-in defaults only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom_defaults(mut self, layer: &'a Layer) -> Self {
        self.custom_defaults = Some(layer);
        self
    }

    pub fn with_suite(mut self, layer: &'a Layer) -> Self {
        self.suite = Some(layer);
        self
    }

    pub fn with_benchmark(mut self, layer: &'a Layer) -> Self {
        self.benchmark = Some(layer);
        self
    }

    pub fn with_cli(mut self, layer: &'a Layer) -> Self {
        self.cli = Some(layer);
        self
    }

    /// Non-builtin layers in increasing precedence
    pub fn layers(&self) -> impl Iterator<Item = (Tier, &'a Layer)> {
        [
            (Tier::CustomDefaults, self.custom_defaults),
            (Tier::Suite, self.suite),
            (Tier::Benchmark, self.benchmark),
            (Tier::Cli, self.cli),
        ]
        .into_iter()
        .filter_map(|(tier, layer)| layer.map(|layer| (tier, layer)))
    }
}
