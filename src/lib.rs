//! Benchtier: micro-benchmark harness with layered, typed settings
//!
//! Every benchmark runs under a configuration resolved from five tiers, lowest to highest:
//! built-in defaults, custom defaults, suite settings, benchmark settings and command-line
//! settings. Settings are plain Rust types; the type is the key, so a layer can never hold a
//! value of the wrong type for a setting.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod resolve;
pub mod runner;
pub mod settings;
pub mod suite;

pub use cli::{main, main_with_defaults};
pub use error::{RunError, SettingsError};
pub use resolve::{resolve, Configuration, PrecedenceChain, Tier};
pub use runner::{BenchmarkResult, Runner};
pub use settings::{Layer, Registry, Setting, SettingKey, SettingValue};
pub use suite::{Benchmark, Suite};
