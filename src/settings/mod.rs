//! Setting model
//!
//! A setting is a typed configuration value whose Rust type is its identity. Each setting type
//! declares a stable name and a built-in default; values travel through layers type-erased as
//! [`SettingValue`] and are recovered by type on the resolved configuration.

mod builtin;
mod layer;
mod registry;
mod value;

pub use builtin::{
    Filter, FilterNot, Format, Iterations, Quiet, TimeUnit, WarmupIterations,
};
pub use layer::Layer;
pub use registry::Registry;
pub use value::SettingValue;

use crate::error::SettingsError;
use std::any::{Any, TypeId};
use std::fmt::{self, Debug};

/// A configurable dimension of a benchmark run.
///
/// Implementors are small value types (`Iterations(42)`, `Quiet(true)`). The type itself is the
/// key: two values of the same type always address the same dimension, and a key can never carry
/// a payload of a different type.
pub trait Setting: Any + Clone + Debug + PartialEq + Send + Sync {
    /// Stable name used in files, CLI flags and diagnostics
    const NAME: &'static str;

    /// Built-in default, used when no layer specifies this setting
    fn default_value() -> Self;
}

/// A setting that can be read from text (CLI flags, custom-defaults files).
pub trait ParseSetting: Setting {
    fn parse(raw: &str) -> Result<Self, SettingsError>;

    /// Text that [`ParseSetting::parse`] reads back as an equal value
    fn to_raw(&self) -> String;
}

/// Identity of a setting type, independent of any payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingKey {
    name: &'static str,
    id: TypeId,
}

impl SettingKey {
    pub fn of<S: Setting>() -> Self {
        Self {
            name: S::NAME,
            id: TypeId::of::<S>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Debug for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SettingKey({})", self.name)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
