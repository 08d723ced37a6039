//! Setting registry: built-in defaults and text parsers for every known setting.

use super::builtin::{Filter, FilterNot, Format, Iterations, Quiet, TimeUnit, WarmupIterations};
use super::{Layer, ParseSetting, Setting, SettingKey, SettingValue};
use crate::error::SettingsError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Text conversions for one parsable setting type.
#[derive(Clone, Copy)]
struct TextCodec {
    parse: fn(&str) -> Result<SettingValue, SettingsError>,
    display: fn(&SettingValue) -> Option<String>,
}

impl TextCodec {
    fn of<S: ParseSetting>() -> Self {
        Self {
            parse: |raw| S::parse(raw).map(SettingValue::new),
            display: |value| value.downcast_ref::<S>().map(S::to_raw),
        }
    }
}

/// Defaults provider for resolution.
///
/// Built once before any resolution happens and shared read-only afterwards (typically behind an
/// `Arc`). A setting type must be registered here before it may appear in any layer.
#[derive(Clone, Default)]
pub struct Registry {
    defaults: BTreeMap<SettingKey, SettingValue>,
    names: HashMap<&'static str, SettingKey>,
    codecs: HashMap<&'static str, TextCodec>,
}

impl Registry {
    /// Registry with no settings at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every built-in setting
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.insert_parsable::<Iterations>();
        registry.insert_parsable::<WarmupIterations>();
        registry.insert_parsable::<Filter>();
        registry.insert_parsable::<FilterNot>();
        registry.insert_parsable::<TimeUnit>();
        registry.insert_parsable::<Format>();
        registry.insert_parsable::<Quiet>();
        registry
    }

    /// Register a setting type with its built-in default.
    ///
    /// Registering the same type twice is a no-op; a different type reusing a registered name is
    /// rejected.
    pub fn register<S: Setting>(&mut self) -> Result<(), SettingsError> {
        let key = SettingKey::of::<S>();
        match self.names.get(S::NAME) {
            Some(existing) if *existing == key => Ok(()),
            Some(_) => Err(SettingsError::DuplicateName { name: S::NAME }),
            None => {
                self.names.insert(S::NAME, key);
                self.defaults
                    .insert(key, SettingValue::new(S::default_value()));
                Ok(())
            }
        }
    }

    /// Register a setting type that can also be read from CLI flags and files
    pub fn register_parsable<S: ParseSetting>(&mut self) -> Result<(), SettingsError> {
        self.register::<S>()?;
        self.codecs.insert(S::NAME, TextCodec::of::<S>());
        Ok(())
    }

    /// Builder-style [`Registry::register`]
    pub fn with<S: Setting>(mut self) -> Result<Self, SettingsError> {
        self.register::<S>()?;
        Ok(self)
    }

    // Built-in names are distinct, so registration cannot fail here.
    fn insert_parsable<S: ParseSetting>(&mut self) {
        let key = SettingKey::of::<S>();
        self.names.insert(S::NAME, key);
        self.defaults.insert(key, SettingValue::new(S::default_value()));
        self.codecs.insert(S::NAME, TextCodec::of::<S>());
    }

    pub fn contains(&self, key: SettingKey) -> bool {
        self.defaults.contains_key(&key)
    }

    pub fn default_for(&self, key: SettingKey) -> Option<&SettingValue> {
        self.defaults.get(&key)
    }

    /// Every built-in default, ordered by setting name
    pub fn defaults(&self) -> impl Iterator<Item = &SettingValue> {
        self.defaults.values()
    }

    pub fn key_for(&self, name: &str) -> Option<SettingKey> {
        self.names.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defaults.keys().map(|key| key.name())
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Parse a setting from text by name
    pub fn parse(&self, name: &str, raw: &str) -> Result<SettingValue, SettingsError> {
        let codec = self
            .codecs
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        (codec.parse)(raw)
    }

    /// A value as it would be written in a defaults file or on the command line. Settings without
    /// a text form fall back to their `Debug` output.
    pub fn display(&self, value: &SettingValue) -> String {
        self.codecs
            .get(value.key().name())
            .and_then(|codec| (codec.display)(value))
            .unwrap_or_else(|| format!("{:?}", value))
    }

    /// Fail if any setting in `layer` has no registered default.
    pub fn check_layer(&self, layer: &Layer) -> Result<(), SettingsError> {
        match layer.iter().find(|setting| !self.contains(setting.key())) {
            Some(setting) => Err(SettingsError::Unregistered(setting.key().name())),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.defaults.iter().map(|(key, value)| (key.name(), value)))
            .finish()
    }
}
