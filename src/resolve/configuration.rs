//! Resolved, read-only configuration for one benchmark.

use super::Tier;
use crate::settings::{Setting, SettingKey, SettingValue};
use std::collections::BTreeMap;

/// Effective value of one setting and the tier it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting {
    pub value: SettingValue,
    pub origin: Tier,
}

/// Every registered setting mapped to exactly one effective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    entries: BTreeMap<SettingKey, ResolvedSetting>,
}

impl Configuration {
    pub(super) fn from_entries(entries: BTreeMap<SettingKey, ResolvedSetting>) -> Self {
        Self { entries }
    }

    /// Effective value of `S`.
    ///
    /// # Panics
    ///
    /// Panics if `S` was not registered when this configuration was resolved. Registration
    /// happens before any benchmark runs, so this is a programming error in the harness setup.
    pub fn get<S: Setting>(&self) -> &S {
        match self.try_get::<S>() {
            Some(value) => value,
            None => panic!(
                "setting `{}` is not registered; register it before resolving",
                S::NAME
            ),
        }
    }

    pub fn try_get<S: Setting>(&self) -> Option<&S> {
        self.entries
            .get(&SettingKey::of::<S>())
            .and_then(|entry| entry.value.downcast_ref::<S>())
    }

    pub fn value(&self, key: SettingKey) -> Option<&SettingValue> {
        self.entries.get(&key).map(|entry| &entry.value)
    }

    pub fn origin<S: Setting>(&self) -> Option<Tier> {
        self.origin_of(SettingKey::of::<S>())
    }

    pub fn origin_of(&self, key: SettingKey) -> Option<Tier> {
        self.entries.get(&key).map(|entry| entry.origin)
    }

    /// All settings ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &ResolvedSetting)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
