//! Resolution
//!
//! Folds a [`PrecedenceChain`] over the registry's built-in defaults to produce one
//! [`Configuration`]. Every setting in every layer overwrites whatever value its key currently
//! holds, so the highest tier specifying a key wins, and within that tier the last occurrence wins.

mod chain;
mod configuration;

pub use chain::{PrecedenceChain, Tier};
pub use configuration::{Configuration, ResolvedSetting};

use crate::settings::Registry;
use std::collections::BTreeMap;

/// Resolve the effective configuration for one benchmark.
///
/// Pure and allocation-only: the registry and layers are read, never modified, so any number of
/// resolutions may share them across threads.
///
/// # Panics
///
/// Panics if a layer holds a setting the registry has no default for. Callers are expected to run
/// [`Registry::check_layer`] on every layer first, as the runner does.
pub fn resolve(registry: &Registry, chain: &PrecedenceChain<'_>) -> Configuration {
    let mut entries: BTreeMap<_, _> = registry
        .defaults()
        .map(|value| {
            (
                value.key(),
                ResolvedSetting {
                    value: value.clone(),
                    origin: Tier::Builtin,
                },
            )
        })
        .collect();

    for (tier, layer) in chain.layers() {
        for setting in layer {
            match entries.get_mut(&setting.key()) {
                Some(entry) => {
                    entry.value = setting.clone();
                    entry.origin = tier;
                }
                None => panic!(
                    "setting `{}` in the {} layer has no registered default",
                    setting.key().name(),
                    tier
                ),
            }
        }
    }

    Configuration::from_entries(entries)
}
