//! Layers: ordered settings for one precedence tier.

use super::{Setting, SettingKey, SettingValue};

/// Ordered settings supplied by one source (custom defaults, a suite, a benchmark, the CLI).
///
/// A layer is never edited in place once handed to a runner; [`Layer::with`] consumes the layer
/// and returns the extended one. When a setting appears more than once, the later occurrence wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    settings: Vec<SettingValue>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: impl IntoIterator<Item = SettingValue>) -> Self {
        Self {
            settings: settings.into_iter().collect(),
        }
    }

    pub fn with<S: Setting>(mut self, setting: S) -> Self {
        self.settings.push(SettingValue::new(setting));
        self
    }

    /// Settings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SettingValue> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Whether this layer specifies `key` at all
    pub fn specifies(&self, key: SettingKey) -> bool {
        self.settings.iter().any(|setting| setting.key() == key)
    }

    /// The effective value of `S` within this layer alone (last occurrence)
    pub fn get<S: Setting>(&self) -> Option<&S> {
        self.settings
            .iter()
            .rev()
            .find_map(|setting| setting.downcast_ref::<S>())
    }

    /// Concatenate two layers; settings of `other` come after (and so win over) ours.
    pub fn merged(&self, other: &Layer) -> Layer {
        Layer::from_settings(self.settings.iter().chain(other.settings.iter()).cloned())
    }
}

impl FromIterator<SettingValue> for Layer {
    fn from_iter<I: IntoIterator<Item = SettingValue>>(iter: I) -> Self {
        Layer::from_settings(iter)
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a SettingValue;
    type IntoIter = std::slice::Iter<'a, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.settings.iter()
    }
}

/// Build a [`Layer`](crate::settings::Layer) from setting values in order.
///
/// ```
/// use benchtier::layer;
/// use benchtier::settings::{Iterations, Quiet};
///
/// let layer = layer![Iterations(42), Quiet(true)];
/// assert_eq!(layer.len(), 2);
/// ```
#[macro_export]
macro_rules! layer {
    () => {
        $crate::settings::Layer::new()
    };
    ($($setting:expr),+ $(,)?) => {
        $crate::settings::Layer::from_settings([
            $($crate::settings::SettingValue::from($setting)),+
        ])
    };
}
