//! Type-erased setting values.

use super::{Setting, SettingKey};
use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Object-safe view of a [`Setting`].
trait ErasedSetting: Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn ErasedSetting) -> bool;
}

impl<S: Setting> ErasedSetting for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn ErasedSetting) -> bool {
        other
            .as_any()
            .downcast_ref::<S>()
            .is_some_and(|other| self == other)
    }
}

/// A setting instance with its key, cheap to clone and share across threads.
#[derive(Clone)]
pub struct SettingValue {
    key: SettingKey,
    value: Arc<dyn ErasedSetting>,
}

impl SettingValue {
    pub fn new<S: Setting>(setting: S) -> Self {
        Self {
            key: SettingKey::of::<S>(),
            value: Arc::new(setting),
        }
    }

    pub fn key(&self) -> SettingKey {
        self.key
    }

    /// Typed view of the payload; `None` when `S` is not this value's setting type.
    pub fn downcast_ref<S: Setting>(&self) -> Option<&S> {
        self.value.as_any().downcast_ref::<S>()
    }
}

impl<S: Setting> From<S> for SettingValue {
    fn from(setting: S) -> Self {
        SettingValue::new(setting)
    }
}

impl PartialEq for SettingValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value.eq_erased(other.value.as_ref())
    }
}

impl Debug for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)
    }
}
