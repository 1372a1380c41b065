use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Key naming one job capability.
///
/// Built-in actuators and discovered plugins share this key space: a plugin whose key
/// matches a built-in actuator is a duplicate of that actuator.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityKey(String);

impl CapabilityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CapabilityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for CapabilityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
