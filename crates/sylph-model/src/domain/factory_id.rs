use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the container factory a host instantiates to run submitted jobs.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerFactoryId(String);

impl ContainerFactoryId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerFactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerFactoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
