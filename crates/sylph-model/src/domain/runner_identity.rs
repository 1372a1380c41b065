use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Stable name of one pluggable execution engine (e.g. `"spark"`).
///
/// Plugins declare the runner they belong to with this value, and the host uses it
/// to pick a runner and its container factory.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunnerIdentity(String);

impl RunnerIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunnerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RunnerIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RunnerIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for RunnerIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}
