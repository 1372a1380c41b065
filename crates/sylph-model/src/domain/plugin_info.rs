use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{CapabilityKey, PluginKind, RunnerIdentity};

/// Metadata describing one dynamically discovered plugin.
///
/// Produced by the discovery scanner; the loader only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    /// Capability key, compared against the keys of built-in actuators.
    pub key: CapabilityKey,
    /// Runner the plugin was built for.
    pub runner: RunnerIdentity,
    /// Where the plugin was loaded from (directory or archive).
    pub location: PathBuf,
    /// Names the plugin can be referenced by in a job definition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    /// Pipeline role.
    pub kind: PluginKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl PluginInfo {
    /// Create plugin metadata with no aliases, description or version.
    pub fn new(
        key: impl Into<CapabilityKey>,
        runner: impl Into<RunnerIdentity>,
        kind: PluginKind,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            key: key.into(),
            runner: runner.into(),
            location: location.into(),
            names: Vec::new(),
            kind,
            description: String::new(),
            version: String::new(),
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Returns `true` if `name` is one of the plugin's names or its key.
    pub fn answers_to(&self, name: &str) -> bool {
        self.key.as_str() == name || self.names.iter().any(|n| n == name)
    }
}
