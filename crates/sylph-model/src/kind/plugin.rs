use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Pipeline role a discovered plugin plays inside a job.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluginKind {
    /// Produces records (reads from an external system).
    Source,
    /// Maps records between a source and a sink.
    Transform,
    /// Consumes records (writes to an external system).
    Sink,
}

impl PluginKind {
    /// Returns a short symbolic identifier for the plugin kind.
    ///
    /// Used for logging and for plugin lookups by kind:
    /// - `"source"`
    /// - `"transform"`
    /// - `"sink"`
    pub fn kind(&self) -> &'static str {
        match self {
            PluginKind::Source => "source",
            PluginKind::Transform => "transform",
            PluginKind::Sink => "sink",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl FromStr for PluginKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "source" => Ok(PluginKind::Source),
            "transform" => Ok(PluginKind::Transform),
            "sink" => Ok(PluginKind::Sink),
            _ => Err(format!("unknown plugin kind: {s} (expected: source|transform|sink)")),
        }
    }
}
