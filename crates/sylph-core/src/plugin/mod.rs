//! Filtering of discovered plugins against a runner's built-in capabilities.

use std::collections::HashSet;

use sylph_model::{CapabilityKey, PluginInfo, PluginKind, RunnerIdentity};
use tracing::{debug, instrument, trace};

use crate::{actuator::ActuatorRegistry, context::RunnerContext};

/// Discovered plugins scoped to one runner, minus those a built-in already covers.
///
/// Identical discovered entries collapse into one; equality compares membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredPluginSet {
    runner: RunnerIdentity,
    plugins: HashSet<PluginInfo>,
    shadowed: usize,
}

impl FilteredPluginSet {
    pub fn runner(&self) -> &RunnerIdentity {
        &self.runner
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginInfo> {
        self.plugins.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.plugins.iter().any(|p| p.key.as_str() == key)
    }

    pub fn keys(&self) -> HashSet<&CapabilityKey> {
        self.plugins.iter().map(|p| &p.key).collect()
    }

    /// Number of in-scope discovered entries dropped because their key was excluded.
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn into_vec(self) -> Vec<PluginInfo> {
        self.plugins.into_iter().collect()
    }
}

/// Keep the entries of `all` declared for `scope` whose key is not in `excluded`.
///
/// Pure: the result depends only on the arguments.
pub fn filter(
    all: &[PluginInfo],
    excluded: &HashSet<CapabilityKey>,
    scope: &RunnerIdentity,
) -> FilteredPluginSet {
    let mut shadowed = 0;
    let plugins = all
        .iter()
        .filter(|p| &p.runner == scope)
        .filter(|p| {
            let covered = excluded.contains(&p.key);
            if covered {
                trace!(plugin = %p.key, runner = %scope, "plugin shadowed by built-in actuator");
                shadowed += 1;
            }
            !covered
        })
        .cloned()
        .collect();

    FilteredPluginSet {
        runner: scope.clone(),
        plugins,
        shadowed,
    }
}

/// Host-facing view over the extra plugins a runner offers.
pub trait PluginManager: Send + Sync {
    fn all_plugins(&self) -> &FilteredPluginSet;

    /// Plugin of the given kind answering to `name` (alias or key).
    fn find(&self, name: &str, kind: PluginKind) -> Option<&PluginInfo> {
        self.all_plugins()
            .iter()
            .find(|p| p.kind == kind && p.answers_to(name))
    }

    fn by_kind(&self, kind: PluginKind) -> Vec<&PluginInfo> {
        self.all_plugins().iter().filter(|p| p.kind == kind).collect()
    }
}

/// [`PluginManager`] over a snapshot taken when it was created.
#[derive(Clone, Debug)]
pub struct RunnerPluginManager {
    plugins: FilteredPluginSet,
}

impl RunnerPluginManager {
    pub fn new(plugins: FilteredPluginSet) -> Self {
        Self { plugins }
    }
}

impl PluginManager for RunnerPluginManager {
    fn all_plugins(&self) -> &FilteredPluginSet {
        &self.plugins
    }
}

/// Build a plugin manager for `runner`, excluding exactly the keys its registry provides.
///
/// The plugin universe is read from `ctx` on every call.
#[instrument(level = "debug", skip(registry, ctx), fields(runner = %runner))]
pub fn plugin_manager_for(
    runner: &RunnerIdentity,
    registry: &dyn ActuatorRegistry,
    ctx: &RunnerContext,
) -> RunnerPluginManager {
    let excluded = registry.provided_keys();
    let set = filter(&ctx.find_plugins(), &excluded, runner);

    debug!(kept = set.len(), shadowed = set.shadowed(), "plugins filtered");
    ctx.metrics()
        .record_plugins_filtered(runner, set.len(), set.shadowed());
    RunnerPluginManager::new(set)
}
