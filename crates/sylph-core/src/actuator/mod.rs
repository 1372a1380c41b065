//! Built-in job actuators and the closed registry that describes them.

use std::{collections::HashSet, fmt, sync::Arc};

use sylph_model::CapabilityKey;

use crate::container::Resolver;

/// Identifier of one built-in actuator.
///
/// The identifier doubles as the actuator's capability key, so a discovered plugin with the
/// same key is a duplicate of the built-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActuatorId(&'static str);

impl ActuatorId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    #[inline]
    pub fn key(&self) -> CapabilityKey {
        CapabilityKey::from(self.0)
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A constructed, ready-to-use job actuator.
///
/// How an actuator turns a job definition into a submitted job is up to the engine crate;
/// the loader only needs to identify it.
pub trait JobActuator: Send + Sync {
    fn id(&self) -> ActuatorId;

    /// Job type name users reference in job definitions.
    fn job_type(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }
}

pub type ActuatorHandle = Arc<dyn JobActuator>;

/// Something an actuator needs before it can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dependency {
    /// The host-supplied [`RunnerContext`](crate::RunnerContext).
    Context,
    /// Another actuator bound in the same container.
    Actuator(ActuatorId),
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Context => f.write_str("RunnerContext"),
            Dependency::Actuator(id) => write!(f, "actuator {id}"),
        }
    }
}

pub type ActuatorCtor = fn(&Resolver<'_>) -> anyhow::Result<ActuatorHandle>;

const CONTEXT_ONLY: &[Dependency] = &[Dependency::Context];

/// Static binding entry: identifier, declared dependencies and constructor.
#[derive(Clone, Copy)]
pub struct ActuatorDescriptor {
    id: ActuatorId,
    dependencies: &'static [Dependency],
    ctor: ActuatorCtor,
}

impl ActuatorDescriptor {
    pub const fn new(
        id: ActuatorId,
        dependencies: &'static [Dependency],
        ctor: ActuatorCtor,
    ) -> Self {
        Self {
            id,
            dependencies,
            ctor,
        }
    }

    /// Descriptor whose sole dependency is the runner context.
    pub const fn with_context(id: ActuatorId, ctor: ActuatorCtor) -> Self {
        Self::new(id, CONTEXT_ONLY, ctor)
    }

    #[inline]
    pub fn id(&self) -> ActuatorId {
        self.id
    }

    #[inline]
    pub fn dependencies(&self) -> &'static [Dependency] {
        self.dependencies
    }

    #[inline]
    pub fn key(&self) -> CapabilityKey {
        self.id.key()
    }

    pub(crate) fn construct(&self, resolver: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        (self.ctor)(resolver)
    }
}

impl fmt::Debug for ActuatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActuatorDescriptor")
            .field("id", &self.id)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// The closed set of actuators a runner always provides.
///
/// Compiled into the runner; never extended at runtime.
pub trait ActuatorRegistry: Send + Sync {
    /// Descriptors in registration order. Must return the same set on every call.
    fn describe(&self) -> &'static [ActuatorDescriptor];

    fn ids(&self) -> Vec<ActuatorId> {
        self.describe().iter().map(ActuatorDescriptor::id).collect()
    }

    /// Capability keys covered by the built-ins.
    ///
    /// Plugin filtering uses exactly this set, so the excluded keys can never drift from
    /// the registry.
    fn provided_keys(&self) -> HashSet<CapabilityKey> {
        self.describe().iter().map(ActuatorDescriptor::key).collect()
    }
}

/// Registry backed by a `'static` descriptor table.
#[derive(Clone, Copy, Debug)]
pub struct StaticRegistry {
    descriptors: &'static [ActuatorDescriptor],
}

impl StaticRegistry {
    pub const fn new(descriptors: &'static [ActuatorDescriptor]) -> Self {
        Self { descriptors }
    }
}

impl ActuatorRegistry for StaticRegistry {
    fn describe(&self) -> &'static [ActuatorDescriptor] {
        self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(ActuatorId);

    impl JobActuator for Echo {
        fn id(&self) -> ActuatorId {
            self.0
        }
        fn job_type(&self) -> &'static str {
            "echo"
        }
    }

    const A: ActuatorId = ActuatorId::new("test.a");
    const B: ActuatorId = ActuatorId::new("test.b");

    fn make_a(_: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Echo(A)))
    }

    fn make_b(_: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Echo(B)))
    }

    static TABLE: [ActuatorDescriptor; 2] = [
        ActuatorDescriptor::with_context(A, make_a),
        ActuatorDescriptor::with_context(B, make_b),
    ];

    #[test]
    fn describe_is_stable_and_ordered() {
        let registry = StaticRegistry::new(&TABLE);

        assert_eq!(registry.ids(), vec![A, B]);
        assert_eq!(registry.ids(), registry.ids());
    }

    #[test]
    fn provided_keys_match_descriptor_ids() {
        let registry = StaticRegistry::new(&TABLE);
        let keys = registry.provided_keys();

        assert_eq!(keys.len(), 2);
        assert!(keys.contains("test.a"));
        assert!(keys.contains("test.b"));
    }

    #[test]
    fn with_context_declares_context_only() {
        assert_eq!(TABLE[0].dependencies(), &[Dependency::Context]);
    }
}
