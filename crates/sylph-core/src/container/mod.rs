//! Minimal inversion-of-control container for built-in actuators.
//!
//! Bindings are a static table (identifier -> constructor + declared dependencies) plus one
//! externally supplied [`RunnerContext`] instance. [`Container::build`] constructs every
//! singleton eagerly in dependency order; if anything fails, the partially built map is
//! dropped and only the error escapes.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, instrument, trace};

use crate::{
    actuator::{ActuatorDescriptor, ActuatorHandle, ActuatorId, ActuatorRegistry, Dependency},
    context::RunnerContext,
    error::CoreError,
};

/// Binding table consumed by [`Container::build`].
#[derive(Debug, Default)]
pub struct Bindings {
    context: Option<Arc<RunnerContext>>,
    singletons: Vec<ActuatorDescriptor>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every descriptor of `registry` as a singleton and `ctx` as the context instance.
    pub fn from_registry(registry: &dyn ActuatorRegistry, ctx: Arc<RunnerContext>) -> Self {
        registry
            .describe()
            .iter()
            .fold(Self::new().bind_instance(ctx), |b, d| b.bind_singleton(*d))
    }

    /// Bind the context as an instance. The container never constructs it.
    pub fn bind_instance(mut self, ctx: Arc<RunnerContext>) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn bind_singleton(mut self, descriptor: ActuatorDescriptor) -> Self {
        self.singletons.push(descriptor);
        self
    }
}

/// What a constructor may see while it runs: the context and the dependencies it declared.
pub struct Resolver<'a> {
    owner: ActuatorId,
    declared: &'static [Dependency],
    context: Option<&'a Arc<RunnerContext>>,
    built: &'a HashMap<ActuatorId, ActuatorHandle>,
}

impl Resolver<'_> {
    pub fn context(&self) -> Result<Arc<RunnerContext>, CoreError> {
        if !self.declared.contains(&Dependency::Context) {
            return Err(self.unsatisfied(Dependency::Context, "not declared"));
        }
        self.context
            .cloned()
            .ok_or_else(|| self.unsatisfied(Dependency::Context, "no instance bound"))
    }

    pub fn actuator(&self, id: ActuatorId) -> Result<ActuatorHandle, CoreError> {
        let dep = Dependency::Actuator(id);
        if !self.declared.contains(&dep) {
            return Err(self.unsatisfied(dep, "not declared"));
        }
        self.built
            .get(&id)
            .cloned()
            .ok_or_else(|| self.unsatisfied(dep, "not constructed yet"))
    }

    fn unsatisfied(&self, dep: Dependency, reason: &str) -> CoreError {
        CoreError::DependencyUnsatisfied {
            id: self.owner,
            dependency: dep.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Built container: one singleton per bound identifier.
pub struct Container {
    context: Option<Arc<RunnerContext>>,
    singletons: HashMap<ActuatorId, ActuatorHandle>,
    /// Construction order.
    order: Vec<ActuatorId>,
}

impl Container {
    #[instrument(level = "debug", skip(bindings), fields(singletons = bindings.singletons.len()))]
    pub fn build(bindings: Bindings) -> Result<Self, CoreError> {
        let mut table = HashMap::with_capacity(bindings.singletons.len());
        for d in &bindings.singletons {
            if table.insert(d.id(), *d).is_some() {
                return Err(CoreError::DuplicateBinding(d.id()));
            }
        }

        let mut graph = Graph {
            table: &table,
            context: bindings.context.as_ref(),
            built: HashMap::with_capacity(table.len()),
            order: Vec::with_capacity(table.len()),
            visiting: Vec::new(),
        };
        for d in &bindings.singletons {
            graph.visit(d.id())?;
        }

        let Graph { built, order, .. } = graph;
        debug!(order = ?order, "container built");
        Ok(Self {
            context: bindings.context,
            singletons: built,
            order,
        })
    }

    /// The singleton bound to `id`.
    pub fn resolve(&self, id: ActuatorId) -> Result<ActuatorHandle, CoreError> {
        self.singletons
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotBound(id))
    }

    /// Singletons for every id in `ids`, keyed by id.
    pub fn resolve_all<I>(&self, ids: I) -> Result<ActuatorSet, CoreError>
    where
        I: IntoIterator<Item = ActuatorId>,
    {
        let mut set = ActuatorSet::default();
        for id in ids {
            set.handles.insert(id, self.resolve(id)?);
        }
        Ok(set)
    }

    pub fn context(&self) -> Option<&Arc<RunnerContext>> {
        self.context.as_ref()
    }

    pub fn construction_order(&self) -> &[ActuatorId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.singletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.singletons.is_empty()
    }
}

struct Graph<'a> {
    table: &'a HashMap<ActuatorId, ActuatorDescriptor>,
    context: Option<&'a Arc<RunnerContext>>,
    built: HashMap<ActuatorId, ActuatorHandle>,
    order: Vec<ActuatorId>,
    /// Current DFS path, used for cycle detection.
    visiting: Vec<ActuatorId>,
}

impl Graph<'_> {
    fn visit(&mut self, id: ActuatorId) -> Result<(), CoreError> {
        if self.built.contains_key(&id) {
            return Ok(());
        }
        let Some(desc) = self.table.get(&id).copied() else {
            return Err(CoreError::NotBound(id));
        };

        self.visiting.push(id);
        for dep in desc.dependencies() {
            match *dep {
                Dependency::Context => {
                    if self.context.is_none() {
                        return Err(unsatisfied(id, dep, "no instance bound".into()));
                    }
                }
                Dependency::Actuator(dep_id) => {
                    if self.visiting.contains(&dep_id) {
                        let cycle = self
                            .visiting
                            .iter()
                            .chain(std::iter::once(&dep_id))
                            .map(ActuatorId::as_str)
                            .collect::<Vec<_>>()
                            .join(" -> ");
                        return Err(unsatisfied(id, dep, format!("cycle: {cycle}")));
                    }
                    if !self.table.contains_key(&dep_id) {
                        return Err(unsatisfied(id, dep, "not bound".into()));
                    }
                    self.visit(dep_id)?;
                }
            }
        }

        let resolver = Resolver {
            owner: id,
            declared: desc.dependencies(),
            context: self.context,
            built: &self.built,
        };
        let handle = desc.construct(&resolver).map_err(|source| {
            match source.downcast::<CoreError>() {
                Ok(err @ CoreError::DependencyUnsatisfied { .. }) => err,
                Ok(other) => CoreError::ActuatorConstructionFailed {
                    id,
                    source: other.into(),
                },
                Err(source) => CoreError::ActuatorConstructionFailed { id, source },
            }
        })?;

        if handle.id() != id {
            return Err(CoreError::ActuatorConstructionFailed {
                id,
                source: anyhow::anyhow!("constructor produced actuator {}", handle.id()),
            });
        }

        trace!(actuator = %id, "singleton constructed");
        self.visiting.pop();
        self.built.insert(id, handle);
        self.order.push(id);
        Ok(())
    }
}

fn unsatisfied(id: ActuatorId, dep: &Dependency, reason: String) -> CoreError {
    CoreError::DependencyUnsatisfied {
        id,
        dependency: dep.to_string(),
        reason,
    }
}

/// Actuator handles published by one activation, keyed by identifier.
#[derive(Clone, Default)]
pub struct ActuatorSet {
    handles: HashMap<ActuatorId, ActuatorHandle>,
}

impl ActuatorSet {
    pub fn get(&self, id: ActuatorId) -> Option<&ActuatorHandle> {
        self.handles.get(&id)
    }

    pub fn contains(&self, id: ActuatorId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ActuatorId> + '_ {
        self.handles.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActuatorId, &ActuatorHandle)> {
        self.handles.iter().map(|(id, h)| (*id, h))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn into_handles(self) -> Vec<ActuatorHandle> {
        self.handles.into_values().collect()
    }
}

impl std::fmt::Debug for ActuatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort();
        f.debug_tuple("ActuatorSet").field(&ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::actuator::{JobActuator, StaticRegistry};

    struct Probe {
        id: ActuatorId,
        #[allow(dead_code)]
        ctx: Arc<RunnerContext>,
    }

    impl JobActuator for Probe {
        fn id(&self) -> ActuatorId {
            self.id
        }
        fn job_type(&self) -> &'static str {
            "probe"
        }
    }

    const STREAM: ActuatorId = ActuatorId::new("test.stream");
    const BATCH: ActuatorId = ActuatorId::new("test.batch");
    const SQL: ActuatorId = ActuatorId::new("test.sql");
    const BROKEN: ActuatorId = ActuatorId::new("test.broken");

    fn probe(id: ActuatorId, r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Probe {
            id,
            ctx: r.context()?,
        }))
    }

    fn make_stream(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        probe(STREAM, r)
    }
    fn make_batch(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        probe(BATCH, r)
    }
    fn make_sql(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        r.actuator(STREAM)?;
        probe(SQL, r)
    }
    fn make_broken(_: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        anyhow::bail!("engine classes missing")
    }

    static REGISTRY: [ActuatorDescriptor; 2] = [
        ActuatorDescriptor::with_context(STREAM, make_stream),
        ActuatorDescriptor::with_context(BATCH, make_batch),
    ];

    fn ctx() -> Arc<RunnerContext> {
        Arc::new(RunnerContext::default())
    }

    #[test]
    fn resolve_all_returns_one_handle_per_descriptor() {
        let registry = StaticRegistry::new(&REGISTRY);
        let container = Container::build(Bindings::from_registry(&registry, ctx())).unwrap();

        let set = container.resolve_all(registry.ids()).unwrap();
        assert_eq!(set.len(), registry.describe().len());
        for id in registry.ids() {
            assert_eq!(set.get(id).unwrap().id(), id);
        }
    }

    #[test]
    fn singletons_are_reused_across_resolutions() {
        let registry = StaticRegistry::new(&REGISTRY);
        let container = Container::build(Bindings::from_registry(&registry, ctx())).unwrap();

        let first = container.resolve_all(registry.ids()).unwrap();
        let second = container.resolve_all(registry.ids()).unwrap();
        for id in registry.ids() {
            assert!(Arc::ptr_eq(first.get(id).unwrap(), second.get(id).unwrap()));
        }
    }

    #[test]
    fn context_is_the_bound_instance() {
        static SEEN: AtomicUsize = AtomicUsize::new(0);
        fn make(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
            let ctx = r.context()?;
            SEEN.store(Arc::as_ptr(&ctx) as usize, Ordering::SeqCst);
            Ok(Arc::new(Probe { id: STREAM, ctx }))
        }

        let ctx = ctx();
        let bindings = Bindings::new()
            .bind_instance(Arc::clone(&ctx))
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make));
        let container = Container::build(bindings).unwrap();

        assert_eq!(SEEN.load(Ordering::SeqCst), Arc::as_ptr(&ctx) as usize);
        assert!(Arc::ptr_eq(container.context().unwrap(), &ctx));
    }

    #[test]
    fn dropping_container_releases_context() {
        let ctx = ctx();
        let bindings = Bindings::new()
            .bind_instance(Arc::clone(&ctx))
            .bind_singleton(ActuatorDescriptor::with_context(BATCH, make_batch));
        let container = Container::build(bindings).unwrap();
        assert_eq!(Arc::strong_count(&ctx), 3);

        drop(container);
        assert_eq!(Arc::strong_count(&ctx), 1);
    }

    #[test]
    fn dependencies_are_built_first() {
        static DEPS: [Dependency; 2] = [Dependency::Context, Dependency::Actuator(STREAM)];
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::new(SQL, &DEPS, make_sql))
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream));

        let container = Container::build(bindings).unwrap();
        assert_eq!(container.construction_order(), &[STREAM, SQL]);
    }

    #[test]
    fn missing_context_is_dependency_unsatisfied() {
        let bindings =
            Bindings::new().bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::DependencyUnsatisfied { id, .. } if id == STREAM));
    }

    #[test]
    fn cycle_aborts_build() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn counted(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            probe(STREAM, r)
        }
        static A_DEPS: [Dependency; 1] = [Dependency::Actuator(BATCH)];
        static B_DEPS: [Dependency; 1] = [Dependency::Actuator(STREAM)];

        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::new(STREAM, &A_DEPS, counted))
            .bind_singleton(ActuatorDescriptor::new(BATCH, &B_DEPS, counted));

        let err = Container::build(bindings).err().expect("cycle must fail");
        match err {
            CoreError::DependencyUnsatisfied { reason, .. } => assert!(reason.contains("cycle")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unbound_dependency_is_dependency_unsatisfied() {
        static DEPS: [Dependency; 1] = [Dependency::Actuator(BATCH)];
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::new(SQL, &DEPS, make_sql));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::DependencyUnsatisfied { .. }));
    }

    #[test]
    fn undeclared_dependency_request_is_dependency_unsatisfied() {
        // make_sql asks for STREAM without declaring it.
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream))
            .bind_singleton(ActuatorDescriptor::with_context(SQL, make_sql));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::DependencyUnsatisfied { id, .. } if id == SQL));
    }

    #[test]
    fn constructor_failure_carries_identifier_and_cause() {
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream))
            .bind_singleton(ActuatorDescriptor::with_context(BROKEN, make_broken));

        let err = Container::build(bindings).err().expect("build must fail");
        match err {
            CoreError::ActuatorConstructionFailed { id, source } => {
                assert_eq!(id, BROKEN);
                assert!(source.to_string().contains("engine classes missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failing_constructor_stops_its_dependents() {
        static DEPENDENT_CALLS: AtomicUsize = AtomicUsize::new(0);
        static LATER_CALLS: AtomicUsize = AtomicUsize::new(0);
        fn dependent(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
            DEPENDENT_CALLS.fetch_add(1, Ordering::SeqCst);
            r.actuator(BROKEN)?;
            probe(SQL, r)
        }
        fn later(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
            LATER_CALLS.fetch_add(1, Ordering::SeqCst);
            probe(BATCH, r)
        }
        static DEPS: [Dependency; 2] = [Dependency::Context, Dependency::Actuator(BROKEN)];

        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::new(SQL, &DEPS, dependent))
            .bind_singleton(ActuatorDescriptor::with_context(BROKEN, make_broken))
            .bind_singleton(ActuatorDescriptor::with_context(BATCH, later));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::ActuatorConstructionFailed { id, .. } if id == BROKEN));
        assert_eq!(DEPENDENT_CALLS.load(Ordering::SeqCst), 0);
        assert_eq!(LATER_CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn constructor_returning_wrong_actuator_fails() {
        fn impostor(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
            probe(BATCH, r)
        }
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, impostor));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::ActuatorConstructionFailed { id, .. } if id == STREAM));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let bindings = Bindings::new()
            .bind_instance(ctx())
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream))
            .bind_singleton(ActuatorDescriptor::with_context(STREAM, make_stream));

        let err = Container::build(bindings).err().expect("build must fail");
        assert!(matches!(err, CoreError::DuplicateBinding(id) if id == STREAM));
    }

    #[test]
    fn resolving_unbound_id_fails() {
        let registry = StaticRegistry::new(&REGISTRY);
        let container = Container::build(Bindings::from_registry(&registry, ctx())).unwrap();

        assert!(matches!(container.resolve(SQL), Err(CoreError::NotBound(id)) if id == SQL));
        assert!(container.resolve_all([STREAM, SQL]).is_err());
    }
}
