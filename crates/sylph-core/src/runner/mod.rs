use std::{sync::Arc, time::Instant};

use sylph_model::{ContainerFactoryId, RunnerIdentity};
use tracing::{Span, error, field, info, instrument};
use uuid::Uuid;

use crate::{
    actuator::ActuatorRegistry,
    container::{ActuatorSet, Bindings, Container},
    context::RunnerContext,
    env::{EngineHome, EnvSource, EnvironmentResolver},
    error::CoreError,
    plugin::{RunnerPluginManager, plugin_manager_for},
    scope::{ClassScope, ExtendOutcome, extend},
};

/// A pluggable execution-engine integration.
pub trait Runner: Send + Sync {
    fn identity(&self) -> RunnerIdentity;

    /// Environment variable naming the engine home directory.
    fn env_var(&self) -> &str;

    /// Library directory under the engine home added to the class scope.
    fn lib_dir(&self) -> &str;

    /// Built-in actuators.
    fn registry(&self) -> &dyn ActuatorRegistry;

    fn container_factory(&self) -> ContainerFactoryId;

    /// Extra plugins for this runner, minus the built-in capabilities.
    fn plugin_manager(&self, ctx: &RunnerContext) -> RunnerPluginManager {
        plugin_manager_for(&self.identity(), self.registry(), ctx)
    }
}

/// Result of one successful runner activation.
///
/// Owns the container; dropping the activation releases every actuator it published.
pub struct Activation {
    id: Uuid,
    runner: RunnerIdentity,
    home: EngineHome,
    scope: ExtendOutcome,
    container: Container,
    actuators: ActuatorSet,
}

impl Activation {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn runner(&self) -> &RunnerIdentity {
        &self.runner
    }

    pub fn home(&self) -> &EngineHome {
        &self.home
    }

    /// What happened to the class scope during activation.
    pub fn scope_outcome(&self) -> ExtendOutcome {
        self.scope
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn actuators(&self) -> &ActuatorSet {
        &self.actuators
    }
}

impl std::fmt::Debug for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Activation")
            .field("id", &self.id)
            .field("runner", &self.runner)
            .field("home", &self.home)
            .field("scope", &self.scope)
            .field("actuators", &self.actuators)
            .finish()
    }
}

/// Activate `runner`: resolve its home, extend the class scope, build and resolve the
/// actuator container.
///
/// Runs synchronously. Hosts activating several runners against one scope must do so one
/// at a time.
#[instrument(
    level = "info",
    name = "activation",
    skip_all,
    fields(runner = %runner.identity(), id = field::Empty)
)]
pub fn activate(
    runner: &dyn Runner,
    ctx: Arc<RunnerContext>,
    scope: &dyn ClassScope,
    env: &dyn EnvSource,
) -> Result<Activation, CoreError> {
    let id = Uuid::new_v4();
    Span::current().record("id", field::display(id));

    let identity = runner.identity();
    let metrics = Arc::clone(ctx.metrics());
    let started = Instant::now();

    match activate_inner(id, runner, ctx, scope, env) {
        Ok(activation) => {
            let elapsed = started.elapsed();
            metrics.record_activation(&identity, activation.actuators.len(), elapsed);
            info!(
                actuators = activation.actuators.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "runner activated"
            );
            Ok(activation)
        }
        Err(e) => {
            metrics.record_activation_failure(&identity, e.kind());
            error!(error = %e, kind = e.kind(), "runner activation failed");
            Err(e)
        }
    }
}

fn activate_inner(
    id: Uuid,
    runner: &dyn Runner,
    ctx: Arc<RunnerContext>,
    scope: &dyn ClassScope,
    env: &dyn EnvSource,
) -> Result<Activation, CoreError> {
    let home = EnvironmentResolver::new(runner.env_var()).resolve(env)?;
    let outcome = extend(scope, &home.lib_dir(runner.lib_dir()));

    let registry = runner.registry();
    let container = Container::build(Bindings::from_registry(registry, ctx))?;
    let actuators = container.resolve_all(registry.ids())?;

    Ok(Activation {
        id,
        runner: runner.identity(),
        home,
        scope: outcome,
        container,
        actuators,
    })
}
