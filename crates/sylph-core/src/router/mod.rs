use std::sync::Arc;

use sylph_model::RunnerIdentity;
use tracing::{instrument, trace, warn};

use crate::{
    context::RunnerContext,
    env::EnvSource,
    error::CoreError,
    factory::ContainerFactoryTable,
    plugin::RunnerPluginManager,
    runner::{Activation, Runner, activate},
    scope::ClassScope,
};

/// Host-side registry of runners sharing one [`RunnerContext`].
#[derive(Default)]
pub struct RunnerRouter {
    runners: Vec<Arc<dyn Runner>>,
    ctx: Arc<RunnerContext>,
}

impl RunnerRouter {
    #[inline]
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
            ctx: Arc::new(RunnerContext::default()),
        }
    }

    #[inline]
    pub fn with_context(mut self, ctx: Arc<RunnerContext>) -> Self {
        self.ctx = ctx;
        self
    }

    /// Register a runner. A second runner with an identity already registered is ignored.
    pub fn register(&mut self, runner: Arc<dyn Runner>) {
        let identity = runner.identity();
        if self.pick(&identity).is_some() {
            warn!(runner = %identity, "runner already registered; ignoring");
            return;
        }
        trace!(runner = %identity, "runner registered");
        self.runners.push(runner);
    }

    pub fn pick(&self, identity: &RunnerIdentity) -> Option<&Arc<dyn Runner>> {
        self.runners.iter().find(|r| &r.identity() == identity)
    }

    pub fn identities(&self) -> Vec<RunnerIdentity> {
        self.runners.iter().map(|r| r.identity()).collect()
    }

    pub fn context(&self) -> &Arc<RunnerContext> {
        &self.ctx
    }

    #[instrument(level = "debug", skip(self, scope, env), fields(runner = %identity))]
    pub fn activate(
        &self,
        identity: &RunnerIdentity,
        scope: &dyn ClassScope,
        env: &dyn EnvSource,
    ) -> Result<Activation, CoreError> {
        let r = self
            .pick(identity)
            .ok_or_else(|| CoreError::UnknownRunnerIdentity(identity.clone()))?;

        activate(r.as_ref(), Arc::clone(&self.ctx), scope, env)
    }

    pub fn plugin_manager(
        &self,
        identity: &RunnerIdentity,
    ) -> Result<RunnerPluginManager, CoreError> {
        let r = self
            .pick(identity)
            .ok_or_else(|| CoreError::UnknownRunnerIdentity(identity.clone()))?;
        Ok(r.plugin_manager(&self.ctx))
    }

    /// Container-factory table covering every registered runner.
    pub fn factory_table(&self) -> ContainerFactoryTable {
        self.runners
            .iter()
            .fold(ContainerFactoryTable::builder(), |b, r| {
                b.bind(r.identity(), r.container_factory())
            })
            .build()
    }
}
