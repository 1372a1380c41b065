//! Extension-loading core for pluggable execution engines ("runners").
//!
//! Activating a runner resolves its engine home, makes the engine's libraries visible in
//! the class scope and builds its fixed set of job actuators through a small DI container.
//! Plugin filtering and container-factory selection are independent, stateless services.

pub mod actuator;
pub use actuator::{
    ActuatorDescriptor, ActuatorHandle, ActuatorId, ActuatorRegistry, Dependency, JobActuator,
    StaticRegistry,
};
pub mod container;
pub use container::{ActuatorSet, Bindings, Container, Resolver};
pub mod context;
pub use context::{PluginDiscovery, RunnerContext, StaticDiscovery};
pub mod env;
pub use env::{EngineHome, EnvSource, EnvironmentResolver, MapEnv, ProcessEnv};
pub mod error;
pub use error::CoreError;
pub mod factory;
pub use factory::{ContainerFactoryBinding, ContainerFactoryTable};
pub mod metrics;
pub use metrics::{MetricsBackend, MetricsHandle, NoopMetrics};
pub mod plugin;
pub use plugin::{FilteredPluginSet, PluginManager, RunnerPluginManager, filter};
pub mod router;
pub use router::RunnerRouter;
pub mod runner;
pub use runner::{Activation, Runner, activate};
pub mod scope;
pub use scope::{AugmentableScope, ClassScope, DirScope, ExtendOutcome, FixedScope};
