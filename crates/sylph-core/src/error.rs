use std::path::PathBuf;

use sylph_model::RunnerIdentity;
use thiserror::Error;

use crate::actuator::ActuatorId;

/// Every failure the loader can surface to the host.
///
/// None of these are retried locally; the host decides whether to retry the activation,
/// pick another runner or stop.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{var} is not set")]
    ConfigurationMissing { var: String },

    #[error("{var}={} is invalid: {reason}", .path.display())]
    ConfigurationInvalid {
        var: String,
        path: PathBuf,
        reason: String,
    },

    #[error("actuator {id} depends on {dependency}, which cannot be satisfied: {reason}")]
    DependencyUnsatisfied {
        id: ActuatorId,
        dependency: String,
        reason: String,
    },

    #[error("failed to construct actuator {id}: {source}")]
    ActuatorConstructionFailed {
        id: ActuatorId,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown runner identity: {0}")]
    UnknownRunnerIdentity(RunnerIdentity),

    #[error("actuator {0} is bound more than once")]
    DuplicateBinding(ActuatorId),

    #[error("actuator {0} is not bound in this container")]
    NotBound(ActuatorId),
}

impl CoreError {
    /// Short stable label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::ConfigurationMissing { .. } => "configuration_missing",
            CoreError::ConfigurationInvalid { .. } => "configuration_invalid",
            CoreError::DependencyUnsatisfied { .. } => "dependency_unsatisfied",
            CoreError::ActuatorConstructionFailed { .. } => "actuator_construction_failed",
            CoreError::UnknownRunnerIdentity(_) => "unknown_runner_identity",
            CoreError::DuplicateBinding(_) => "duplicate_binding",
            CoreError::NotBound(_) => "not_bound",
        }
    }
}
