use std::sync::Arc;

use sylph_core::{ActuatorHandle, ActuatorId, JobActuator, Resolver, RunnerContext};

/// Jobs shipped as a prebuilt application and handed to `spark-submit` as is.
pub struct SparkSubmitActuator {
    ctx: Arc<RunnerContext>,
}

impl SparkSubmitActuator {
    pub const ID: ActuatorId = ActuatorId::new("sylph_spark::SparkSubmitActuator");

    pub(crate) fn create(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Self { ctx: r.context()? }))
    }

    pub fn context(&self) -> &RunnerContext {
        &self.ctx
    }
}

impl JobActuator for SparkSubmitActuator {
    fn id(&self) -> ActuatorId {
        Self::ID
    }

    fn job_type(&self) -> &'static str {
        "SparkSubmit"
    }

    fn description(&self) -> &'static str {
        "spark-submit application"
    }
}
