use std::sync::Arc;

use sylph_core::{ActuatorHandle, ActuatorId, JobActuator, Resolver, RunnerContext};

pub struct SparkStreamingSqlActuator {
    ctx: Arc<RunnerContext>,
}

impl SparkStreamingSqlActuator {
    pub const ID: ActuatorId = ActuatorId::new("sylph_spark::SparkStreamingSqlActuator");

    pub(crate) fn create(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Self { ctx: r.context()? }))
    }

    pub fn context(&self) -> &RunnerContext {
        &self.ctx
    }
}

impl JobActuator for SparkStreamingSqlActuator {
    fn id(&self) -> ActuatorId {
        Self::ID
    }

    fn job_type(&self) -> &'static str {
        "SparkStreamingSql"
    }

    fn description(&self) -> &'static str {
        "spark streaming sql"
    }
}

pub struct StructuredStreamingSqlActuator {
    ctx: Arc<RunnerContext>,
}

impl StructuredStreamingSqlActuator {
    pub const ID: ActuatorId = ActuatorId::new("sylph_spark::StructuredStreamingSqlActuator");

    pub(crate) fn create(r: &Resolver<'_>) -> anyhow::Result<ActuatorHandle> {
        Ok(Arc::new(Self { ctx: r.context()? }))
    }

    pub fn context(&self) -> &RunnerContext {
        &self.ctx
    }
}

impl JobActuator for StructuredStreamingSqlActuator {
    fn id(&self) -> ActuatorId {
        Self::ID
    }

    fn job_type(&self) -> &'static str {
        "StructuredStreamingSql"
    }

    fn description(&self) -> &'static str {
        "spark structured streaming sql"
    }
}
