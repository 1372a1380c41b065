//! Static mapping from runner identity to the container factory that runs its jobs.

use std::collections::HashMap;

use sylph_model::{ContainerFactoryId, RunnerIdentity};
use tracing::warn;

use crate::error::CoreError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerFactoryBinding {
    pub runner: RunnerIdentity,
    pub factory: ContainerFactoryId,
}

/// Read-only lookup table, built once and shared by reference.
#[derive(Clone, Debug, Default)]
pub struct ContainerFactoryTable {
    bindings: HashMap<RunnerIdentity, ContainerFactoryId>,
}

impl ContainerFactoryTable {
    pub fn builder() -> ContainerFactoryTableBuilder {
        ContainerFactoryTableBuilder::default()
    }

    pub fn select(&self, identity: &RunnerIdentity) -> Result<ContainerFactoryBinding, CoreError> {
        self.bindings
            .get(identity)
            .map(|factory| ContainerFactoryBinding {
                runner: identity.clone(),
                factory: factory.clone(),
            })
            .ok_or_else(|| CoreError::UnknownRunnerIdentity(identity.clone()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ContainerFactoryTableBuilder {
    bindings: HashMap<RunnerIdentity, ContainerFactoryId>,
}

impl ContainerFactoryTableBuilder {
    /// Bind `runner` to `factory`. The first binding for a runner wins.
    pub fn bind(mut self, runner: RunnerIdentity, factory: ContainerFactoryId) -> Self {
        if let Some(existing) = self.bindings.get(&runner) {
            warn!(%runner, %existing, ignored = %factory, "container factory already bound");
            return self;
        }
        self.bindings.insert(runner, factory);
        self
    }

    pub fn build(self) -> ContainerFactoryTable {
        ContainerFactoryTable {
            bindings: self.bindings,
        }
    }
}
