mod runner_identity;
pub use runner_identity::RunnerIdentity;

mod capability_key;
pub use capability_key::CapabilityKey;

mod factory_id;
pub use factory_id::ContainerFactoryId;

mod plugin_info;
pub use plugin_info::PluginInfo;

/// Flat key/value configuration handed to a runner by the host.
pub type RunnerConf = std::collections::HashMap<String, String>;
