mod plugin;
pub use plugin::PluginKind;
