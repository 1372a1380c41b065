use serde::Deserialize;

/// Where the Spark runner looks for the engine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkRunnerConfig {
    /// Environment variable holding the Spark home directory.
    pub home_var: String,
    /// Library directory under the Spark home.
    pub lib_dir: String,
}

impl Default for SparkRunnerConfig {
    fn default() -> Self {
        Self {
            home_var: "SPARK_HOME".to_string(),
            lib_dir: "jars".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: SparkRunnerConfig = serde_json::from_str(r#"{"libDir":"lib"}"#).unwrap();

        assert_eq!(cfg.home_var, "SPARK_HOME");
        assert_eq!(cfg.lib_dir, "lib");
    }
}
