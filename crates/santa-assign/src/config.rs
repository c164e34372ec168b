use serde::{Deserialize, Serialize};

use santa_core::errors::{ErrorInfo, SantaError};

/// YAML-configurable parameters governing an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of fresh random trajectories tried before a deadlock is reported.
    ///
    /// The default covers rosters of a dozen or so participants at any gift
    /// count; dense assignments on larger rosters need a larger budget.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Run the verifier on a successful trajectory before committing it.
    #[serde(default = "default_self_check")]
    pub self_check: bool,
}

fn default_max_attempts() -> usize {
    32
}

fn default_self_check() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            self_check: default_self_check(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from YAML, applying defaults for missing keys.
    pub fn from_yaml_str(source: &str) -> Result<Self, SantaError> {
        let config: EngineConfig = serde_yaml::from_str(source).map_err(|err| {
            SantaError::Config(ErrorInfo::new("invalid-yaml", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), SantaError> {
        if self.max_attempts == 0 {
            return Err(SantaError::Config(
                ErrorInfo::new("zero-attempts", "max_attempts must be at least 1")
                    .with_hint("omit the key to use the default retry budget"),
            ));
        }
        Ok(())
    }
}
