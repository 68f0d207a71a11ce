use crate::error::{Error, Result};
use crate::prompt::TextGenerationConfig;
use std::path::PathBuf;

pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PROFILE: &str = "Deepak";
pub const DEFAULT_LOG_FILE: &str = "FinalOutput.rtf";

/// Everything a run needs. Defaults reproduce the fixed behaviour of running
/// with no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model_id: String,
    pub region: String,
    /// Name of an already configured AWS profile.
    pub profile: String,
    pub log_path: PathBuf,
    pub generation: TextGenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.into(),
            region: DEFAULT_REGION.into(),
            profile: DEFAULT_PROFILE.into(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            generation: TextGenerationConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        unit_interval("temperature", self.generation.temperature)?;
        unit_interval("topP", self.generation.top_p)?;
        if self.generation.max_token_count == 0 {
            return Err(Error::InvalidConfig {
                field: "maxTokenCount",
                reason: "must be greater than zero".into(),
            });
        }
        if self.model_id.trim().is_empty() {
            return Err(Error::InvalidConfig {
                field: "modelId",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            reason: format!("{value} is outside [0, 1]"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model_id, "amazon.titan-text-express-v1");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.log_path, PathBuf::from("FinalOutput.rtf"));
    }

    #[test]
    fn rejects_out_of_range_sampling() {
        let mut config = Config::default();
        config.generation.temperature = 1.5;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { field: "temperature", .. })
        ));

        let mut config = Config::default();
        config.generation.top_p = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { field: "topP", .. })
        ));
    }

    #[test]
    fn rejects_zero_max_tokens() {
        let mut config = Config::default();
        config.generation.max_token_count = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { field: "maxTokenCount", .. })
        ));
    }
}
