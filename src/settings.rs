use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

const ENV_PREFIX: &str = "IBQA";
const DEFAULT_INPUT: &str = "extracted_full.txt";
const DEFAULT_OUTPUT: &str = "ib_questions.json";

/// Default paths: built-in values, overridden by `IBQA_INPUT` / `IBQA_OUTPUT`.
/// CLI flags win over both.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_with_prefix(ENV_PREFIX)
    }

    fn load_with_prefix(prefix: &str) -> Self {
        match Self::build(prefix) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "bad configuration, using defaults");
                Settings::default()
            }
        }
    }

    fn build(prefix: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("input", DEFAULT_INPUT)?
            .set_default("output", DEFAULT_OUTPUT)?
            .add_source(Environment::with_prefix(prefix))
            .build()?
            .try_deserialize()
    }
}
