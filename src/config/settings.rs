use config::{Config, ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};

use crate::config::{LogConfig, MigrationConfig, ServerConfig, VarsConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub vars: VarsConfig,

    #[serde(default)]
    pub migration: MigrationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logs: LogConfig,
}

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("LAUNCHPAD_ENV_FILE") {
        return env_file;
    }
    if let Ok(env) = std::env::var("LAUNCHPAD_ENV") {
        match env.to_lowercase().as_str() {
            "dev" => return ".env.dev".to_string(),
            "test" => return ".env.test".to_string(),
            _ => return ".env".to_string(),
        }
    }
    ".env".to_string()
}

/// `LAUNCHPAD__*` pairs from the dotenv file. Other keys are ignored and the
/// process environment is never modified.
fn read_env_file(path: &str) -> Map<String, String> {
    let Ok(iter) = dotenvy::from_filename_iter(path) else {
        return Map::new();
    };

    iter.filter_map(Result::ok)
        .filter(|(key, _)| key.starts_with("LAUNCHPAD__"))
        .collect()
}

fn launchpad_env() -> Environment {
    Environment::with_prefix("LAUNCHPAD")
        .prefix_separator("__")
        .separator("__")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let env_file = read_env_file(&get_env_file_name());

        // Process environment wins over the dotenv file.
        let settings = Config::builder()
            .add_source(launchpad_env().source(Some(env_file)))
            .add_source(launchpad_env())
            .build()?;

        settings.try_deserialize()
    }

    pub fn print_config(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize settings: {}", err),
        }
    }
}
