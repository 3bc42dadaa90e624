use serde::{Deserialize, Serialize};

use crate::config::args::{deserialize_args, deserialize_optional_flag};

/// External schema-migration runner, invoked once and waited on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args", deserialize_with = "deserialize_args")]
    pub args: Vec<String>,

    /// Appended after `args`. Blank disables it.
    #[serde(
        default = "default_verbose_flag",
        deserialize_with = "deserialize_optional_flag"
    )]
    pub verbose_flag: Option<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            verbose_flag: default_verbose_flag(),
        }
    }
}

fn default_program() -> String {
    "alembic".to_string()
}

fn default_args() -> Vec<String> {
    vec!["upgrade".to_string(), "head".to_string()]
}

fn default_verbose_flag() -> Option<String> {
    Some("--verbose".to_string())
}
