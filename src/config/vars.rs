use serde::{Deserialize, Serialize};

use crate::config::args::deserialize_names;

/// Names of the environment variables the launcher inspects and forwards.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct VarsConfig {
    #[serde(default = "default_connection_string")]
    pub connection_string: String,

    #[serde(default = "default_port")]
    pub port: String,

    /// Variables that must be set and non-empty before migrations run.
    #[serde(default, deserialize_with = "deserialize_names")]
    pub required: Vec<String>,
}

impl Default for VarsConfig {
    fn default() -> Self {
        Self {
            connection_string: default_connection_string(),
            port: default_port(),
            required: Vec::new(),
        }
    }
}

fn default_connection_string() -> String {
    "DATABASE_URL".to_string()
}

fn default_port() -> String {
    "PORT".to_string()
}
