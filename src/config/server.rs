use serde::{Deserialize, Serialize};

use crate::config::args::deserialize_args;

/// Long-running application server started after migrations succeed.
///
/// Each entry of `args` is a template rendered with `host` and `port`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args", deserialize_with = "deserialize_args")]
    pub args: Vec<String>,

    #[serde(default = "default_host")]
    pub host: String,

    /// Replace the launcher's process image instead of supervising a child.
    #[serde(default = "default_true")]
    pub replace_process: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            host: default_host(),
            replace_process: default_true(),
        }
    }
}

fn default_program() -> String {
    "uvicorn".to_string()
}

fn default_args() -> Vec<String> {
    ["app.main:app", "--host", "{{ host }}", "--port", "{{ port }}"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}
