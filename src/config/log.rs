use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for the rolling JSON log. No file log when unset.
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_console_format")]
    pub console_format: String,

    #[serde(default = "default_true")]
    pub file_enabled: bool,

    #[serde(default, deserialize_with = "deserialize_ext_level")]
    pub ext_level: HashMap<String, String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            console_format: default_console_format(),
            file_enabled: default_true(),
            ext_level: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Filter directive built from `level` and the per-target overrides.
    pub fn filter_directive(&self) -> String {
        let mut targets: Vec<_> = self.ext_level.iter().collect();
        targets.sort();

        let mut filter = self.level.clone();
        for (target, level) in targets {
            filter.push_str(&format!(",{}={}", target, level));
        }
        filter
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

fn deserialize_ext_level<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;

    let mut map = HashMap::new();
    if let Some(s) = s {
        for pair in s.split(',') {
            if let Some((key, value)) = pair.trim().split_once(':') {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    Ok(map)
}
