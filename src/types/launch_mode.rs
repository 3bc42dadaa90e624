use serde::Serialize;
use strum_macros::Display;

/// How the server process is started once migrations are done.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// Replace the launcher's process image with the server.
    Replace,
    /// Spawn the server as a child and wait for it.
    Supervise,
}

impl LaunchMode {
    pub fn from_replace_flag(replace_process: bool) -> Self {
        if replace_process {
            LaunchMode::Replace
        } else {
            LaunchMode::Supervise
        }
    }
}
