use std::io;

use thiserror::Error;

/// Shell convention for "command not found".
pub const EXIT_NOT_FOUND: i32 = 127;
/// Shell convention for "found but not executable".
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Migration failed with exit status {code}")]
    MigrationFailed { code: i32 },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render server argument '{arg}': {source}")]
    Template {
        arg: String,
        #[source]
        source: tera::Error,
    },

    #[error("The following environment variables are not set: {vars}")]
    MissingEnvironment { vars: String },

    #[error("{var} is not valid Unicode")]
    NonUnicode { var: String },

    #[error("Failed to install signal handler: {source}")]
    SignalHandler {
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    pub fn spawn(program: &str, source: io::Error) -> Self {
        Self::Spawn {
            program: program.to_string(),
            source,
        }
    }

    pub fn missing_from_vec(missing: Vec<String>) -> Self {
        Self::MissingEnvironment {
            vars: missing.join(", "),
        }
    }

    /// Process exit status the launcher reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::MigrationFailed { code } => *code,
            LaunchError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
                _ => 1,
            },
            LaunchError::Wait { .. }
            | LaunchError::Template { .. }
            | LaunchError::MissingEnvironment { .. }
            | LaunchError::NonUnicode { .. }
            | LaunchError::SignalHandler { .. } => 1,
        }
    }
}
