use std::ffi::OsString;

use crate::{config::VarsConfig, errors::LaunchError};

/// Number of leading characters of the connection string shown in diagnostics.
pub const PREFIX_LEN: usize = 15;

/// The forwarded environment values, read once at startup.
///
/// Neither value is parsed or validated here; both reach the child processes
/// untouched through the inherited environment. The connection string is only
/// displayed, so it is decoded lossily. The port is kept as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnv {
    pub connection_string_var: String,
    pub connection_string: Option<String>,
    pub port_var: String,
    pub port: Option<OsString>,
    /// Entries of `VarsConfig::required` that were unset or empty.
    pub missing_required: Vec<String>,
}

impl LaunchEnv {
    pub fn from_process(vars: &VarsConfig) -> Self {
        Self::from_lookup(vars, |name| std::env::var_os(name))
    }

    pub fn from_lookup<F, V>(vars: &VarsConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<V>,
        V: Into<OsString>,
    {
        let get = |name: &str| -> Option<OsString> { lookup(name).map(Into::into) };

        let missing_required = vars
            .required
            .iter()
            .filter(|name| get(name).is_none_or(|v| v.is_empty()))
            .cloned()
            .collect();

        Self {
            connection_string_var: vars.connection_string.clone(),
            connection_string: get(&vars.connection_string)
                .map(|v| v.to_string_lossy().into_owned()),
            port_var: vars.port.clone(),
            port: get(&vars.port),
            missing_required,
        }
    }

    /// True iff the connection string is set and non-empty.
    pub fn connection_string_set(&self) -> bool {
        self.connection_string.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// First `PREFIX_LEN` characters of the connection string, empty when unset.
    ///
    /// This is an informational truncation, not redaction: credentials that
    /// fall inside the prefix (e.g. `postgres://u:p@`) are printed as-is.
    pub fn connection_string_prefix(&self) -> String {
        self.connection_string
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(PREFIX_LEN)
            .collect()
    }

    /// The port exactly as found in the environment, empty when unset.
    ///
    /// A value that is not valid Unicode is an error rather than being altered.
    pub fn port_str(&self) -> Result<&str, LaunchError> {
        match &self.port {
            None => Ok(""),
            Some(port) => port.to_str().ok_or_else(|| LaunchError::NonUnicode {
                var: self.port_var.clone(),
            }),
        }
    }
}
