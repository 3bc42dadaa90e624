use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An external program and its argument vector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Space-joined arguments; empty arguments show as `''`.
    pub fn args_line(&self) -> String {
        self.args
            .iter()
            .map(|a| if a.is_empty() { "''" } else { a.as_str() })
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args_line();
        if args.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, args)
        }
    }
}
