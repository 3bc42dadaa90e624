pub mod cmd_plan;
pub mod cmd_run;
pub mod cmd_version;

use clap::Subcommand;

use crate::cli::commands::{cmd_plan::PlanCommand, cmd_version::VersionCommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved launch plan without running anything
    Plan(PlanCommand),

    /// Print version
    Version(VersionCommand),
}

pub trait ExitOnErr<T> {
    fn exit_on_err(self, msg: &str) -> T;
}

impl<T, E: std::fmt::Display> ExitOnErr<T> for Result<T, E> {
    fn exit_on_err(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("❌ {}: {}", msg, e);
                std::process::exit(1);
            }
        }
    }
}
