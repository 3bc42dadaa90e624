mod commands;

use clap::Parser;
use colored::Colorize;

pub use crate::cli::commands::ExitOnErr;
use crate::cli::commands::{Commands, cmd_plan, cmd_run, cmd_version};
use crate::config::Settings;

pub struct Context<'a> {
    pub settings: &'a Settings,
}

#[derive(Parser, Debug)]
#[command(
    name = "launchpad",
    about = "Run database migrations, then start the application server",
    long_about = format!(
r#"{} - {}
Without a subcommand: print connection diagnostics, run the migration tool and,
only if it succeeds, replace this process with the application server."#,
"LAUNCHPAD".green().bold(),
"Fail-fast startup sequencer.",
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Runs the selected command and returns the process exit status.
    pub async fn execute(&self, ctx: &Context<'_>) -> i32 {
        match &self.command {
            Some(Commands::Plan(args)) => cmd_plan::execute(args, ctx.settings).await,
            Some(Commands::Version(action)) => cmd_version::execute(action).await,
            None => cmd_run::execute(ctx.settings).await,
        }
    }
}
