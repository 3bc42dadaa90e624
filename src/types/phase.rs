use colored::*;
use strum_macros::Display;

/// Lifecycle of a single launch.
///
/// `Pending -> Migrating -> {Failed | Migrated -> Serving}`. `Failed` and
/// `Serving` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Pending,
    Migrating,
    Failed,
    Migrated,
    Serving,
}

impl Phase {
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Pending, Phase::Migrating)
                | (Phase::Pending, Phase::Failed)
                | (Phase::Migrating, Phase::Failed)
                | (Phase::Migrating, Phase::Migrated)
                | (Phase::Migrated, Phase::Serving)
        )
    }

    pub fn to_colored_string(&self) -> String {
        match self {
            Phase::Pending => "PENDING".bright_black().to_string(),
            Phase::Migrating => "MIGRATING".blue().bold().to_string(),
            Phase::Failed => "FAILED".red().bold().to_string(),
            Phase::Migrated => "MIGRATED".green().to_string(),
            Phase::Serving => "SERVING".green().bold().to_string(),
        }
    }
}
