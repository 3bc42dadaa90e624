pub mod diagnostics;
pub mod environment;
pub mod plan;
pub mod runner;
pub mod sequencer;

pub use environment::LaunchEnv;
pub use plan::LaunchPlan;
pub use runner::{ProcessRunner, SystemRunner};
pub use sequencer::Sequencer;
