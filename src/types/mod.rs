mod command_spec;
mod launch_mode;
mod phase;

pub use command_spec::CommandSpec;
pub use launch_mode::LaunchMode;
pub use phase::Phase;
