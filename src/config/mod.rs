pub mod args;
pub mod log;
pub mod migration;
pub mod server;
pub mod settings;
pub mod vars;

pub use log::LogConfig;
pub use migration::MigrationConfig;
pub use server::ServerConfig;
pub use settings::Settings;
pub use vars::VarsConfig;
