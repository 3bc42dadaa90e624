//! Fail-fast startup sequencer: report on the database connection string,
//! run the schema migrations, then hand over to the application server.

pub mod cli;
pub mod config;
pub mod errors;
pub mod launch;
pub mod types;
pub mod utils;
