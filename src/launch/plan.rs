use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    config::{MigrationConfig, ServerConfig, Settings},
    errors::LaunchError,
    launch::LaunchEnv,
    types::{CommandSpec, LaunchMode},
};

/// Fully resolved command lines for one launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub migration: CommandSpec,
    pub server: CommandSpec,
    pub host: String,
    pub port: String,
    pub mode: LaunchMode,
}

impl LaunchPlan {
    pub fn resolve(settings: &Settings, env: &LaunchEnv) -> Result<Self, LaunchError> {
        let host = settings.server.host.clone();
        let port = env.port_str()?.to_string();

        Ok(Self {
            migration: migration_command(&settings.migration),
            server: server_command(&settings.server, &host, &port)?,
            host,
            port,
            mode: LaunchMode::from_replace_flag(settings.server.replace_process),
        })
    }
}

fn migration_command(config: &MigrationConfig) -> CommandSpec {
    let mut args = config.args.clone();
    if let Some(flag) = &config.verbose_flag {
        args.push(flag.clone());
    }
    CommandSpec::new(config.program.clone(), args)
}

fn server_command(config: &ServerConfig, host: &str, port: &str) -> Result<CommandSpec, LaunchError> {
    let mut ctx = Context::new();
    ctx.insert("host", host);
    ctx.insert("port", port);

    let mut t = Tera::default();
    let args = config
        .args
        .iter()
        .map(|arg| {
            t.render_str(arg, &ctx).map_err(|source| LaunchError::Template {
                arg: arg.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommandSpec::new(config.program.clone(), args))
}
