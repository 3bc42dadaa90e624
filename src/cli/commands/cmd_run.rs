use tracing::debug;

use crate::{
    config::Settings,
    errors::LaunchError,
    launch::{LaunchEnv, LaunchPlan, Sequencer, SystemRunner},
};

/// Default command: diagnostics, migrations, then the server.
pub async fn execute(settings: &Settings) -> i32 {
    match launch(settings).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            e.exit_code()
        }
    }
}

async fn launch(settings: &Settings) -> Result<i32, LaunchError> {
    let env = LaunchEnv::from_process(&settings.vars);
    let plan = LaunchPlan::resolve(settings, &env)?;
    debug!(?plan, "Resolved launch plan");

    Sequencer::new(plan, env, &SystemRunner, std::io::stdout())
        .run()
        .await
}
