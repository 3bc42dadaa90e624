use std::io::Write;

use tracing::{error, info};

use crate::{
    errors::LaunchError,
    launch::{
        LaunchEnv, LaunchPlan, ProcessRunner,
        diagnostics::{self, Diagnostics},
    },
    types::Phase,
};

/// Orders the migration run and the server launch, failing fast.
///
/// The server is never started unless the migration exited with status 0.
pub struct Sequencer<'r, R, W>
where
    R: ProcessRunner,
    W: Write,
{
    plan: LaunchPlan,
    env: LaunchEnv,
    runner: &'r R,
    diagnostics: Diagnostics<W>,
    phase: Phase,
}

impl<'r, R, W> Sequencer<'r, R, W>
where
    R: ProcessRunner,
    W: Write,
{
    pub fn new(plan: LaunchPlan, env: LaunchEnv, runner: &'r R, out: W) -> Self {
        Self {
            plan,
            env,
            runner,
            diagnostics: Diagnostics::new(out),
            phase: Phase::Pending,
        }
    }

    /// Runs the launch to a terminal phase and returns the server's exit status.
    pub async fn run(mut self) -> Result<i32, LaunchError> {
        self.report_connection_string();

        if !self.env.missing_required.is_empty() {
            self.transition(Phase::Failed);
            let missing = std::mem::take(&mut self.env.missing_required);
            error!(vars = ?missing, "Required environment variables are not set");
            return Err(LaunchError::missing_from_vec(missing));
        }

        self.transition(Phase::Migrating);
        self.diagnostics.line(diagnostics::MIGRATING);
        info!(command = %self.plan.migration, "Running migrations");

        let code = match self.runner.run(&self.plan.migration).await {
            Ok(code) => code,
            Err(e) => {
                self.transition(Phase::Failed);
                error!(error = %e, "Migration could not be run");
                return Err(e);
            }
        };

        if code != 0 {
            self.transition(Phase::Failed);
            error!(code, "Migration failed, server will not be started");
            return Err(LaunchError::MigrationFailed { code });
        }

        self.transition(Phase::Migrated);
        self.diagnostics.line(diagnostics::MIGRATED);

        self.transition(Phase::Serving);
        self.diagnostics
            .line(diagnostics::serving_line(&self.plan.host, &self.plan.port));
        info!(command = %self.plan.server, mode = %self.plan.mode, "Launching server");

        let code = self.runner.launch(&self.plan.server, self.plan.mode).await?;
        info!(code, "Server exited");

        Ok(code)
    }

    fn report_connection_string(&mut self) {
        let var = &self.env.connection_string_var;
        self.diagnostics.line(diagnostics::presence_line(
            var,
            self.env.connection_string_set(),
        ));
        self.diagnostics.line(diagnostics::prefix_line(
            var,
            &self.env.connection_string_prefix(),
        ));
    }

    fn transition(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid launch transition {} -> {}",
            self.phase,
            next
        );
        info!(from = %self.phase, to = %next, "Launch phase changed");
        self.phase = next;
    }
}
