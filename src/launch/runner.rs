use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{info, warn};

use crate::{
    errors::LaunchError,
    types::{CommandSpec, LaunchMode},
};

/// Seam between the sequencer and the operating system.
///
/// Both calls inherit the launcher's environment and standard streams.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Runs `command` to completion and returns its exit status.
    async fn run(&self, command: &CommandSpec) -> Result<i32, LaunchError>;

    /// Starts the server. Returns the server's exit status once it has
    /// exited, or an error when it could not be started. With
    /// `LaunchMode::Replace` a successful start never returns.
    async fn launch(&self, command: &CommandSpec, mode: LaunchMode) -> Result<i32, LaunchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<i32, LaunchError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .spawn()
            .map_err(|e| LaunchError::spawn(&command.program, e))?;

        let status = child.wait().await.map_err(|source| LaunchError::Wait {
            program: command.program.clone(),
            source,
        })?;

        Ok(status_code(status))
    }

    async fn launch(&self, command: &CommandSpec, mode: LaunchMode) -> Result<i32, LaunchError> {
        match mode {
            LaunchMode::Replace => replace_or_supervise(command).await,
            LaunchMode::Supervise => supervise(command).await,
        }
    }
}

#[cfg(unix)]
async fn replace_or_supervise(command: &CommandSpec) -> Result<i32, LaunchError> {
    use std::os::unix::process::CommandExt;

    crate::utils::logger::flush_file_log();

    // `exec` only returns on failure.
    let source = std::process::Command::new(&command.program)
        .args(&command.args)
        .exec();
    Err(LaunchError::spawn(&command.program, source))
}

#[cfg(not(unix))]
async fn replace_or_supervise(command: &CommandSpec) -> Result<i32, LaunchError> {
    warn!("Process replacement is not available on this platform, supervising the server instead");
    supervise(command).await
}

#[cfg(unix)]
async fn supervise(command: &CommandSpec) -> Result<i32, LaunchError> {
    use nix::{sys::signal::Signal, unistd::Pid};
    use tokio::signal::unix::{SignalKind, signal};

    // Handlers must be in place before the server exists.
    let mut terminate =
        signal(SignalKind::terminate()).map_err(|source| LaunchError::SignalHandler { source })?;
    let mut interrupt =
        signal(SignalKind::interrupt()).map_err(|source| LaunchError::SignalHandler { source })?;

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .spawn()
        .map_err(|e| LaunchError::spawn(&command.program, e))?;
    let pid = child.id().and_then(|id| i32::try_from(id).ok()).map(Pid::from_raw);

    // The server decides how to shut down; its own status is what gets reported.
    let status = loop {
        tokio::select! {
            status = child.wait() => break status,
            Some(()) = terminate.recv() => forward_signal(&command.program, pid, Signal::SIGTERM),
            Some(()) = interrupt.recv() => forward_signal(&command.program, pid, Signal::SIGINT),
        }
    }
    .map_err(|source| LaunchError::Wait {
        program: command.program.clone(),
        source,
    })?;

    Ok(status_code(status))
}

#[cfg(unix)]
fn forward_signal(program: &str, pid: Option<nix::unistd::Pid>, signal: nix::sys::signal::Signal) {
    info!(program, signal = signal.as_str(), "Forwarding signal to server");

    let Some(pid) = pid else {
        return;
    };
    if let Err(e) = nix::sys::signal::kill(pid, signal) {
        warn!(error = %e, "Failed to signal server");
    }
}

#[cfg(not(unix))]
async fn supervise(command: &CommandSpec) -> Result<i32, LaunchError> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .spawn()
        .map_err(|e| LaunchError::spawn(&command.program, e))?;

    let status = tokio::select! {
        status = child.wait() => status,
        _ = shutdown_signal() => {
            info!(program = %command.program, "Stopping server");
            if let Err(e) = child.start_kill() {
                warn!(error = %e, "Failed to signal server");
            }
            child.wait().await
        }
    }
    .map_err(|source| LaunchError::Wait {
        program: command.program.clone(),
        source,
    })?;

    Ok(status_code(status))
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a handler there is nothing to wait for.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Exit code of a finished child. Death by signal maps to `128 + signal`.
pub fn status_code(status: ExitStatus) -> i32 {
    status.code().or_else(|| signal_code(status)).unwrap_or(1)
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;

    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_: ExitStatus) -> Option<i32> {
    None
}
