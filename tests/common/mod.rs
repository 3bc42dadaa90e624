use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use tempfile::TempDir;

const SCRUBBED_VARS: &[&str] = &[
    "DATABASE_URL",
    "PORT",
    "RUST_LOG",
    "LAUNCHPAD_ENV",
    "LAUNCHPAD__VARS__REQUIRED",
    "LAUNCHPAD__SERVER__REPLACE_PROCESS",
];

/// Scratch directory with fake migration and server scripts.
///
/// Both scripts append one line per invocation to `calls.log` so tests can
/// check what ran, in which order, and with which arguments.
pub struct Harness {
    dir: TempDir,
}

impl Harness {
    pub fn new(migration_exit: i32, server_exit: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let harness = Self { dir };

        harness.write_script(
            "migrate.sh",
            &format!("echo \"migrate $*\" >> \"$LAUNCH_LOG\"\nexit {}\n", migration_exit),
        );
        harness.write_script(
            "server.sh",
            &format!(
                "echo \"serve $* db=$DATABASE_URL\" >> \"$LAUNCH_LOG\"\nexit {}\n",
                server_exit
            ),
        );
        harness
    }

    fn write_script(&self, name: &str, body: &str) {
        std::fs::write(self.dir.path().join(name), format!("#!/bin/sh\n{}", body)).unwrap();
    }

    /// Replaces the fake server with `body`.
    pub fn write_server_script(&self, body: &str) {
        self.write_script("server.sh", body);
    }

    /// Writes the dotenv file the launcher is pointed at.
    pub fn write_env_file(&self, contents: &str) {
        std::fs::write(self.path("launchpad.env"), contents).unwrap();
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Launcher invocation wired to the fake scripts.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_launchpad"));
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("LAUNCHPAD_ENV_FILE", self.path("launchpad.env"))
            .env("LAUNCH_LOG", self.path("calls.log"))
            .env("LAUNCHPAD__LOGS__LEVEL", "warn")
            .env("LAUNCHPAD__MIGRATION__PROGRAM", "sh")
            .env(
                "LAUNCHPAD__MIGRATION__ARGS",
                json_args(&[&self.path("migrate.sh")]),
            )
            .env("LAUNCHPAD__SERVER__PROGRAM", "sh")
            .env(
                "LAUNCHPAD__SERVER__ARGS",
                format!(
                    r#"["{}", "--host", "{{{{ host }}}}", "--port", "{{{{ port }}}}"]"#,
                    self.path("server.sh").display()
                ),
            );
        cmd
    }

    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Polls the call log until `line` shows up or `timeout` passes.
    pub fn wait_for_call(&self, line: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.calls().iter().any(|call| call == line) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }
}

fn json_args(paths: &[&Path]) -> String {
    let items: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    serde_json::to_string(&items).unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
