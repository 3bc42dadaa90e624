#![cfg(unix)]

mod common;

use std::process::Stdio;
use std::time::Duration;

use common::{Harness, stdout};
use nix::{
    sys::signal::{Signal, kill},
    unistd::Pid,
};

#[test]
fn test_unset_connection_string_launches_server() {
    let harness = Harness::new(0, 0);

    let output = harness.command().env("PORT", "8080").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "=== DATABASE_URL set: NO ===\n\
         === DATABASE_URL starts with: ... ===\n\
         === Running database migrations ===\n\
         === Migrations complete ===\n\
         === Starting server on 0.0.0.0:8080 ===\n"
    );
    assert_eq!(
        harness.calls(),
        vec![
            "migrate --verbose".to_string(),
            "serve --host 0.0.0.0 --port 8080 db=".to_string(),
        ]
    );
}

#[test]
fn test_connection_string_prefix_and_passthrough() {
    let harness = Harness::new(0, 0);

    let output = harness
        .command()
        .env("DATABASE_URL", "postgres://u:p@host/db")
        .env("PORT", "3000")
        .output()
        .unwrap();

    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("=== DATABASE_URL set: YES ===\n"));
    assert!(out.contains("=== DATABASE_URL starts with: postgres://u:p@... ===\n"));
    assert!(!out.contains("host/db"));

    // The full value reaches the server untouched through the environment.
    let calls = harness.calls();
    assert_eq!(calls[0], "migrate --verbose");
    assert_eq!(
        calls[1],
        "serve --host 0.0.0.0 --port 3000 db=postgres://u:p@host/db"
    );
}

#[test]
fn test_migration_failure_never_starts_server() {
    let harness = Harness::new(1, 0);

    let output = harness.command().env("PORT", "8080").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(harness.calls(), vec!["migrate --verbose".to_string()]);
    let out = stdout(&output);
    assert!(out.contains("=== Running database migrations ===\n"));
    assert!(!out.contains("Migrations complete"));
    assert!(!out.contains("Starting server"));
}

#[test]
fn test_migration_status_is_propagated() {
    let harness = Harness::new(3, 0);

    let output = harness.command().output().unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(harness.calls().len(), 1);
}

#[test]
fn test_server_status_becomes_exit_status() {
    let harness = Harness::new(0, 5);

    let output = harness.command().env("PORT", "9000").output().unwrap();

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(harness.calls().len(), 2);
}

#[test]
fn test_supervised_server_status_becomes_exit_status() {
    let harness = Harness::new(0, 6);

    let output = harness
        .command()
        .env("PORT", "9000")
        .env("LAUNCHPAD__SERVER__REPLACE_PROCESS", "false")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(6));
    assert_eq!(harness.calls()[1], "serve --host 0.0.0.0 --port 9000 db=");
}

#[test]
fn test_port_is_forwarded_verbatim() {
    let harness = Harness::new(0, 0);

    let output = harness.command().env("PORT", "08080").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(harness.calls()[1], "serve --host 0.0.0.0 --port 08080 db=");
}

#[test]
fn test_missing_migration_tool_exits_127() {
    let harness = Harness::new(0, 0);

    let output = harness
        .command()
        .env("LAUNCHPAD__MIGRATION__PROGRAM", "launchpad-no-such-migrator")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(127));
    assert!(harness.calls().is_empty());
    assert!(!stdout(&output).contains("Starting server"));
}

#[test]
fn test_required_variables_are_checked_before_migrating() {
    let harness = Harness::new(0, 0);

    let output = harness
        .command()
        .env("LAUNCHPAD__VARS__REQUIRED", "DATABASE_URL,PORT")
        .env("PORT", "8080")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(harness.calls().is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("DATABASE_URL"));
}

#[test]
fn test_plan_command_runs_nothing() {
    let harness = Harness::new(0, 0);

    let output = harness
        .command()
        .args(["plan", "--json"])
        .env("DATABASE_URL", "postgres://u:p@host/db")
        .env("PORT", "8080")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(harness.calls().is_empty());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["connection_string_set"], true);
    assert_eq!(plan["connection_string_prefix"], "postgres://u:p@");
    assert_eq!(plan["plan"]["server"]["args"][4], "8080");
    assert_eq!(plan["plan"]["migration"]["args"][1], "--verbose");
}

#[test]
fn test_env_file_only_configures_the_launcher() {
    let harness = Harness::new(0, 0);
    harness.write_env_file(
        "DATABASE_URL=postgres://from-dotenv/db\nLAUNCHPAD__SERVER__HOST=127.0.0.1\n",
    );

    let output = harness.command().env("PORT", "1").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("=== DATABASE_URL set: NO ===\n"));
    assert!(out.contains("=== DATABASE_URL starts with: ... ===\n"));
    assert!(out.contains("=== Starting server on 127.0.0.1:1 ===\n"));
    assert_eq!(harness.calls()[1], "serve --host 127.0.0.1 --port 1 db=");
}

#[test]
fn test_supervised_server_receives_sigterm() {
    let harness = Harness::new(0, 0);
    harness.write_server_script(
        "trap 'echo stopped >> \"$LAUNCH_LOG\"; exit 7' TERM\n\
         echo started >> \"$LAUNCH_LOG\"\n\
         while :; do sleep 1; done\n",
    );

    let mut launcher = harness
        .command()
        .env("PORT", "9000")
        .env("LAUNCHPAD__SERVER__REPLACE_PROCESS", "false")
        .stdout(Stdio::null())
        .spawn()
        .unwrap();

    if !harness.wait_for_call("started", Duration::from_secs(10)) {
        launcher.kill().unwrap();
        panic!("server never started: {:?}", harness.calls());
    }

    kill(Pid::from_raw(launcher.id() as i32), Signal::SIGTERM).unwrap();
    let status = launcher.wait().unwrap();

    assert_eq!(status.code(), Some(7));
    assert_eq!(harness.calls(), vec!["migrate --verbose", "started", "stopped"]);
}
