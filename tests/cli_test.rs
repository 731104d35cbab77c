//! Integration tests for the provision binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(temp: &TempDir, config: &str) -> PathBuf {
    let path = temp.path().join("config.yml");
    fs::write(&path, config).unwrap();
    path
}

/// A command isolated from the caller's home directory and prompt answers.
fn provision(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("provision"));
    cmd.env("HOME", home.path())
        .env_remove("PROVISION_PROMPT_CONTINUE")
        .env_remove("RUST_LOG");
    cmd
}

/// Packages install through `sh -c 'exit N' sh <name>`, so the exit code
/// is chosen per manager.
const MACHINE_CONFIG: &str = r#"
preflight:
  probes:
    - name: Shell
      command: [sh, -c, "echo sh 1.0"]
      remedy: Install a shell.
managers:
  brew: [sh, -c, "exit 0", sh]
  pip: [sh, -c, "exit 4", sh]
  gem: [sh, -c, "exit 0", sh]
packages:
  - { manager: brew, name: ack }
  - { manager: pip, name: virtualenv }
  - { manager: gem, name: json }
sdk:
  enabled: false
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("machine"))
        .stdout(predicate::str::contains("panda"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_without_subcommand_fails_with_usage() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn panda_without_roles_prints_usage() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.arg("panda");
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("--environment"));
    Ok(())
}

#[test]
fn unknown_flag_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.args(["panda", "--bogus"]);
    cmd.assert().failure();
    Ok(())
}

#[test]
fn config_defaults_to_builtin() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.arg("config");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<built-in>"))
        .stdout(predicate::str::contains("homebrew/versions"));
    Ok(())
}

#[test]
fn config_prefers_user_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let dir = home.path().join(".provision");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("config.yml"), "sdk:\n  floor: 21\n")?;

    let mut cmd = provision(&home);
    cmd.args(["config", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(value["sdk"]["floor"], 21);
    Ok(())
}

#[test]
fn config_schema_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.args(["config", "--schema"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let schema: serde_json::Value = serde_json::from_slice(&output)?;
    assert!(schema["properties"]["packages"].is_object());
    Ok(())
}

#[test]
fn missing_config_file_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.args(["machine", "--config", "/nonexistent/provision.yml"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn completions_generate() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = provision(&home);
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("provision"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn machine_preflight_failure_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(
        &home,
        &MACHINE_CONFIG.replace("echo sh 1.0", "exit 2"),
    );

    let mut cmd = provision(&home);
    cmd.args(["machine", "--config"]).arg(&config);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Install a shell."));
    Ok(())
}

#[cfg(unix)]
#[test]
fn machine_quiet_continues_past_failures() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(&home, MACHINE_CONFIG);

    let mut cmd = provision(&home);
    cmd.args(["machine", "--quiet", "--config"]).arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Installing GEM packages..."));
    Ok(())
}

#[cfg(unix)]
#[test]
fn machine_abort_propagates_child_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(&home, MACHINE_CONFIG);

    let mut cmd = provision(&home);
    cmd.args(["machine", "--config"])
        .arg(&config)
        .env("PROVISION_PROMPT_CONTINUE", "n");
    cmd.assert()
        .code(4)
        .stdout(predicate::str::contains("Installing GEM packages...").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn machine_continue_answer_keeps_going() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(&home, MACHINE_CONFIG);

    let mut cmd = provision(&home);
    cmd.args(["machine", "--config"])
        .arg(&config)
        .env("PROVISION_PROMPT_CONTINUE", "y");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Installing GEM packages..."));
    Ok(())
}

#[cfg(unix)]
#[test]
fn machine_fatal_bootstrap_exits_with_child_code() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let config = write_config(
        &home,
        &format!("{}bootstrap:\n  - {{ manager: pip, name: python }}\n", MACHINE_CONFIG),
    );

    let mut cmd = provision(&home);
    cmd.args(["machine", "--quiet", "--config"]).arg(&config);
    cmd.assert().code(4);
    Ok(())
}

#[cfg(unix)]
#[test]
fn panda_environment_writes_profile_into_home() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    let mut cmd = provision(&home);
    cmd.args(["panda", "-i"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote ~/.profile"));

    assert!(home.path().join(".profile").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn panda_github_without_token_skips_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    let mut cmd = provision(&home);
    cmd.args(["panda", "--github"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No access token for github.com"));

    assert!(!home.path().join(".backflipbrew").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn panda_github_reads_hosts_file() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let dir = home.path().join(".provision");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("hosts.yml"), "github.com:\n  token: abc123\n")?;

    let mut cmd = provision(&home);
    cmd.args(["panda", "-g"]);
    cmd.assert().success();

    let written = fs::read_to_string(home.path().join(".backflipbrew"))?;
    assert!(written.contains("abc123"));
    Ok(())
}
