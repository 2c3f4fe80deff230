//! End-to-end tests against the compiled binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    config_home: TempDir,
    project: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            config_home: TempDir::new().unwrap(),
            project: TempDir::new().unwrap(),
        }
    }

    fn with_project_config(self, content: &str) -> Self {
        fs::write(self.project.path().join(".rsdispatch.toml"), content).unwrap();
        self
    }

    fn with_global_config(self, content: &str) -> Self {
        fs::write(self.config_home.path().join("rsdispatch.toml"), content).unwrap();
        self
    }

    /// Binary isolated from the user's config, running in the project dir.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rsdispatch").unwrap();
        cmd.env("RSDISPATCH_CONFIG_HOME", self.config_home.path())
            .env_remove("RSDISPATCH_TELEMETRY")
            .env_remove("RUST_LOG")
            .current_dir(self.project.path());
        cmd
    }

    fn global_config(&self) -> String {
        fs::read_to_string(self.config_home.path().join("rsdispatch.toml")).unwrap_or_default()
    }
}

const BUILD_PROJECT: &str = r#"
[[commands]]
name = "build"
program = "sh"
args = ["-c", "exit 0"]
description = "Build the project"

[[commands]]
name = "develop"
program = "sh"
args = ["-c", "exit 0"]

[[commands]]
name = "serve"
program = "sh"
args = ["-c", "exit 0"]
"#;

// ============================================================
// usage errors
// ============================================================

#[test]
fn given_no_arguments_when_run_then_usage_exit() {
    let env = Env::new();

    env.cmd()
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains(
            "Pass --help to see all available commands and options.",
        ));
}

#[test]
fn given_typo_when_run_then_help_suggestion_and_error() {
    // Arrange
    let env = Env::new().with_project_config(BUILD_PROJECT);

    // Act
    let output = env.cmd().arg("buidl").output().unwrap();

    // Assert
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let help = stderr.find("Usage:").expect("help");
    let hint = stderr.find("Did you mean this?\n    build\n").expect("suggestion");
    let error = stderr.find("unrecognized command 'buidl'").expect("error line");
    assert!(help < hint && hint < error, "unexpected order:\n{stderr}");
}

#[test]
fn given_unrelated_token_when_run_then_no_suggestion() {
    let env = Env::new().with_project_config(BUILD_PROJECT);

    env.cmd()
        .arg("xyz123")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Did you mean").not())
        .stderr(predicate::str::contains("unrecognized command 'xyz123'"));
}

#[test]
fn given_project_dir_flag_when_typo_then_project_commands_suggested() {
    let env = Env::new().with_project_config(BUILD_PROJECT);
    let elsewhere = TempDir::new().unwrap();

    env.cmd()
        .current_dir(elsewhere.path())
        .arg("-C")
        .arg(env.project.path())
        .arg("serv")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Did you mean this?\n    serve\n"));
}

#[test]
fn given_malformed_config_when_run_then_config_exit() {
    let env = Env::new().with_global_config("commands = [[[");

    env.cmd()
        .arg("info")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("rsdispatch.toml"));
}

#[test]
fn given_malformed_project_config_when_help_then_help_shown() {
    let env = Env::new().with_project_config("commands = [[[");

    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("telemetry"));
}

#[test]
fn given_malformed_project_config_when_typo_then_suggestion_and_config_exit() {
    let env = Env::new().with_project_config("commands = [[[");

    env.cmd()
        .arg("infoo")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Did you mean this?\n    info\n"))
        .stderr(predicate::str::contains(".rsdispatch.toml"));
}

#[test]
fn given_duplicate_names_in_project_config_when_run_then_config_exit() {
    let env = Env::new().with_project_config(
        r#"
[[commands]]
name = "build"
program = "make"

[[commands]]
name = "build"
program = "cargo"
"#,
    );

    env.cmd()
        .arg("build")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("command registered twice: build"));
}

// ============================================================
// built-in commands
// ============================================================

#[test]
fn given_version_flag_when_run_then_version_on_stdout() {
    let env = Env::new();

    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn given_telemetry_disable_when_run_then_persisted_and_reported() {
    let env = Env::new();

    env.cmd()
        .args(["telemetry", "--disable"])
        .assert()
        .success()
        .stdout("Telemetry collection disabled\n");
    assert!(env.global_config().contains("telemetry = false"));

    env.cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telemetry: disabled"));
}

#[test]
fn given_env_override_when_info_then_env_wins() {
    let env = Env::new().with_global_config("telemetry = false\n");

    env.cmd()
        .env("RSDISPATCH_TELEMETRY", "true")
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telemetry: enabled"));
}

#[test]
fn given_project_when_info_then_lists_local_commands() {
    let env = Env::new().with_project_config(BUILD_PROJECT);

    env.cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(".rsdispatch.toml"))
        .stdout(predicate::str::contains("[local] Build the project"));
}

#[test]
fn given_completion_when_run_then_script_mentions_commands() {
    let env = Env::new().with_project_config(BUILD_PROJECT);

    env.cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("develop"));
}

// ============================================================
// external commands
// ============================================================

#[cfg(unix)]
#[test]
fn given_external_command_when_run_then_success() {
    let env = Env::new().with_project_config(BUILD_PROJECT);

    env.cmd().arg("build").assert().success();
}

#[cfg(unix)]
#[test]
fn given_failing_command_when_run_then_exit_code_propagated() {
    let env = Env::new().with_project_config(
        r#"
[[commands]]
name = "check"
program = "sh"
args = ["-c", "exit 5"]
"#,
    );

    env.cmd()
        .arg("check")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("check"));
}

#[cfg(unix)]
#[test]
fn given_flags_when_run_then_child_sees_context_env() {
    let env = Env::new().with_project_config(
        r#"
[[commands]]
name = "check"
program = "sh"
args = ["-c", 'test "$RSDISPATCH_EXECUTING_COMMAND" = check && test "$RSDISPATCH_LOG_LEVEL" = verbose && test "$FORCE_COLOR" = 0 && test "$1" = --fast', "sh"]
"#,
    );

    env.cmd()
        .args(["-v", "--no-color", "check", "--fast"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn given_local_command_outside_project_when_run_then_noinput_exit() {
    let env = Env::new().with_global_config(
        r#"
[[commands]]
name = "deploy"
program = "sh"
args = ["-c", "exit 0"]
local = true
"#,
    );

    env.cmd()
        .arg("deploy")
        .assert()
        .code(66)
        .stderr(predicate::str::contains("can only be run inside a project"));
}

#[cfg(unix)]
#[test]
fn given_missing_program_when_run_then_unavailable_exit() {
    let env = Env::new().with_project_config(
        r#"
[[commands]]
name = "ghost"
program = "rsdispatch-surely-missing-program"
"#,
    );

    env.cmd()
        .arg("ghost")
        .assert()
        .code(69)
        .stderr(predicate::str::contains(
            "program not found: rsdispatch-surely-missing-program",
        ));
}
