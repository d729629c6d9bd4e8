use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crewdeck"))
        .args(args)
        .env("HOME", home)
        .output()
        .expect("run crewdeck")
}

fn run_with_env(home: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crewdeck"));
    cmd.args(args).env("HOME", home);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run crewdeck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn assert_err_contains(output: &Output, needle: &str) {
    assert!(
        !output.status.success(),
        "expected failure, stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
    let text = format!("{}{}", stdout(output), stderr(output));
    assert!(
        text.contains(needle),
        "expected error to contain `{needle}`, got:\n{text}"
    );
}

fn shell_log(home: &Path) -> String {
    fs::read_to_string(home.join(".crewdeck/logs/shell.log")).unwrap_or_default()
}

#[test]
fn help_is_shown_without_arguments() {
    let temp = tempdir().expect("tempdir");
    let output = run(temp.path(), &[]);
    assert_ok(&output);
    let text = stdout(&output);
    assert!(text.contains("Commands:"));
    assert!(text.contains("open <workspace> [hint]"));
    assert!(text.contains("route <workspace> <hint>"));
}

#[test]
fn version_prints_the_crate_version() {
    let temp = tempdir().expect("tempdir");
    let output = run(temp.path(), &["version"]);
    assert_ok(&output);
    assert!(stdout(&output).contains(&format!("crewdeck {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unknown_command_fails() {
    let temp = tempdir().expect("tempdir");
    assert_err_contains(&run(temp.path(), &["bogus"]), "unknown command `bogus`");
}

#[test]
fn init_writes_starter_settings_once() {
    let temp = tempdir().expect("tempdir");

    let first = run(temp.path(), &["init"]);
    assert_ok(&first);
    assert!(stdout(&first).contains("wrote starter settings"));
    assert!(temp.path().join(".crewdeck/config.yaml").exists());

    let second = run(temp.path(), &["init"]);
    assert_ok(&second);
    assert!(stdout(&second).contains("settings already exist"));
}

#[test]
fn check_summarizes_the_starter_settings() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let check = run(temp.path(), &["check"]);
    assert_ok(&check);
    let text = stdout(&check);
    assert!(text.contains("are valid"));
    assert!(text.contains("1 workspace(s), 2 view(s) (1 gated), 1 form(s), 2 gated feature(s)"));
    assert!(text.contains("subscription: free (active)"));
}

#[test]
fn check_without_settings_reports_the_read_failure() {
    let temp = tempdir().expect("tempdir");
    assert_err_contains(&run(temp.path(), &["check"]), "failed to read file");
}

#[test]
fn views_lists_lock_and_default_markers() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let views = run(temp.path(), &["views", "hiring"]);
    assert_ok(&views);
    let text = stdout(&views);
    assert!(text.contains("workspace `hiring`: 2 view(s)"));
    let posted = text
        .lines()
        .find(|line| line.contains("posted-jobs"))
        .expect("posted-jobs line");
    assert!(posted.contains("(default)"));
    assert!(!posted.contains("[locked]"));
    let invitations = text
        .lines()
        .find(|line| line.contains("invitations"))
        .expect("invitations line");
    assert!(invitations.contains("[locked]"));

    assert_err_contains(
        &run(temp.path(), &["views", "missing"]),
        "workspace `missing` is not configured",
    );
}

#[test]
fn route_resolves_hints_and_falls_back() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let direct = run(temp.path(), &["route", "hiring", "invitations"]);
    assert_ok(&direct);
    assert!(stdout(&direct).contains("routes `invitations` to view `invitations`"));

    let encoded = run(temp.path(), &["route", "hiring", "posted%2Djobs"]);
    assert_ok(&encoded);
    assert!(stdout(&encoded).contains("to view `posted-jobs`"));

    let fallback = run(temp.path(), &["route", "hiring", "archive"]);
    assert_ok(&fallback);
    assert!(stdout(&fallback)
        .contains("hint `archive` is not registered; workspace `hiring` falls back to view `posted-jobs`"));
    assert!(shell_log(temp.path()).contains("view_hint_fallback"));

    assert_err_contains(&run(temp.path(), &["route", "hiring"]), "usage: route");
}

#[test]
fn route_falls_back_on_a_malformed_hint_encoding() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    // %FF is not valid percent-encoding; the command still resolves
    let output = run(temp.path(), &["route", "hiring", "%FF"]);
    assert_ok(&output);
    assert!(stdout(&output).contains(
        "hint `%FF` is not registered; workspace `hiring` falls back to view `posted-jobs`"
    ));
    assert!(shell_log(temp.path()).contains("view_hint_fallback"));
}

#[test]
fn open_without_terminal_or_script_fails() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));
    assert_err_contains(
        &run(temp.path(), &["open", "hiring"]),
        "open requires an interactive terminal",
    );
}

#[test]
fn open_rejects_invalid_script_tokens() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));
    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "frobnicate")],
    );
    assert_err_contains(&output, "invalid CREWDECK_SHELL_SCRIPT_KEYS token `frobnicate`");
}

#[test]
fn open_requires_a_terminating_script() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));
    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "down,enter")],
    );
    assert_err_contains(&output, "scripted shell did not terminate");
}

#[test]
fn scripted_sessions_persist_and_restore_the_active_view() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let first = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "enter,q")],
    );
    assert_ok(&first);
    assert!(stdout(&first).contains("session saved for workspace `hiring` (view `posted-jobs`)"));
    assert!(temp.path().join(".crewdeck/session/hiring.json").exists());

    let second = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "down,enter,q")],
    );
    assert_ok(&second);
    assert!(stdout(&second).contains("(view `invitations`)"));

    // no hint: the saved snapshot decides where the shell lands
    let third = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "q")],
    );
    assert_ok(&third);
    assert!(stdout(&third).contains("(view `invitations`)"));
    let log = shell_log(temp.path());
    assert!(log.contains("view_restored"));
    assert!(log.contains("shell_exit"));
}

#[test]
fn open_hint_overrides_the_saved_session() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let seed = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "down,enter,q")],
    );
    assert_ok(&seed);
    assert!(stdout(&seed).contains("(view `invitations`)"));

    let hinted = run_with_env(
        temp.path(),
        &["open", "hiring", "posted-jobs"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "q")],
    );
    assert_ok(&hinted);
    assert!(stdout(&hinted).contains("(view `posted-jobs`)"));

    let unknown = run_with_env(
        temp.path(),
        &["open", "hiring", "archive"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "q")],
    );
    assert_ok(&unknown);
    assert!(stdout(&unknown).contains("(view `posted-jobs`)"));
    assert!(shell_log(temp.path()).contains("view_hint_fallback"));
}

#[test]
fn open_falls_back_on_a_malformed_hint_encoding() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run_with_env(
        temp.path(),
        &["open", "hiring", "%FF"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "q")],
    );
    assert_ok(&output);
    assert!(stdout(&output).contains("(view `posted-jobs`)"));
    assert!(shell_log(temp.path()).contains("view_hint_fallback"));
}

#[test]
fn scripted_modal_submission_creates_a_record() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    // open the form, type a title, cycle seniority to junior, submit, quit
    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[(
            "CREWDECK_SHELL_SCRIPT_KEYS",
            "n,enter,char:d,char:e,char:v,enter,down,down,enter,s,q",
        )],
    );
    assert_ok(&output);
    let log = shell_log(temp.path());
    assert!(log.contains("modal_submit_ok"), "log was:\n{log}");
    assert!(log.contains("(job-posting)"));
}

#[test]
fn scripted_submit_with_invalid_draft_does_not_create_a_record() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "n,s,q")],
    );
    assert_ok(&output);
    assert!(!shell_log(temp.path()).contains("modal_submit_ok"));
}

#[test]
fn scripted_upgrade_request_logs_the_route() {
    let temp = tempdir().expect("tempdir");
    assert_ok(&run(temp.path(), &["init"]));

    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "down,enter,u,q")],
    );
    assert_ok(&output);
    let log = shell_log(temp.path());
    assert!(log.contains("upgrade_requested"), "log was:\n{log}");
    assert!(log.contains("/premium/upgrade?feature=invitations"));
}

#[test]
fn open_without_settings_reports_the_read_failure() {
    let temp = tempdir().expect("tempdir");
    let output = run_with_env(
        temp.path(),
        &["open", "hiring"],
        &[("CREWDECK_SHELL_SCRIPT_KEYS", "q")],
    );
    assert_err_contains(&output, "failed to read file");
}
