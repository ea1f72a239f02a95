use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_sysdef")));
    cmd.env_remove("SYSDEF_LOG").env_remove("SYSDEF_VIEWER");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_open() {
    cmd()
        .args(["--stdin", "open"])
        .write_stdin(fixture("open.2.txt"))
        .assert()
        .success()
        .stdout(
            "Syscall Name: open\nDefinition:   int open(const char *pathname, int flags, mode_t mode)\n",
        );
}

#[test]
fn stdin_mode_unimplemented() {
    cmd()
        .args(["--stdin", "afs_syscall"])
        .write_stdin(fixture("afs_syscall.2.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("System call is Unimplemented"));
}

#[test]
fn stdin_mode_empty_input_is_no_entry() {
    cmd()
        .args(["--stdin", "open"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No man entry found for this system call name.",
        ));
}

#[test]
fn stdin_mode_requires_one_name() {
    cmd()
        .args(["--stdin", "open", "close"])
        .write_stdin(fixture("open.2.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stdin needs exactly one NAME"));
}

#[test]
fn stdin_mode_malformed_page_fails() {
    cmd()
        .args(["--stdin", "truncated"])
        .write_stdin(fixture("truncated.2.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to resolve truncated"))
        .stderr(predicate::str::contains("SYNOPSIS"));
}

#[test]
fn stdin_mode_json() {
    let assert = cmd()
        .args(["--stdin", "open", "-f", "json", "--all"])
        .write_stdin(fixture("open.2.txt"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value[0]["name"], "open");
    assert_eq!(value[0]["status"], "found");
    assert_eq!(value[0]["declaration"]["parameters"][2]["name"], "mode");
    assert_eq!(value[0]["declarations"].as_array().unwrap().len(), 5);
}

#[test]
fn stdin_mode_markdown() {
    cmd()
        .args(["--stdin", "creat", "-f", "markdown"])
        .write_stdin(fixture("open.2.txt"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("## creat\n"))
        .stdout(predicate::str::contains("| 2 | `mode` | `mode_t` |  |"));
}

// -- page mode --

#[test]
fn page_mode_names_from_files() {
    cmd()
        .args(["-p", &fixture_path("chown32.2.txt")])
        .args(["-p", &fixture_path("open.2.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Syscall Name: chown32\nDefinition:   int chown(const char *pathname, uid_t owner, gid_t group)\n",
        ))
        .stdout(predicate::str::contains("Syscall Name: open\n"));
}

#[test]
fn page_mode_glob() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("open.2.txt"), fixture("open.2.txt")).unwrap();
    std::fs::write(dir.path().join("creat.2.txt"), fixture("open.2.txt")).unwrap();
    std::fs::write(dir.path().join("notes.md"), "not a page").unwrap();

    let pattern = format!("{}/*.2.txt", dir.path().display());
    let assert = cmd().args(["-p", &pattern]).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    // sorted by path: creat before open
    let creat = output.find("Syscall Name: creat").unwrap();
    let open = output.find("Syscall Name: open").unwrap();
    assert!(creat < open);
    assert!(!output.contains("notes"));
}

#[test]
fn page_mode_keep_going() {
    cmd()
        .arg("--keep-going")
        .args(["-p", &fixture_path("truncated.2.txt")])
        .args(["-p", &fixture_path("afs_syscall.2.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Syscall Name: afs_syscall"))
        .stdout(predicate::str::contains("truncated").not())
        .stderr(predicate::str::contains("lookup failed"));
}

// -- viewer mode --

#[test]
fn viewer_mode_requires_names() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no system call names given"));
}

#[test]
fn viewer_mode_missing_program_fails() {
    cmd()
        .args(["--viewer", "/nonexistent/sysdef-viewer", "open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to run"));
}

#[cfg(unix)]
#[test]
fn viewer_mode_non_zero_exit_is_no_entry() {
    cmd()
        .args(["--viewer", "false", "open"])
        .assert()
        .success()
        .stdout("Syscall Name: open\nDefinition:   No man entry found for this system call name.\n");
}

#[test]
fn unknown_format_rejected() {
    cmd()
        .args(["--stdin", "open", "-f", "html"])
        .write_stdin(fixture("open.2.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
