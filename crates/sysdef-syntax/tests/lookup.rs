use pretty_assertions::assert_eq;
use sysdef_syntax::{lookup, Declaration, LookupError, LookupOutcome};

fn page(name: &str) -> String {
    let path = format!(
        "{}/tests/fixtures/{}.2.txt",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"))
}

fn found(query: &str, page_name: &str) -> Declaration {
    let text = page(page_name);
    match lookup(query, Some(&text)).unwrap().outcome {
        LookupOutcome::Found(d) => d,
        other => panic!("{query}: expected Found, got {other:?}"),
    }
}

// -- selection policy --

#[test]
fn open_prefers_three_argument_form() {
    let d = found("open", "open");
    assert_eq!(
        d.to_string(),
        "int open(const char *pathname, int flags, mode_t mode)"
    );
}

#[test]
fn openat_on_open_page() {
    let d = found("openat", "open");
    assert_eq!(d.name, "openat");
    assert_eq!(d.parameters.len(), 4);
}

#[test]
fn creat_on_open_page() {
    let d = found("creat", "open");
    assert_eq!(d.to_string(), "int creat(const char *pathname, mode_t mode)");
}

#[test]
fn chown32_resolves_to_chown() {
    let d = found("chown32", "chown");
    assert_eq!(
        d.to_string(),
        "int chown(const char *pathname, uid_t owner, gid_t group)"
    );
}

#[test]
fn fchownat_joined_across_lines() {
    let d = found("fchownat", "chown");
    assert_eq!(
        d.to_string(),
        "int fchownat(int dirfd, const char *pathname, uid_t owner, gid_t group, int flags)"
    );
}

#[test]
fn eventfd2_resolves_to_eventfd() {
    let d = found("eventfd2", "eventfd");
    assert_eq!(d.name, "eventfd");
    assert!(d.parameters[0].is_unsigned());
}

#[test]
fn exit_resolves_to_underscore_exit() {
    let d = found("exit", "exit");
    assert_eq!(d.to_string(), "void exit(int status)");
}

#[test]
fn underscore_exit_keeps_its_name() {
    let d = found("_exit", "exit");
    assert_eq!(d.name, "_exit");
}

#[test]
fn getpid_not_confused_with_getppid() {
    let d = found("getpid", "getpid");
    assert_eq!(d.to_string(), "pid_t getpid(void)");
    assert!(d.parameters.is_empty());
}

#[test]
fn unknown_name_on_existing_page() {
    let text = page("open");
    let l = lookup("close", Some(&text)).unwrap();
    assert_eq!(l.outcome, LookupOutcome::NotFound);
    assert_eq!(l.declarations.len(), 5);
}

// -- parameter shapes --

#[test]
fn execve_const_pointer_arrays() {
    let d = found("execve", "execve");
    let argv = &d.parameters[1];
    assert!(argv.is_const_pointer());
    assert!(argv.is_array());
    assert_eq!(argv.base_type(), Some("char"));
    assert_eq!(argv.name(), Some("argv"));
    assert_eq!(
        d.to_string(),
        "int execve(const char *filename, char *const argv[], char *const envp[])"
    );
}

#[test]
fn clone_function_pointer_and_varargs() {
    let d = found("clone", "clone");
    assert_eq!(d.parameters.len(), 5);
    assert!(d.parameters[0].is_function_pointer());
    assert_eq!(d.parameters[0].base_type(), Some("int"));
    assert_eq!(d.parameters[0].name(), Some("(*fn)(void *)"));
    assert!(d.parameters[4].is_ellipsis());
}

#[test]
fn fcntl_comment_removed() {
    let d = found("fcntl", "fcntl");
    assert_eq!(d.to_string(), "int fcntl(int fd, int cmd, ...)");
}

#[test]
fn signal_typedef_ignored() {
    let text = page("signal");
    let l = lookup("signal", Some(&text)).unwrap();
    assert_eq!(l.declarations.len(), 1);
    assert_eq!(
        l.outcome.declaration().map(ToString::to_string).as_deref(),
        Some("sighandler_t signal(int signum, sighandler_t handler)")
    );
}

// -- other outcomes --

#[test]
fn unimplemented_page() {
    let text = page("afs_syscall");
    let l = lookup("afs_syscall", Some(&text)).unwrap();
    assert_eq!(l.outcome, LookupOutcome::Unimplemented);
}

#[test]
fn no_manual_entry() {
    let l = lookup("open", None).unwrap();
    assert_eq!(l.outcome, LookupOutcome::NoManualEntry);
}

#[test]
fn truncated_page_is_malformed() {
    let text = page("truncated");
    assert_eq!(
        lookup("truncated", Some(&text)).unwrap_err(),
        LookupError::MalformedDocument { marker: "SYNOPSIS" }
    );
}

// -- properties --

#[test]
fn lookup_is_deterministic() {
    for (query, name) in [("open", "open"), ("chown32", "chown"), ("clone", "clone")] {
        let text = page(name);
        let a = lookup(query, Some(&text)).unwrap();
        let b = lookup(query, Some(&text)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn found_name_is_prefix_of_query() {
    for (query, name) in [
        ("open", "open"),
        ("chown32", "chown"),
        ("eventfd2", "eventfd"),
        ("exit", "exit"),
        ("fchownat", "chown"),
    ] {
        let d = found(query, name);
        assert!(query.starts_with(&d.name), "{query} vs {}", d.name);
    }
}

#[test]
fn every_extracted_declaration_round_trips() {
    for name in ["open", "chown", "execve", "signal", "getpid", "exit"] {
        let text = page(name);
        let l = lookup(name, Some(&text)).unwrap();
        for d in &l.declarations {
            let reparsed = Declaration::parse(&format!("{d};")).unwrap();
            assert_eq!(&reparsed, d);
        }
    }
}
