//! CLI based tests
use std::io::Write as _;
use std::process::ExitCode;

use sshcfg::main as sshcfg_main;

use rusty_fork::rusty_fork_test;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn path_of(f: &NamedTempFile) -> String {
    f.path().to_string_lossy().to_string()
}

const CONFIG: &str = "\
Host *.example.com
    User admin
    IdentityFile ~/.ssh/a
Host db?
    Port 5432
";

#[test]
fn show_help() {
    assert_eq!(sshcfg_main(["sshcfg", "--help"]), ExitCode::SUCCESS);
}

#[test]
fn show_version() {
    assert_eq!(sshcfg_main(["sshcfg", "--version"]), ExitCode::SUCCESS);
}

#[test]
fn bad_option() {
    assert_eq!(
        sshcfg_main(["sshcfg", "--this-ridiculous-option-does-not-exist"]),
        ExitCode::FAILURE
    );
}

rusty_fork_test! {

#[test]
fn no_hosts() {
    let f = config_file(CONFIG);
    assert_eq!(sshcfg_main(["sshcfg", "-F", &path_of(&f)]), ExitCode::FAILURE);
}

#[test]
fn resolve_host() {
    let f = config_file(CONFIG);
    assert_eq!(
        sshcfg_main(["sshcfg", "-F", &path_of(&f), "www.example.com"]),
        ExitCode::SUCCESS
    );
}

#[test]
fn resolve_hosts_as_json() {
    let f = config_file(CONFIG);
    assert_eq!(
        sshcfg_main(["sshcfg", "-F", &path_of(&f), "--format", "json", "db1", "www.example.com"]),
        ExitCode::SUCCESS
    );
}

#[test]
fn everything_as_table() {
    let f = config_file(CONFIG);
    assert_eq!(
        sshcfg_main(["sshcfg", "-F", &path_of(&f), "--all", "--format", "table"]),
        ExitCode::SUCCESS
    );
}

#[test]
fn syntax_error() {
    let f = config_file("Host a\n    User\n");
    assert_eq!(sshcfg_main(["sshcfg", "-F", &path_of(&f), "a"]), ExitCode::FAILURE);
}

#[test]
fn missing_file() {
    assert_eq!(
        sshcfg_main(["sshcfg", "-F", "/nonexistent/sshcfg/config", "a"]),
        ExitCode::FAILURE
    );
}

#[test]
fn debug_output() {
    let f = config_file(CONFIG);
    assert_eq!(
        sshcfg_main([
            "sshcfg", "-d", "-T", "rfc3339", "--colour", "never", "-F", &path_of(&f), "db2"
        ]),
        ExitCode::SUCCESS
    );
}

}
