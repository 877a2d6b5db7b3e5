#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary under test, with HOME pointed at a scratch dir so a developer's
/// own config file never leaks into the run.
pub fn fl() -> Command {
    let home = env::temp_dir().join("focusledger_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("focusledger");
    cmd.env("HOME", &home)
        .env("APPDATA", &home)
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_focusledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Run `focusledger --db <db> --today <day> <args...>` and expect success.
pub fn on_day(db_path: &str, day: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    fl().args(["--db", db_path, "--today", day])
        .args(args)
        .assert()
}

/// Initialize a fresh ledger on `day` in test mode (no config file written).
pub fn init_ledger(name: &str, day: &str) -> String {
    let db_path = setup_test_db(name);
    fl().args(["--db", &db_path, "--test", "--today", day, "init"])
        .assert()
        .success();
    db_path
}
