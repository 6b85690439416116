//! End-to-end tests driving the `pagedb` binary over stdin.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pagedb::common::config::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE};
use pagedb::TABLE_MAX_ROWS;
use predicates::prelude::*;
use tempfile::TempDir;

fn create_db_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let db_path = dir.path().join("test.db");
    (dir, db_path)
}

fn run_commands_with_args<T: AsRef<str>>(commands: &[T], db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pagedb").expect("Failed to find binary");
    cmd.arg(db_path);

    let input = commands
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    cmd.write_stdin(input);
    cmd
}

#[test]
fn it_inserts_and_retrieves_a_row() {
    let (_dir, db_path) = create_db_path();
    let mut cmd = run_commands_with_args(
        &["insert 1 user1 person1@example.com", "select", ".exit"],
        &db_path,
    );

    let expected = [
        "db > Executed.",
        "db > (1, user1, person1@example.com)",
        "Executed.",
        "db > ",
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_when_table_is_full() {
    let (_dir, db_path) = create_db_path();
    let mut commands: Vec<String> = (0..=TABLE_MAX_ROWS)
        .map(|i| format!("insert {i} user{i} person{i}@example.com"))
        .collect();
    commands.push(".exit".to_string());

    let mut cmd = run_commands_with_args(&commands, &db_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("db > Error: Table full.\ndb > "));
}

#[test]
fn it_fills_and_saves_full_table() {
    let (_dir, db_path) = create_db_path();
    let mut commands = Vec::new();
    let mut expected = Vec::new();
    for i in 0..TABLE_MAX_ROWS {
        commands.push(format!("insert {i} user{i} person{i}@example.com"));
        expected.push(format!("({i}, user{i}, person{i}@example.com)"));
    }
    commands.push(".exit".to_string());

    let mut cmd = run_commands_with_args(&commands, &db_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("db > "));

    let mut cmd = run_commands_with_args(&["select", ".exit"], &db_path);
    let expected = format!("db > {}\nExecuted.\ndb > ", expected.join("\n"));
    cmd.assert().success().stdout(expected);
}

#[test]
fn it_allows_inserting_strings_that_are_the_maximum_length() {
    let (_dir, db_path) = create_db_path();
    let long_username = "a".repeat(COLUMN_USERNAME_SIZE);
    let long_email = "a".repeat(COLUMN_EMAIL_SIZE);

    let commands = [
        format!("insert 1 {long_username} {long_email}"),
        "select".to_string(),
        ".exit".to_string(),
    ];

    let mut cmd = run_commands_with_args(&commands, &db_path);

    let expected = [
        "db > Executed.".to_string(),
        format!("db > (1, {long_username}, {long_email})"),
        "Executed.".to_string(),
        "db > ".to_string(),
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_if_strings_are_too_long() {
    let (_dir, db_path) = create_db_path();
    let long_username = "a".repeat(COLUMN_USERNAME_SIZE + 1);
    let long_email = "a".repeat(COLUMN_EMAIL_SIZE + 1);

    let commands = [
        format!("insert 1 {long_username} {long_email}"),
        "select".to_string(),
        ".exit".to_string(),
    ];

    let mut cmd = run_commands_with_args(&commands, &db_path);

    let expected = ["db > String is too long.", "db > Executed.", "db > "].join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_if_id_is_negative() {
    let (_dir, db_path) = create_db_path();
    let mut cmd = run_commands_with_args(
        &["insert -1 user1 person1@example.com", "select", ".exit"],
        &db_path,
    );

    let expected = ["db > ID must be positive.", "db > Executed.", "db > "].join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_keeps_data_after_closing_connection() {
    let (_dir, db_path) = create_db_path();

    let mut cmd =
        run_commands_with_args(&["insert 1 user1 person1@example.com", ".exit"], &db_path);
    let expected = ["db > Executed.", "db > "].join("\n");
    cmd.assert().success().stdout(expected);

    let mut cmd = run_commands_with_args(&["select", ".exit"], &db_path);
    let expected = ["db > (1, user1, person1@example.com)\nExecuted.", "db > "].join("\n");
    cmd.assert().success().stdout(expected);
}

#[test]
fn it_saves_on_end_of_input() {
    let (_dir, db_path) = create_db_path();

    let mut cmd = run_commands_with_args(&["insert 7 bob bob@example.com"], &db_path);
    cmd.assert().success();

    let mut cmd = run_commands_with_args(&["select"], &db_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(7, bob, bob@example.com)"));
}

#[test]
fn it_fails_when_the_database_cannot_be_opened() {
    let (dir, _) = create_db_path();
    let db_path = dir.path().join("missing").join("test.db");

    let mut cmd = run_commands_with_args(&[".exit"], &db_path);
    cmd.assert().failure();
}

#[test]
fn it_requires_a_database_path() {
    let mut cmd = Command::cargo_bin("pagedb").expect("Failed to find binary");
    cmd.assert().failure();
}
