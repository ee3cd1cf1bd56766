use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("smartcast")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("paper"))
        .stdout(predicate::str::contains("digest"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("styles"));
}

#[test]
fn styles_lists_all_four_styles() {
    Command::cargo_bin("smartcast")
        .unwrap()
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("educational"))
        .stdout(predicate::str::contains("storytelling"))
        .stdout(predicate::str::contains("interview"))
        .stdout(predicate::str::contains("news"));
}

#[test]
fn paper_requires_an_input() {
    Command::cargo_bin("smartcast")
        .unwrap()
        .arg("paper")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PAPER"));
}
