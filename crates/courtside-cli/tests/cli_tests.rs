//! Integration tests for the courtside binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command isolated from the user's config file and environment
fn courtside_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("courtside").unwrap();
    cmd.env("COURTSIDE_CONFIG", config_dir.path().join("config.yml"))
        .env_remove("COURTSIDE_STATS_API_KEY")
        .env_remove("RAPIDAPI_KEY")
        .env_remove("COURTSIDE_LLM_API_KEY")
        .env_remove("COURTSIDE_DEFAULT_SEASON")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_config_json_redacts_keys() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .env("COURTSIDE_STATS_API_KEY", "rapid-secret")
        .env("COURTSIDE_LLM_API_KEY", "sk-secret")
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"league_id\": 12"))
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("rapid-secret").not())
        .stdout(predicate::str::contains("sk-secret").not());
}

#[test]
fn test_config_reads_yaml_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.yml"),
        "llm_service:\n  url: http://llm.local:9000\nserver:\n  port: 9999\n",
    )
    .unwrap();

    courtside_cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 9999"))
        .stdout(predicate::str::contains("http://llm.local:9000"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yml"), "server: [not, a, map").unwrap();

    courtside_cmd(&dir)
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("YAML error"));
}

#[test]
fn test_ask_empty_question() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .args(["ask", ""])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No question provided"));
}

#[test]
fn test_stats_chat_has_no_lookup() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .args(["stats", "chat"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("has no stats lookup"));
}

#[test]
fn test_stats_unknown_category() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .args(["stats", "mvp-race"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown intent category"));
}

#[test]
fn test_stats_without_api_key() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .args(["stats", "standings"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_stats_missing_player() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .env("COURTSIDE_STATS_API_KEY", "test")
        .env("COURTSIDE_STATS_URL", "http://127.0.0.1:1")
        .args(["stats", "player-stats", "--season", "2023"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("needs: player"));
}

#[test]
fn test_stats_provider_unreachable() {
    let dir = TempDir::new().unwrap();
    courtside_cmd(&dir)
        .env("COURTSIDE_STATS_API_KEY", "test")
        .env("COURTSIDE_STATS_URL", "http://127.0.0.1:1")
        .args(["stats", "standings", "--season", "2023"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Upstream service unavailable"));
}
