//! Integration tests for the `lidlot` CLI binary.
//!
//! Argument parsing, local rejection, config handling, and the play/redeem
//! flows against a mock lottery server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Nothing listens on the discard port.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

/// Build a [`Command`] for the `lidlot` binary with env isolation.
///
/// Clears `LIDLOT_*` variables, points config directories at a
/// nonexistent path, and turns the reel animation off.
fn lidlot_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lidlot");
    cmd.env("HOME", "/tmp/lidlot-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lidlot-cli-test-nonexistent")
        .env_remove("LIDLOT_CONFIG")
        .env_remove("LIDLOT_URL")
        .env_remove("LIDLOT_OUTPUT")
        .env_remove("LIDLOT_SERVER__URL")
        .env_remove("LIDLOT_SERVER__TIMEOUT")
        .env_remove("LIDLOT_SERVER__INSECURE")
        .env_remove("LIDLOT_LOTTERY__POLICY")
        .env_remove("LIDLOT_LOTTERY__VALID_CODE")
        .env_remove("RUST_LOG")
        .env("LIDLOT_LOTTERY__SPIN_MS", "0")
        .env("NO_COLOR", "1");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = lidlot_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    lidlot_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("lottery")
            .and(predicate::str::contains("play"))
            .and(predicate::str::contains("redeem"))
            .and(predicate::str::contains("health")),
    );
}

#[test]
fn test_version_flag() {
    lidlot_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lidlot"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    lidlot_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    lidlot_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Local rejection ─────────────────────────────────────────────────

#[test]
fn test_play_short_code_is_rejected_locally() {
    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "play", "12"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("番号が無効です"));
}

#[test]
fn test_play_wrong_code_is_rejected_under_strict_policy() {
    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "play", "1234"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("番号が無効です"));
}

#[test]
fn test_play_without_code_is_a_usage_error() {
    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "play"])
        .assert()
        .code(2);
}

#[test]
fn test_redeem_blank_token_is_rejected_locally() {
    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "redeem", "   "])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("トークンを入力してください。"));
}

#[test]
fn test_play_unreachable_server_is_a_connection_error() {
    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "--timeout", "2", "play", "2026"])
        .assert()
        .code(7);
}

#[test]
fn test_bad_server_url_is_a_config_error() {
    lidlot_cmd()
        .args(["--server", "ftp://lottery.test", "play", "2026"])
        .assert()
        .code(9);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    lidlot_cmd()
        .args(["config", "path", "--config", "/tmp/custom-lidlot.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/custom-lidlot.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    let file = file.to_str().unwrap();

    lidlot_cmd()
        .args(["config", "init", "--config", file])
        .assert()
        .success();
    let written = std::fs::read_to_string(file).unwrap();
    assert!(written.contains("[server]"), "{written}");
    assert!(written.contains("valid_code = \"2026\""), "{written}");

    lidlot_cmd()
        .args(["config", "init", "--config", file])
        .assert()
        .code(9);

    lidlot_cmd()
        .args(["config", "init", "--force", "--config", file])
        .assert()
        .success();
}

#[test]
fn test_config_show_merges_env_and_flags() {
    let output = lidlot_cmd()
        .env("LIDLOT_SERVER__URL", "http://from-env:8000")
        .args(["config", "show", "--output", "json", "--policy", "allow-list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["server"]["url"], "http://from-env:8000");
    assert_eq!(shown["lottery"]["policy"], "allow-list");
}

#[test]
fn test_allow_list_rejects_unlisted_code() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(
        &file,
        "[lottery]\npolicy = \"allow-list\"\naccepted_codes = [\"1111\"]\n",
    )
    .unwrap();

    lidlot_cmd()
        .args(["--server", DEAD_SERVER, "--config"])
        .arg(&file)
        .args(["play", "2026"])
        .assert()
        .code(4);
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_play_win_prints_coupon() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/play"))
        .and(body_json(json!({ "lid_code": "2026" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "win",
            "coupon_token": "eyJsaWQiOiIyMDI2In0.c2ln",
            "expires_at": "2026-10-26T09:00:00+00:00",
        })))
        .expect(1)
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "play", "2026"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[ 7 | 7 | 7 ]")
                .and(predicate::str::contains("当たり！"))
                .and(predicate::str::contains("eyJsaWQiOiIyMDI2In0.c2ln"))
                .and(predicate::str::contains("有効期限: 2026/10/")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_lose_in_json_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/play"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "lose" })),
        )
        .mount(&server)
        .await;

    let output = lidlot_cmd()
        .args(["--server", &server.uri(), "--output", "json", "play", "2026"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["status"], "lose");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_server_invalid_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/play"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "invalid" })))
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "play", "2026"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("無効"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_link_prefills_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/play"))
        .and(body_json(json!({ "lid_code": "2026" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "lose" })))
        .expect(1)
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "play", "--link"])
        .arg("https://lottery.example.com/?code=2026")
        .assert()
        .success()
        .stdout(predicate::str::contains("残念..."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_server_error_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/play"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "play", "2026"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("502"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_redeem_ok_and_expired() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/redeem"))
        .and(body_json(json!({ "coupon_token": "good" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/redeem"))
        .and(body_json(json!({ "coupon_token": "ABC123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "expired" })))
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "redeem", " good "])
        .assert()
        .success()
        .stdout(predicate::str::contains("引換完了しました。"));

    lidlot_cmd()
        .args(["--server", &server.uri(), "redeem", "ABC123"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("有効期限切れです。"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_redeem_server_error_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/redeem"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "redeem", "ABC123"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    lidlot_cmd()
        .args(["--server", &server.uri(), "health"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok"));
}
