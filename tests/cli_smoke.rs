//! Behavioural smoke tests for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn cli_without_arguments_prints_usage() {
    let mut cmd = cargo_bin_cmd!("penguin");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("penguin");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandwidth-package"))
        .stdout(predicate::str::contains("vm"));
}

#[test]
fn missing_endpoint_reports_actionable_error() {
    let mut cmd = cargo_bin_cmd!("penguin");
    cmd.arg("zones")
        .env_remove("PENGUIN_ENDPOINT")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("PENGUIN_ENDPOINT"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bandwidth_package_prints_selection_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/bandwidth-packages"))
        .and(query_param("region", "ap-guangzhou"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "bwp-1", "availableCount": 2 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = cargo_bin_cmd!("penguin");
    cmd.args(["bandwidth-package", "--region", "ap-guangzhou"])
        .env("PENGUIN_ENDPOINT", server.uri())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"bwp-1\""))
        .stdout(predicate::str::contains("\"availableCount\": 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_errors_exit_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-404/status"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "message": "instance not found" })),
        )
        .mount(&server)
        .await;

    let mut cmd = cargo_bin_cmd!("penguin");
    cmd.args(["vm", "status", "ins-404"])
        .env("PENGUIN_ENDPOINT", server.uri())
        .assert()
        .failure()
        .stderr(predicate::str::contains("penguin API error 404: instance not found"));
}
