//! Unit tests for configuration loading and validation.

use penguin::config::{ConfigError, PenguinConfig};
use penguin::test_support::EnvGuard;
use rstest::{fixture, rstest};

#[fixture]
fn valid_config() -> PenguinConfig {
    PenguinConfig {
        endpoint: String::from("https://penguin.example.com/api"),
        auth_token: Some(String::from("legacy-token")),
        jwt: None,
        user_agent: None,
    }
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
fn validation_rejects_missing_endpoint_with_actionable_error(
    valid_config: PenguinConfig,
    #[case] endpoint: &str,
) {
    let cfg = PenguinConfig {
        endpoint: endpoint.to_owned(),
        ..valid_config
    };

    let error = cfg.validate().expect_err("endpoint is required");
    let ConfigError::MissingField(ref message) = error else {
        panic!("expected MissingField error");
    };
    assert!(
        message.contains("PENGUIN_ENDPOINT"),
        "error should mention env var: {message}"
    );
    assert!(
        message.contains("penguin.toml"),
        "error should mention config file: {message}"
    );
    assert!(
        message.contains("endpoint"),
        "error should mention TOML key: {message}"
    );
}

#[rstest]
fn client_uses_configured_endpoint(valid_config: PenguinConfig) {
    let client = valid_config
        .client()
        .unwrap_or_else(|err| panic!("client should build: {err}"));
    assert_eq!(client.base_url().as_str(), "https://penguin.example.com/api");
}

#[rstest]
fn client_rejects_malformed_endpoint(valid_config: PenguinConfig) {
    let cfg = PenguinConfig {
        endpoint: String::from("penguin.example.com"),
        ..valid_config
    };

    let error = cfg.client().expect_err("scheme is required");
    assert!(matches!(error, ConfigError::Client(_)), "got {error:?}");
}

#[rstest]
fn credentials_combine_both_tokens(valid_config: PenguinConfig) {
    let cfg = PenguinConfig {
        jwt: Some(String::from("jwt-token")),
        ..valid_config
    };
    assert_eq!(
        cfg.credentials().authorization_header().as_deref(),
        Some("Bearer legacy-token, Bearer jwt-token")
    );
}

#[tokio::test]
async fn load_reads_penguin_environment_variables() {
    let _guard = EnvGuard::set_vars(&[
        ("PENGUIN_ENDPOINT", "http://localhost:8080"),
        ("PENGUIN_AUTH_TOKEN", "from-env"),
        ("PENGUIN_JWT", "jwt-from-env"),
    ])
    .await;

    let cfg = PenguinConfig::load_without_cli_args()
        .unwrap_or_else(|err| panic!("config should load: {err}"));

    assert_eq!(cfg.endpoint, "http://localhost:8080");
    assert_eq!(cfg.auth_token.as_deref(), Some("from-env"));
    assert_eq!(cfg.jwt.as_deref(), Some("jwt-from-env"));
    assert_eq!(cfg.validate(), Ok(()));
}

#[tokio::test]
async fn load_without_endpoint_fails_validation() {
    let _guard = EnvGuard::remove_vars(&["PENGUIN_ENDPOINT"]).await;

    let cfg = PenguinConfig::load_without_cli_args()
        .unwrap_or_else(|err| panic!("config should load: {err}"));

    assert!(matches!(cfg.validate(), Err(ConfigError::MissingField(_))));
}
