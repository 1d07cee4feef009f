//! Credential handling for the Penguin API.

/// Bearer credentials accepted by the Penguin API.
///
/// The service accepts a legacy token and a JWT at the same time. Both are
/// optional; blank values are treated as absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Credentials {
    /// Legacy bearer token (`PENGUIN_AUTH_TOKEN`).
    pub legacy_token: Option<String>,
    /// JWT bearer token (`PENGUIN_JWT`).
    pub jwt: Option<String>,
}

impl Credentials {
    /// Creates credentials from optional token strings.
    #[must_use]
    pub const fn new(legacy_token: Option<String>, jwt: Option<String>) -> Self {
        Self { legacy_token, jwt }
    }

    /// Composes the `Authorization` header value.
    ///
    /// When both tokens are present the value carries two bearer schemes
    /// separated by a comma (`Bearer <legacy>, Bearer <jwt>`), which is the
    /// form the service parses. Returns `None` when neither token is set.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        authorization_header(
            self.legacy_token.as_deref().unwrap_or_default(),
            self.jwt.as_deref().unwrap_or_default(),
        )
    }
}

/// Builds the `Authorization` header from raw token strings, trimming both.
#[must_use]
pub fn authorization_header(legacy_token: &str, jwt: &str) -> Option<String> {
    match (legacy_token.trim(), jwt.trim()) {
        ("", "") => None,
        (legacy, "") => Some(format!("Bearer {legacy}")),
        ("", token) => Some(format!("Bearer {token}")),
        (legacy, token) => Some(format!("Bearer {legacy}, Bearer {token}")),
    }
}
