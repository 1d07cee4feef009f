//! HTTP client for the Penguin provisioning API.
//!
//! The client turns typed operations into authenticated JSON requests against
//! a configured base endpoint. It keeps no mutable state between calls, so a
//! single instance can be cloned into every reconciler and shared across
//! concurrent flows.

mod api;
mod auth;
mod error;
mod operation;
mod types;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use operation::Operation;

pub use auth::{Credentials, authorization_header};
pub use error::{ApiError, ClientError, classify};
pub use types::{
    AdjustBandwidthRequest, BandwidthPackageSelection, CreateElasticIpRequest,
    CreateElasticIpResponse, CreateVirtualMachineRequest, CreateVirtualMachineResponse,
    InternalHealth, IssueJwtRequest, IssueJwtResponse, ReinstallVirtualMachineRequest,
    RenewVirtualMachineRequest, RenewVirtualMachineResponse, ResetVirtualMachinePasswordRequest,
    ResetVirtualMachinePasswordResponse, VirtualMachineMetrics, VirtualMachineStatus,
    VirtualMachineVnc, Zone, ZonesResponse,
};

/// Upper bound on the number of response body bytes read per call (2 MiB).
pub const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;

/// User agent sent when the caller does not provide one.
pub const DEFAULT_USER_AGENT: &str = concat!("penguin/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const JSON: &str = "application/json";

/// Authenticated client for the Penguin API.
#[derive(Clone, Debug)]
pub struct PenguinClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: Option<HeaderValue>,
    user_agent: HeaderValue,
}

/// Builder for [`PenguinClient`].
#[derive(Clone, Debug, Default)]
pub struct PenguinClientBuilder {
    endpoint: String,
    credentials: Credentials,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl PenguinClientBuilder {
    /// Sets the bearer credentials.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the `User-Agent` header. Blank values fall back to
    /// [`DEFAULT_USER_AGENT`].
    #[must_use]
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.user_agent = Some(value.into());
        self
    }

    /// Uses a caller-supplied HTTP client instead of the default one (60 s
    /// timeout).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Validates the endpoint and credentials and builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the endpoint is blank,
    /// cannot be parsed, or lacks a scheme or host, or when a token contains
    /// characters that are not valid in an HTTP header.
    pub fn build(self) -> Result<PenguinClient, ClientError> {
        let base_url = parse_endpoint(&self.endpoint)?;

        let authorization = self
            .credentials
            .authorization_header()
            .map(|value| {
                HeaderValue::from_str(&value)
                    .map(|mut header| {
                        header.set_sensitive(true);
                        header
                    })
                    .map_err(|_| {
                        ClientError::Configuration(String::from(
                            "credentials contain characters not allowed in a header",
                        ))
                    })
            })
            .transpose()?;

        let agent = self
            .user_agent
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_USER_AGENT);
        let user_agent = HeaderValue::from_str(agent)
            .map_err(|err| ClientError::Configuration(format!("invalid user agent: {err}")))?;

        let http = match self.http {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .map_err(|err| ClientError::Configuration(err.to_string()))?,
        };

        Ok(PenguinClient {
            http,
            base_url,
            authorization,
            user_agent,
        })
    }
}

impl PenguinClient {
    /// Starts a builder for a client targeting `endpoint`.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> PenguinClientBuilder {
        PenguinClientBuilder {
            endpoint: endpoint.into(),
            ..PenguinClientBuilder::default()
        }
    }

    /// Constructs a client with the default user agent and HTTP client.
    ///
    /// # Errors
    ///
    /// See [`PenguinClientBuilder::build`].
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self, ClientError> {
        Self::builder(endpoint).credentials(credentials).build()
    }

    /// Base URL every operation path is joined onto (no trailing slash).
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends one operation and returns the raw response body.
    ///
    /// The body is read up to [`MAX_RESPONSE_BYTES`]; anything beyond that is
    /// left unread. A status outside the operation's accepted set is turned
    /// into [`ClientError::Api`] via [`classify`].
    pub(crate) async fn execute(&self, operation: &Operation) -> Result<Vec<u8>, ClientError> {
        let url = operation.url(&self.base_url)?;
        debug!(method = %operation.method, %url, "sending penguin request");

        let mut request = self
            .http
            .request(operation.method.clone(), url)
            .header(ACCEPT, JSON)
            .header(USER_AGENT, self.user_agent.clone());
        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization.clone());
        }
        if let Some(body) = &operation.body {
            request = request.header(CONTENT_TYPE, JSON).body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = read_capped(response, MAX_RESPONSE_BYTES).await?;
        debug!(status = status.as_u16(), bytes = body.len(), "penguin response received");

        if !operation.accepts(status) {
            return Err(classify(status, &body).into());
        }
        Ok(body)
    }

    /// Sends one operation and decodes the JSON response body.
    ///
    /// An empty body decodes to `T::default()`.
    pub(crate) async fn call<T>(&self, operation: &Operation) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        let body = self.execute(operation).await?;
        if body.is_empty() {
            return Ok(T::default());
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Configuration(String::from(
            "endpoint is required",
        )));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|err| ClientError::Configuration(format!("parse endpoint: {err}")))?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(ClientError::Configuration(format!(
            "endpoint must include scheme and host, got {trimmed:?}"
        )));
    }

    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&path);
    Ok(url)
}

async fn read_capped(mut response: Response, limit: usize) -> Result<Vec<u8>, ClientError> {
    let mut body = Vec::new();
    while body.len() < limit {
        let Some(chunk) = response.chunk().await? else {
            break;
        };
        let remaining = limit.saturating_sub(body.len());
        body.extend(chunk.iter().take(remaining));
    }
    Ok(body)
}
