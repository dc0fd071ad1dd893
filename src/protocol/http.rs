// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTPS transport for the Intex cloud API.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ProtocolError;
use crate::protocol::DeviceTransport;
use crate::protocol::auth::TokenCache;
use crate::response::{
    CommandDefinition, CommandStatus, CommandSubmission, DeviceInfo, Feedback, User,
};

// ============================================================================
// CloudConfig - Account and connection settings
// ============================================================================

/// Configuration for the cloud connection.
///
/// # Examples
///
/// ```
/// use intex_spa::protocol::CloudConfig;
/// use std::time::Duration;
///
/// // Defaults: official endpoint, 10 s timeout, one hour token lifetime
/// let config = CloudConfig::new("jane@example.com", "secret");
///
/// // With all options
/// let config = CloudConfig::new("jane@example.com", "secret")
///     .with_base_url("http://127.0.0.1:8080/api")
///     .with_user_agent("my-spa-bridge/0.1")
///     .with_timeout(Duration::from_secs(5))
///     .with_token_lifetime(chrono::Duration::minutes(30));
/// assert_eq!(config.base_url(), "http://127.0.0.1:8080/api");
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    username: String,
    password: String,
    base_url: String,
    user_agent: String,
    timeout: Duration,
    token_lifetime: chrono::Duration,
}

impl CloudConfig {
    /// Official API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://intexiotappservice.azurewebsites.net/api";
    /// User agent of the iOS app the API was observed with.
    pub const DEFAULT_USER_AGENT: &'static str = "Intex/1.0.12 (iPhone; iOS 14.7.1; Scale/3.00)";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default token lifetime in seconds.
    pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

    /// Creates a configuration for the given account.
    ///
    /// The password is kept in plain text and encoded on login.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            token_lifetime: chrono::Duration::seconds(Self::DEFAULT_TOKEN_LIFETIME_SECS),
        }
    }

    /// Sets the API base URL (without trailing slash).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the user agent sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how long a token is reused before logging in again.
    #[must_use]
    pub fn with_token_lifetime(mut self, lifetime: chrono::Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Returns the account name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the token lifetime.
    #[must_use]
    pub fn token_lifetime(&self) -> chrono::Duration {
        self.token_lifetime
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an HTTP(S) URL or the HTTP
    /// client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            base_url: self.base_url,
            username: self.username,
            password: self.password,
            client,
            tokens: TokenCache::new(self.token_lifetime),
        })
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    account: &'a str,
    password: String,
}

/// HTTPS implementation of [`DeviceTransport`].
///
/// Logs in on first use and reuses the bearer token until it is older than
/// the configured lifetime. A `401` answer drops the token.
///
/// # Examples
///
/// ```no_run
/// use intex_spa::protocol::{CloudConfig, DeviceTransport};
///
/// # async fn example() -> intex_spa::Result<()> {
/// let transport = CloudConfig::new("jane@example.com", "secret").into_transport()?;
/// for device in transport.devices().await? {
///     println!("{} {:?}", device.device_id, device.alias_name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    username: String,
    password: String,
    client: Client,
    tokens: TokenCache,
}

impl HttpTransport {
    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Logs in and returns the account.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::AuthenticationFailed` if the credentials are
    /// rejected, or another `ProtocolError` if the request fails.
    pub async fn login(&self) -> Result<User, ProtocolError> {
        let url = self.url("/oauth/auth");
        let body = LoginRequest {
            account: &self.username,
            password: BASE64.encode(self.password.as_bytes()),
        };

        tracing::debug!(url = %url, account = %self.username, "Logging in");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let response = check_status(response)?;
        response.json::<User>().await.map_err(ProtocolError::Http)
    }

    /// Returns a valid bearer token, logging in when the cached one is stale.
    ///
    /// # Arguments
    ///
    /// * `force` - Log in even if the cached token is still fresh
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if logging in fails or the answer has no token.
    pub async fn authenticate(&self, force: bool) -> Result<String, ProtocolError> {
        if !force && let Some(token) = self.tokens.valid_token(Utc::now()) {
            return Ok(token);
        }

        let user = self.login().await?;
        let token = user.token.ok_or(ProtocolError::AuthenticationFailed)?;
        self.tokens.store(token.clone(), Utc::now());

        tracing::debug!(account = %self.username, "Bearer token refreshed");

        Ok(token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProtocolError> {
        let token = self.authenticate(false).await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate();
        }
        let response = check_status(response)?;

        let body = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(body = %body, "Received HTTP response");

        serde_json::from_str(&body).map_err(|e| ProtocolError::UnexpectedResponse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP GET");
        self.send(self.client.get(&url)).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ProtocolError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending HTTP POST");
        self.send(self.client.post(&url).json(body)).await
    }
}

fn check_status(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ProtocolError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(ProtocolError::ConnectionFailed(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }
    Ok(response)
}

impl DeviceTransport for HttpTransport {
    async fn devices(&self) -> Result<Vec<DeviceInfo>, ProtocolError> {
        self.get_json("/v1/userdevice/user").await
    }

    async fn command_catalog(
        &self,
        device_id: &str,
    ) -> Result<Vec<CommandDefinition>, ProtocolError> {
        let path = format!("/v1/commandset/device/{}", urlencoding::encode(device_id));
        self.get_json(&path).await
    }

    async fn submit_command(
        &self,
        device_id: &str,
        submission: &CommandSubmission,
    ) -> Result<CommandStatus, ProtocolError> {
        let path = format!("/v1/command/{}", urlencoding::encode(device_id));
        self.post_json(&path, submission).await
    }

    async fn poll_feedback(
        &self,
        device_id: &str,
        session_id: &str,
    ) -> Result<Feedback, ProtocolError> {
        let path = format!(
            "/v1/device/command/feedback/{}/{}",
            urlencoding::encode(device_id),
            urlencoding::encode(session_id)
        );
        self.get_json(&path).await
    }

    async fn latest_status(&self, device_id: &str) -> Result<Feedback, ProtocolError> {
        let path = format!("/v1/device/lateststatus/{}", urlencoding::encode(device_id));
        self.get_json(&path).await
    }
}
