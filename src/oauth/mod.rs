//! OAuth component
//!
//! Blocking implementations of the authorization-code flow (redirect
//! URL construction + token exchange), token refresh and revocation,
//! and the device-code flow. The device flow polls synchronously with
//! the server-specified interval through an injectable sleep function;
//! elapsed time is accounted as the sum of slept intervals so the
//! `expires_in` budget behaves deterministically under test.
//!
//! Credentials occupy a single slot shared with the client: replaced
//! wholesale on login/refresh, cleared on revoke.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::config::OauthConfig;
use crate::error::Error;
use crate::http::{default_headers, HttpComponent};
use crate::models::DeviceCode;
use crate::parser::{parse_tree, Shape};

/// Injectable sleep used by the device-flow poll loop.
pub type SleepFn = Arc<dyn Fn(Duration) + Send + Sync>;

/// Raw token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
    pub created_at: u64,
}

/// Stored user credentials: the client's single "current user" slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    /// Absolute expiry as a unix timestamp.
    pub expires_at: u64,
}

impl Credentials {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        scope: impl Into<String>,
        expires_at: u64,
    ) -> Self {
        Credentials {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            scope: scope.into(),
            expires_at,
        }
    }

    /// Whether the token expires within the given window from now.
    pub fn expires_within(&self, window_secs: u64) -> bool {
        epoch_now().saturating_add(window_secs) >= self.expires_at
    }
}

impl From<TokenResponse> for Credentials {
    fn from(token: TokenResponse) -> Self {
        Credentials {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            scope: token.scope,
            expires_at: token.created_at + token.expires_in,
        }
    }
}

fn epoch_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Shared credentials slot.
pub type CredentialsSlot = Arc<RwLock<Option<Credentials>>>;

/// OAuth operations against the token endpoints.
pub struct OauthComponent {
    http: Arc<HttpComponent>,
    config: OauthConfig,
    client_id: String,
    client_secret: String,
    credentials: CredentialsSlot,
    sleep: SleepFn,
}

impl OauthComponent {
    pub fn new(
        http: Arc<HttpComponent>,
        config: OauthConfig,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        credentials: CredentialsSlot,
        sleep: SleepFn,
    ) -> Self {
        OauthComponent {
            http,
            config,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            credentials,
            sleep,
        }
    }

    fn headers(&self) -> HashMap<String, String> {
        default_headers(&self.client_id, None)
    }

    /// URL the user must visit to authorize the application
    /// (authorization-code flow).
    pub fn get_redirect_url(&self, redirect_uri: Option<&str>, state: Option<&str>) -> String {
        let redirect_uri = redirect_uri.unwrap_or(&self.config.default_redirect_uri);

        let mut query = vec![
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        if let Some(state) = state {
            query.push(("state", state));
        }

        self.http.get_url("oauth/authorize", &query)
    }

    /// Exchange an authorization code for tokens and store them.
    pub fn get_token(&self, code: &str, redirect_uri: Option<&str>) -> Result<Credentials, Error> {
        let redirect_uri = redirect_uri.unwrap_or(&self.config.default_redirect_uri);

        let body = json!({
            "code": code,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "redirect_uri": redirect_uri,
            "grant_type": "authorization_code",
        });

        let response = self.http.request(
            Method::POST,
            "oauth/token",
            &HashMap::new(),
            Some(&body),
            &self.headers(),
            false,
        )?;

        let token: TokenResponse = parse_tree(&response.json, &Shape::Leaf)?;
        let credentials = Credentials::from(token);

        *self.credentials.write() = Some(credentials.clone());
        tracing::info!("user authenticated via authorization code");

        Ok(credentials)
    }

    /// Refresh the stored token, replacing the credentials wholesale.
    pub fn refresh_token(&self) -> Result<Credentials, Error> {
        let refresh_token = match &*self.credentials.read() {
            Some(credentials) => credentials.refresh_token.clone(),
            None => return Err(Error::NotAuthenticated),
        };

        let body = json!({
            "refresh_token": refresh_token,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "redirect_uri": self.config.default_redirect_uri,
            "grant_type": "refresh_token",
        });

        let response = self.http.request(
            Method::POST,
            "oauth/token",
            &HashMap::new(),
            Some(&body),
            &self.headers(),
            false,
        )?;

        let token: TokenResponse = parse_tree(&response.json, &Shape::Leaf)?;
        let credentials = Credentials::from(token);

        *self.credentials.write() = Some(credentials.clone());
        tracing::debug!("access token refreshed");

        Ok(credentials)
    }

    /// Revoke the stored token and clear the credentials slot.
    pub fn revoke_token(&self) -> Result<(), Error> {
        let access_token = match &*self.credentials.read() {
            Some(credentials) => credentials.access_token.clone(),
            None => return Err(Error::NotAuthenticated),
        };

        let body = json!({
            "token": access_token,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
        });

        self.http.request(
            Method::POST,
            "oauth/revoke",
            &HashMap::new(),
            Some(&body),
            &self.headers(),
            false,
        )?;

        *self.credentials.write() = None;
        tracing::info!("user token revoked");

        Ok(())
    }

    /// Request a device/user code pair for the device flow.
    pub fn get_device_code(&self) -> Result<DeviceCode, Error> {
        let body = json!({"client_id": self.client_id});

        let response = self.http.request(
            Method::POST,
            "oauth/device/code",
            &HashMap::new(),
            Some(&body),
            &self.headers(),
            false,
        )?;

        parse_tree(&response.json, &Shape::Leaf)
    }

    /// Poll the token endpoint until the user approves the device code.
    ///
    /// Polls run in no-raise mode: any non-200 status means "still
    /// pending" and the loop sleeps for the server-specified interval.
    /// Once the slept intervals add up to the code's `expires_in`
    /// budget, [`Error::Timeout`] is raised.
    pub fn wait_for_verification(&self, device: &DeviceCode) -> Result<Credentials, Error> {
        let body = json!({
            "code": device.device_code,
            "client_id": self.client_id,
            "client_secret": self.client_secret,
        });

        let mut elapsed_secs = 0u64;

        loop {
            let response = self.http.request(
                Method::POST,
                "oauth/device/token",
                &HashMap::new(),
                Some(&body),
                &self.headers(),
                true,
            )?;

            if response.status == 200 {
                let token: TokenResponse = parse_tree(&response.json, &Shape::Leaf)?;
                let credentials = Credentials::from(token);

                *self.credentials.write() = Some(credentials.clone());
                tracing::info!("device code approved");

                return Ok(credentials);
            }

            tracing::debug!(status = response.status, "device code pending approval");

            if elapsed_secs >= device.expires_in {
                return Err(Error::Timeout);
            }

            (self.sleep)(Duration::from_secs(device.interval));
            elapsed_secs = elapsed_secs.saturating_add(device.interval);
        }
    }
}
