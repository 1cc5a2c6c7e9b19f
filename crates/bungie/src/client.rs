//! REST client for the Bungie.net platform.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BungieConfig;
use crate::envelope::Envelope;
use crate::error::BungieError;
use crate::manifest::Manifest;
use crate::membership::UserMemberships;
use crate::oauth::{TokenGrant, TokenResponse};
use crate::profile::{Component, Profile};

/// Body of `Actions/Items/TransferItem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferItemRequest {
    pub item_reference_hash: i64,
    pub stack_size: i32,
    pub transfer_to_vault: bool,
    pub item_id: String,
    pub character_id: String,
    pub membership_type: i16,
}

/// Body of `Actions/Items/EquipItem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipItemRequest {
    pub item_id: String,
    pub character_id: String,
    pub membership_type: i16,
}

/// HTTP client for the Bungie.net platform API.
///
/// Cheap to clone; the inner [`reqwest::Client`] pools connections.
#[derive(Clone)]
pub struct BungieClient {
    client: reqwest::Client,
    config: BungieConfig,
}

impl BungieClient {
    pub fn new(config: BungieConfig) -> Result<Self, BungieError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BungieConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // ---- OAuth ----

    /// Exchange an authorization code for a token pair.
    ///
    /// The raw response is returned so callers can report which fields were
    /// missing.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, BungieError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        let response = self
            .client
            .post(self.url("/Platform/App/OAuth/Token/"))
            .form(&form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Exchange a refresh token for a new pair using client credentials.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenGrant, BungieError> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        let response = self
            .client
            .post(self.url("/Platform/App/OAuth/Token/"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&form)
            .send()
            .await?;

        let raw: TokenResponse = Self::parse_response(response).await?;
        raw.into_grant()
            .ok_or_else(|| BungieError::Malformed("token refresh response is incomplete".into()))
    }

    // ---- Platform ----

    pub async fn memberships(&self, access_token: &str) -> Result<UserMemberships, BungieError> {
        self.get_platform("/Platform/User/GetMembershipsForCurrentUser/", Some(access_token))
            .await
    }

    /// Fetch typed profile components.
    pub async fn profile(
        &self,
        access_token: &str,
        membership_type: i16,
        membership_id: &str,
        components: &[Component],
    ) -> Result<Profile, BungieError> {
        let path = Self::profile_path(membership_type, membership_id, components);
        self.get_platform(&path, Some(access_token)).await
    }

    /// Fetch profile components and return the full envelope untouched.
    pub async fn raw_profile(
        &self,
        access_token: &str,
        membership_type: i16,
        membership_id: &str,
        components: &[Component],
    ) -> Result<serde_json::Value, BungieError> {
        let path = Self::profile_path(membership_type, membership_id, components);
        let response = self
            .authorized(self.client.get(self.url(&path)), Some(access_token))
            .send()
            .await?;
        Self::parse_checked_envelope(response).await
    }

    pub async fn transfer_item(
        &self,
        access_token: &str,
        request: &TransferItemRequest,
    ) -> Result<serde_json::Value, BungieError> {
        self.post_action("/Platform/Destiny2/Actions/Items/TransferItem/", access_token, request)
            .await
    }

    pub async fn equip_item(
        &self,
        access_token: &str,
        request: &EquipItemRequest,
    ) -> Result<serde_json::Value, BungieError> {
        self.post_action("/Platform/Destiny2/Actions/Items/EquipItem/", access_token, request)
            .await
    }

    pub async fn manifest(&self) -> Result<Manifest, BungieError> {
        self.get_platform("/Platform/Destiny2/Manifest/", None).await
    }

    /// Download a manifest content file (a bare JSON document, no envelope).
    pub async fn definition_table<T: DeserializeOwned>(
        &self,
        content_path: &str,
    ) -> Result<T, BungieError> {
        tracing::debug!(content_path, "Downloading definition table");
        let response = self.client.get(self.url(content_path)).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn profile_path(membership_type: i16, membership_id: &str, components: &[Component]) -> String {
        format!(
            "/Platform/Destiny2/{membership_type}/Profile/{membership_id}/?components={}",
            Component::join(components)
        )
    }

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let builder = builder.header("X-API-Key", &self.config.api_key);
        match access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_platform<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: Option<&str>,
    ) -> Result<T, BungieError> {
        let response = self
            .authorized(self.client.get(self.url(path)), access_token)
            .send()
            .await?;
        let envelope: Envelope<T> = Self::parse_response(response).await?;
        envelope.into_result()
    }

    async fn post_action<B: Serialize>(
        &self,
        path: &str,
        access_token: &str,
        body: &B,
    ) -> Result<serde_json::Value, BungieError> {
        let response = self
            .authorized(self.client.post(self.url(path)), Some(access_token))
            .json(body)
            .send()
            .await?;
        Self::parse_checked_envelope(response).await
    }

    /// Parse an envelope, check its error code, and return the whole body.
    async fn parse_checked_envelope(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, BungieError> {
        let body: serde_json::Value = Self::parse_response(response).await?;
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(body.clone())
            .map_err(|e| BungieError::Malformed(e.to_string()))?;
        envelope.into_result()?;
        Ok(body)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`BungieError::Api`] with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BungieError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BungieError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BungieError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
