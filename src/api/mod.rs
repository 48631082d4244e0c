//! Client-side interface to the vendor API.
//!
//! Commands depend on the [`VendorApi`] trait rather than on the HTTP client
//! directly, so the image listing logic can run against an in-memory fake.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod models;

use crate::images::select::current_release;
use async_trait::async_trait;
use models::{
    App, AppCustomHostnames, AppType, Channel, ChannelRelease, CustomHostnameOverrides,
};

/// Failure talking to the vendor API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{method} {url} (status {status}): {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("invalid API origin")]
    Url(#[from] url::ParseError),

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The vendor API operations consumed by the image commands
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Look up an app by ID or slug
    async fn get_app(&self, app_id_or_slug: &str) -> Result<App, ApiError>;

    /// Look up a channel by name, slug, or ID
    ///
    /// Returns [`ApiError::NotFound`] when no channel matches.
    async fn get_channel_by_name(
        &self,
        app_id: &str,
        app_type: AppType,
        name_or_id: &str,
    ) -> Result<Channel, ApiError>;

    /// All releases promoted to a channel, in API order
    async fn list_channel_releases(
        &self,
        app_id: &str,
        app_type: AppType,
        channel_id: &str,
    ) -> Result<Vec<ChannelRelease>, ApiError>;

    /// Channel-level custom hostname overrides
    async fn get_custom_hostnames(
        &self,
        app_id: &str,
        app_type: AppType,
        channel_id: &str,
    ) -> Result<CustomHostnameOverrides, ApiError>;

    /// All app-level custom hostnames
    async fn get_app_custom_hostnames(&self, app_id: &str) -> Result<AppCustomHostnames, ApiError>;

    /// The app's default custom proxy hostname, or an empty string if none is set
    async fn get_default_proxy_hostname(&self, app_id: &str) -> Result<String, ApiError> {
        Ok(self
            .get_app_custom_hostnames(app_id)
            .await?
            .default_proxy_hostname())
    }

    /// The channel's current release together with its proxy domain
    ///
    /// The channel is only fetched when the release itself carries no proxy
    /// registry domain.
    async fn get_current_channel_release(
        &self,
        app_id: &str,
        app_type: AppType,
        channel_id: &str,
    ) -> Result<(ChannelRelease, String), ApiError> {
        let releases = self
            .list_channel_releases(app_id, app_type, channel_id)
            .await?;

        let release = current_release(&releases).cloned().ok_or_else(|| {
            ApiError::NotFound(format!("releases in channel {}", channel_id))
        })?;

        let mut proxy_domain = release.proxy_registry_domain.clone();
        if proxy_domain.is_empty() && app_type == AppType::Kots {
            proxy_domain = self
                .get_custom_hostnames(app_id, app_type, channel_id)
                .await?
                .proxy
                .hostname;
        }

        Ok((release, proxy_domain))
    }
}
