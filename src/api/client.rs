use super::models::{
    App, AppCustomHostnames, AppType, AppsResponse, Channel, ChannelRelease,
    ChannelReleasesResponse, ChannelResponse, ChannelsResponse, CustomHostnameOverrides,
};
use super::{ApiError, VendorApi};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_ORIGIN: &str = "https://api.replicated.com/vendor";

/// HTTP client for the vendor v3 REST API
pub struct VendorClient {
    http_client: Client,
    api_origin: String,
    token: String,
}

impl VendorClient {
    pub fn new(http_client: Client, api_origin: &str, token: &str) -> Self {
        Self {
            http_client,
            api_origin: api_origin.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.api_origin, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET a JSON document, mapping 404 to [`ApiError::NotFound`] naming `what`
    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ApiError> {
        debug!(url = %url, "GET");

        let response = self
            .http_client
            .get(url.clone())
            .header("Authorization", &self.token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status {
                method: "GET",
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Find a channel by ID first, then by exact name, then by slug
fn find_channel(channels: Vec<Channel>, name_or_id: &str) -> Option<Channel> {
    let position = channels
        .iter()
        .position(|c| c.id == name_or_id)
        .or_else(|| channels.iter().position(|c| c.name == name_or_id))
        .or_else(|| channels.iter().position(|c| c.slug == name_or_id))?;
    channels.into_iter().nth(position)
}

#[async_trait]
impl VendorApi for VendorClient {
    async fn get_app(&self, app_id_or_slug: &str) -> Result<App, ApiError> {
        let url = self.endpoint("/v3/apps", &[("excludeChannels", "true")])?;
        let response: AppsResponse = self.get_json(url, "apps").await?;

        response
            .apps
            .into_iter()
            .find(|app| app.id == app_id_or_slug || app.slug == app_id_or_slug)
            .ok_or_else(|| ApiError::NotFound(format!("app {:?}", app_id_or_slug)))
    }

    async fn get_channel_by_name(
        &self,
        app_id: &str,
        _app_type: AppType,
        name_or_id: &str,
    ) -> Result<Channel, ApiError> {
        let path = format!("/v3/app/{}/channels", urlencoding::encode(app_id));
        let url = self.endpoint(&path, &[("excludeDetail", "true")])?;
        let response: ChannelsResponse = self.get_json(url, "channels").await?;

        find_channel(response.channels, name_or_id)
            .ok_or_else(|| ApiError::NotFound(format!("channel {:?}", name_or_id)))
    }

    async fn list_channel_releases(
        &self,
        app_id: &str,
        _app_type: AppType,
        channel_id: &str,
    ) -> Result<Vec<ChannelRelease>, ApiError> {
        let path = format!(
            "/v3/app/{}/channel/{}/releases",
            urlencoding::encode(app_id),
            urlencoding::encode(channel_id)
        );
        let url = self.endpoint(&path, &[])?;
        let response: ChannelReleasesResponse = self
            .get_json(url, &format!("channel {:?}", channel_id))
            .await?;

        Ok(response.releases)
    }

    async fn get_custom_hostnames(
        &self,
        app_id: &str,
        _app_type: AppType,
        channel_id: &str,
    ) -> Result<CustomHostnameOverrides, ApiError> {
        let path = format!(
            "/v3/app/{}/channel/{}",
            urlencoding::encode(app_id),
            urlencoding::encode(channel_id)
        );
        let url = self.endpoint(&path, &[])?;
        let response: ChannelResponse = self
            .get_json(url, &format!("channel {:?}", channel_id))
            .await?;

        Ok(response.channel.custom_hostname_overrides)
    }

    async fn get_app_custom_hostnames(
        &self,
        app_id: &str,
    ) -> Result<AppCustomHostnames, ApiError> {
        let path = format!("/v3/app/{}/custom-hostnames", urlencoding::encode(app_id));
        let url = self.endpoint(&path, &[])?;
        self.get_json(url, "custom hostnames").await
    }
}
