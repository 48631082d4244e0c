//! In-memory [`VendorApi`] for command and resolver tests

use super::models::{
    App, AppCustomHostname, AppCustomHostnames, AppType, Channel, ChannelRelease,
    CustomHostnameOverrides, HostnameOverride,
};
use super::{ApiError, VendorApi};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeVendorApi {
    pub apps: Vec<App>,
    pub channels: Vec<Channel>,
    pub releases: Vec<ChannelRelease>,
    /// App-level default proxy hostname, empty for none
    pub default_proxy_hostname: String,
    pub fail_releases: bool,
    pub fail_custom_hostnames: bool,
    pub fail_default_proxy: bool,
    pub call_log: Mutex<Vec<&'static str>>,
}

impl FakeVendorApi {
    pub fn with_channel(mut self, id: &str, name: &str, proxy_override: &str) -> Self {
        self.channels.push(Channel {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            custom_hostname_overrides: CustomHostnameOverrides {
                proxy: HostnameOverride {
                    hostname: proxy_override.to_string(),
                },
                ..Default::default()
            },
        });
        self
    }

    pub fn with_release(mut self, release: ChannelRelease) -> Self {
        self.releases.push(release);
        self
    }

    /// Names of the API operations invoked so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.call_log.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.call_log.lock().unwrap().push(call);
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            method: "GET",
            url: "http://fake".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        }
    }
}

#[async_trait]
impl VendorApi for FakeVendorApi {
    async fn get_app(&self, app_id_or_slug: &str) -> Result<App, ApiError> {
        self.record("get_app");
        self.apps
            .iter()
            .find(|a| a.id == app_id_or_slug || a.slug == app_id_or_slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("app {:?}", app_id_or_slug)))
    }

    async fn get_channel_by_name(
        &self,
        _app_id: &str,
        _app_type: AppType,
        name_or_id: &str,
    ) -> Result<Channel, ApiError> {
        self.record("get_channel_by_name");
        self.channels
            .iter()
            .find(|c| c.id == name_or_id || c.name == name_or_id || c.slug == name_or_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("channel {:?}", name_or_id)))
    }

    async fn list_channel_releases(
        &self,
        _app_id: &str,
        _app_type: AppType,
        _channel_id: &str,
    ) -> Result<Vec<ChannelRelease>, ApiError> {
        self.record("list_channel_releases");
        if self.fail_releases {
            return Err(Self::unavailable());
        }
        Ok(self.releases.clone())
    }

    async fn get_custom_hostnames(
        &self,
        _app_id: &str,
        _app_type: AppType,
        channel_id: &str,
    ) -> Result<CustomHostnameOverrides, ApiError> {
        self.record("get_custom_hostnames");
        if self.fail_custom_hostnames {
            return Err(Self::unavailable());
        }
        self.channels
            .iter()
            .find(|c| c.id == channel_id)
            .map(|c| c.custom_hostname_overrides.clone())
            .ok_or_else(|| ApiError::NotFound(format!("channel {:?}", channel_id)))
    }

    async fn get_app_custom_hostnames(
        &self,
        app_id: &str,
    ) -> Result<AppCustomHostnames, ApiError> {
        self.record("get_app_custom_hostnames");
        if self.fail_default_proxy {
            return Err(Self::unavailable());
        }
        let mut hostnames = AppCustomHostnames::default();
        if !self.default_proxy_hostname.is_empty() {
            hostnames.proxy.push(AppCustomHostname {
                app_id: app_id.to_string(),
                is_default: true,
                hostname: self.default_proxy_hostname.clone(),
            });
        }
        Ok(hostnames)
    }
}
