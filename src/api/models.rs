//! Vendor API request/response types
//!
//! Only the fields the image commands read are modelled; everything else the
//! API returns is ignored on deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Application type, which decides which hostname lookups apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppType {
    /// CRD-based application installed through KOTS
    Kots,
    Platform,
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppType::Kots => write!(f, "kots"),
            AppType::Platform => write!(f, "platform"),
        }
    }
}

/// Application as listed by `GET /v3/apps`
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub is_kots_app: bool,
}

impl App {
    pub fn app_type(&self) -> AppType {
        if self.is_kots_app {
            AppType::Kots
        } else {
            AppType::Platform
        }
    }
}

/// Response from apps list endpoint
#[derive(Debug, Deserialize)]
pub struct AppsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: Vec<App>,
}

/// Single hostname override
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct HostnameOverride {
    #[serde(default)]
    pub hostname: String,
}

/// Per-channel custom hostname overrides
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomHostnameOverrides {
    #[serde(default)]
    pub registry: HostnameOverride,
    #[serde(default)]
    pub proxy: HostnameOverride,
    #[serde(default)]
    pub download_portal: HostnameOverride,
    #[serde(default)]
    pub replicated_app: HostnameOverride,
}

/// Release channel
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "channelSlug")]
    pub slug: String,
    #[serde(default, rename = "customHostNameOverrides")]
    pub custom_hostname_overrides: CustomHostnameOverrides,
}

/// Response from channels list endpoint
#[derive(Debug, Deserialize)]
pub struct ChannelsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub channels: Vec<Channel>,
}

/// Response from single channel endpoint
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    pub channel: Channel,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedClusterInstallation {
    #[serde(default)]
    pub proxy_registry_domain: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallationTypes {
    #[serde(default)]
    pub embedded_cluster: EmbeddedClusterInstallation,
}

/// Release as promoted to a channel
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRelease {
    #[serde(default)]
    pub semver: String,
    /// Position within the channel history; the highest one is current
    #[serde(default)]
    pub channel_sequence: i64,
    #[serde(default)]
    pub sequence: i64,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub proxy_registry_domain: String,
    /// Raw image references, in release order
    #[serde(default, deserialize_with = "null_as_default")]
    pub airgap_bundle_images: Vec<String>,
    #[serde(default)]
    pub installation_types: InstallationTypes,
}

/// Response from channel releases endpoint
#[derive(Debug, Deserialize)]
pub struct ChannelReleasesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<ChannelRelease>,
}

/// Custom hostname configured at the app level
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppCustomHostname {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub hostname: String,
}

/// All custom hostnames configured for an app, grouped by service
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppCustomHostnames {
    #[serde(default, deserialize_with = "null_as_default")]
    pub registry: Vec<AppCustomHostname>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proxy: Vec<AppCustomHostname>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub download_portal: Vec<AppCustomHostname>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub replicated_app: Vec<AppCustomHostname>,
}

impl AppCustomHostnames {
    /// Hostname of the default proxy entry, or an empty string when none is marked default
    pub fn default_proxy_hostname(&self) -> String {
        self.proxy
            .iter()
            .find(|h| h.is_default)
            .map(|h| h.hostname.clone())
            .unwrap_or_default()
    }
}
