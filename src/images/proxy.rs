// Proxy registry domain resolution

use super::AppContext;
use crate::api::models::{AppType, ChannelRelease};
use crate::api::VendorApi;
use tracing::{debug, warn};

/// Used when nothing more specific is configured for a KOTS app
pub const FALLBACK_PROXY_DOMAIN: &str = "proxy.replicated.com";

/// Precedence chain used to find the proxy domain
///
/// The two chains differ; `channel image ls` uses [`ProxyPrecedence::Channel`]
/// and a versioned `release image ls` uses [`ProxyPrecedence::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyPrecedence {
    /// Release domain, then the channel proxy override (KOTS apps only).
    Channel,
    /// Release domain, then for KOTS apps: the channel proxy override, the
    /// embedded cluster domain, the app default proxy hostname, and finally
    /// [`FALLBACK_PROXY_DOMAIN`].
    Full,
}

/// Finds the registry domain under which a release's images are proxied
///
/// Resolution never fails. Lookups that error are logged and treated as
/// empty, and an empty result means no proxy domain applies.
pub struct ProxyDomainResolver<'a> {
    api: &'a dyn VendorApi,
    app: &'a AppContext,
    channel_id: &'a str,
}

impl<'a> ProxyDomainResolver<'a> {
    pub fn new(api: &'a dyn VendorApi, app: &'a AppContext, channel_id: &'a str) -> Self {
        Self {
            api,
            app,
            channel_id,
        }
    }

    pub async fn resolve(&self, release: &ChannelRelease, precedence: ProxyPrecedence) -> String {
        if !release.proxy_registry_domain.is_empty() {
            debug!(
                domain = %release.proxy_registry_domain,
                "Using proxy registry domain from release"
            );
            return release.proxy_registry_domain.clone();
        }

        if self.app.app_type != AppType::Kots {
            debug!(app_type = %self.app.app_type, "No proxy registry domain for app type");
            return String::new();
        }

        let channel_hostname = self.channel_proxy_hostname().await;
        if !channel_hostname.is_empty() {
            debug!(domain = %channel_hostname, "Using channel custom proxy hostname");
            return channel_hostname;
        }

        if precedence == ProxyPrecedence::Channel {
            return String::new();
        }

        let embedded_cluster = &release.installation_types.embedded_cluster;
        if !embedded_cluster.proxy_registry_domain.is_empty() {
            debug!(
                domain = %embedded_cluster.proxy_registry_domain,
                "Using embedded cluster proxy registry domain"
            );
            return embedded_cluster.proxy_registry_domain.clone();
        }

        match self.api.get_default_proxy_hostname(&self.app.id).await {
            Ok(hostname) if !hostname.is_empty() => {
                debug!(domain = %hostname, "Using app default proxy hostname");
                hostname
            }
            Ok(_) => {
                debug!(domain = FALLBACK_PROXY_DOMAIN, "Using fallback proxy domain");
                FALLBACK_PROXY_DOMAIN.to_string()
            }
            Err(e) => {
                warn!("Failed to get default proxy hostname: {}", e);
                FALLBACK_PROXY_DOMAIN.to_string()
            }
        }
    }

    async fn channel_proxy_hostname(&self) -> String {
        match self
            .api
            .get_custom_hostnames(&self.app.id, self.app.app_type, self.channel_id)
            .await
        {
            Ok(overrides) => overrides.proxy.hostname,
            Err(e) => {
                warn!(
                    channel_id = self.channel_id,
                    "Failed to get custom hostnames: {}", e
                );
                String::new()
            }
        }
    }
}
