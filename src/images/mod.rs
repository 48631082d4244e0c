//! Release image reference resolution.
//!
//! Picks a release from a channel, works out which proxy registry domain its
//! images are served under, and rewrites each image reference for display.

pub mod normalize;
pub mod proxy;
pub mod select;

pub use normalize::clean_image_name;
pub use proxy::{ProxyDomainResolver, ProxyPrecedence};
pub use select::select_release;

use crate::api::models::AppType;
use crate::api::ApiError;
use std::collections::HashSet;

/// Why listing a release's images failed
#[derive(Debug, thiserror::Error)]
pub enum ImageListError {
    #[error("channel {0:?} not found")]
    ChannelNotFound(String),

    #[error("no releases found in channel")]
    NoReleasesInChannel,

    #[error("no release found with version {0:?} in channel")]
    VersionNotFound(String),

    #[error("{context}")]
    Api {
        context: &'static str,
        #[source]
        source: ApiError,
    },
}

impl ImageListError {
    pub(crate) fn api(context: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| ImageListError::Api { context, source }
    }
}

/// The app the command operates on, resolved once up front
#[derive(Debug, Clone)]
pub struct AppContext {
    pub id: String,
    pub slug: String,
    pub app_type: AppType,
}

/// User options shared by the image listing commands
#[derive(Debug, Clone, Default)]
pub struct ImageListOptions {
    /// Channel name, slug, or ID
    pub channel: String,
    /// Exact semver to list; empty for the current release
    pub version: String,
    /// Leave proxy registry wrapping in place
    pub keep_proxy: bool,
    /// Drop repeated references, keeping the first occurrence
    pub unique: bool,
}

/// Clean every image reference of a release, preserving order
///
/// Empty results are dropped. With `keep_proxy` the proxy domain is not
/// passed on, so only public registry prefixes are stripped.
pub fn clean_release_images(
    images: &[String],
    proxy_domain: &str,
    options: &ImageListOptions,
) -> Vec<String> {
    let proxy_domain = if options.keep_proxy { "" } else { proxy_domain };

    let mut seen = HashSet::new();
    images
        .iter()
        .map(|image| clean_image_name(image, proxy_domain))
        .filter(|image| !image.is_empty())
        .filter(|image| !options.unique || seen.insert(image.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_images() -> Vec<String> {
        vec![
            "my.proxy.com/proxy/myapp/nginx:latest".to_string(),
            "my.proxy.com/library/postgres:14".to_string(),
            "docker.io/redis:alpine".to_string(),
        ]
    }

    #[test]
    fn test_clean_release_images() {
        let images = clean_release_images(
            &release_images(),
            "my.proxy.com",
            &ImageListOptions::default(),
        );
        assert_eq!(images, vec!["nginx:latest", "postgres:14", "redis:alpine"]);
    }

    #[test]
    fn test_clean_release_images_keep_proxy() {
        let options = ImageListOptions {
            keep_proxy: true,
            ..Default::default()
        };
        let images = clean_release_images(&release_images(), "my.proxy.com", &options);
        assert_eq!(
            images,
            vec![
                "my.proxy.com/proxy/myapp/nginx:latest",
                "my.proxy.com/library/postgres:14",
                "redis:alpine"
            ]
        );
    }

    #[test]
    fn test_duplicates_kept_unless_unique() {
        let raw = vec![
            "docker.io/library/nginx:1.27".to_string(),
            "ghcr.io/org/app:1".to_string(),
            "nginx:1.27".to_string(),
            "".to_string(),
            "docker.io/".to_string(),
        ];

        let all = clean_release_images(&raw, "", &ImageListOptions::default());
        assert_eq!(all, vec!["nginx:1.27", "ghcr.io/org/app:1", "nginx:1.27"]);

        let options = ImageListOptions {
            unique: true,
            ..Default::default()
        };
        let unique = clean_release_images(&raw, "", &options);
        assert_eq!(unique, vec!["nginx:1.27", "ghcr.io/org/app:1"]);
    }

    #[test]
    fn test_api_error_context() {
        let err = ImageListError::api("failed to get channel")(ApiError::NotFound("x".into()));
        assert_eq!(err.to_string(), "failed to get channel");
        assert!(std::error::Error::source(&err).is_some());
    }
}
