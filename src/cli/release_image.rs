use super::print::{self, OutputFormat};
use crate::api::{ApiError, VendorApi};
use crate::images::{
    clean_release_images, select_release, AppContext, ImageListError, ImageListOptions,
    ProxyDomainResolver, ProxyPrecedence,
};
use anyhow::Result;
use tracing::debug;

/// Images of a channel's current or requested release
///
/// A requested version goes through the full proxy precedence chain. The
/// current release comes from the API's current-release lookup, which
/// supplies its own proxy domain.
pub async fn list_release_images(
    api: &dyn VendorApi,
    app: &AppContext,
    options: &ImageListOptions,
) -> Result<Vec<String>, ImageListError> {
    let channel = super::find_channel(api, app, &options.channel).await?;

    let (release, proxy_domain) = if !options.version.is_empty() {
        let releases = api
            .list_channel_releases(&app.id, app.app_type, &channel.id)
            .await
            .map_err(ImageListError::api("failed to list channel releases"))?;

        let release = select_release(&releases, &options.version)?.clone();
        let proxy_domain = ProxyDomainResolver::new(api, app, &channel.id)
            .resolve(&release, ProxyPrecedence::Full)
            .await;
        (release, proxy_domain)
    } else {
        api.get_current_channel_release(&app.id, app.app_type, &channel.id)
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ImageListError::NoReleasesInChannel,
                source => ImageListError::Api {
                    context: "failed to get current channel release",
                    source,
                },
            })?
    };

    debug!(
        app = %app.slug,
        channel = %channel.name,
        semver = %release.semver,
        proxy_domain = %proxy_domain,
        "Resolved release"
    );

    Ok(clean_release_images(
        &release.airgap_bundle_images,
        &proxy_domain,
        options,
    ))
}

/// `release image ls`
pub async fn release_image_ls(
    api: &dyn VendorApi,
    app: &AppContext,
    options: &ImageListOptions,
    format: OutputFormat,
) -> Result<()> {
    if options.channel.is_empty() {
        anyhow::bail!("channel is required");
    }

    let images = list_release_images(api, app, options).await?;
    print::channel_images(&mut std::io::stdout().lock(), &images, format)
}
