use super::print::{self, OutputFormat};
use crate::api::VendorApi;
use crate::images::{
    clean_release_images, select_release, AppContext, ImageListError, ImageListOptions,
    ProxyDomainResolver, ProxyPrecedence,
};
use anyhow::Result;
use tracing::debug;

/// Images of a channel's current or requested release
pub async fn list_channel_images(
    api: &dyn VendorApi,
    app: &AppContext,
    options: &ImageListOptions,
) -> Result<Vec<String>, ImageListError> {
    let channel = super::find_channel(api, app, &options.channel).await?;

    let releases = api
        .list_channel_releases(&app.id, app.app_type, &channel.id)
        .await
        .map_err(ImageListError::api("failed to list channel releases"))?;

    let release = select_release(&releases, &options.version)?;
    debug!(
        app = %app.slug,
        channel = %channel.name,
        semver = %release.semver,
        channel_sequence = release.channel_sequence,
        "Selected release"
    );

    let proxy_domain = ProxyDomainResolver::new(api, app, &channel.id)
        .resolve(release, ProxyPrecedence::Channel)
        .await;

    Ok(clean_release_images(
        &release.airgap_bundle_images,
        &proxy_domain,
        options,
    ))
}

/// `channel image ls`
pub async fn channel_image_ls(
    api: &dyn VendorApi,
    app: &AppContext,
    options: &ImageListOptions,
    format: OutputFormat,
) -> Result<()> {
    if options.channel.is_empty() {
        anyhow::bail!("channel is required");
    }

    let images = list_channel_images(api, app, options).await?;
    print::channel_images(&mut std::io::stdout().lock(), &images, format)
}
