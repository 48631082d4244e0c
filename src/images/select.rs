use super::ImageListError;
use crate::api::models::ChannelRelease;

/// The release with the strictly greatest channel sequence
///
/// On a tie the first one in input order wins.
pub fn current_release(releases: &[ChannelRelease]) -> Option<&ChannelRelease> {
    let mut current: Option<&ChannelRelease> = None;
    for release in releases {
        match current {
            Some(c) if release.channel_sequence <= c.channel_sequence => {}
            _ => current = Some(release),
        }
    }
    current
}

/// Pick one release from a channel's history
///
/// A non-empty `requested_version` must equal a release's semver exactly;
/// the first match in input order is returned. An empty one selects the
/// current release.
pub fn select_release<'a>(
    releases: &'a [ChannelRelease],
    requested_version: &str,
) -> Result<&'a ChannelRelease, ImageListError> {
    if releases.is_empty() {
        return Err(ImageListError::NoReleasesInChannel);
    }

    if !requested_version.is_empty() {
        return releases
            .iter()
            .find(|release| release.semver == requested_version)
            .ok_or_else(|| ImageListError::VersionNotFound(requested_version.to_string()));
    }

    current_release(releases).ok_or(ImageListError::NoReleasesInChannel)
}
