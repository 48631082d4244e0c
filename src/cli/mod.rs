pub mod channel_image;
pub mod print;
pub mod release_image;

use crate::api::models::Channel;
use crate::api::{ApiError, VendorApi};
use crate::images::{AppContext, ImageListError};

/// Look up the channel named on the command line
async fn find_channel(
    api: &dyn VendorApi,
    app: &AppContext,
    name_or_id: &str,
) -> Result<Channel, ImageListError> {
    api.get_channel_by_name(&app.id, app.app_type, name_or_id)
        .await
        .map_err(|e| match e {
            ApiError::NotFound(_) => ImageListError::ChannelNotFound(name_or_id.to_string()),
            source => ImageListError::Api {
                context: "failed to get channel",
                source,
            },
        })
}
