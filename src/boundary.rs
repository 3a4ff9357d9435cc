//! Plain-text entry point used by the command line shell.
//!
//! Callers on this side only see a path or [`ERROR_SENTINEL`]; the reason for
//! a failure is logged here and goes no further.

use std::path::Path;

use tracing::error;

use crate::api::UnsplashClient;
use crate::config::ClientConfig;
use crate::constants::ERROR_SENTINEL;
use crate::params::FilterParams;

/// Saves a random photo into `folder` with the default client settings.
///
/// Returns the absolute path of the image, or `"ERROR"`. Empty filter fields
/// are not applied.
#[allow(clippy::too_many_arguments)]
pub fn save_new_image(
    api_key: &str,
    folder: &str,
    collections: &str,
    topics: &str,
    username: &str,
    query: &str,
    orientation: &str,
    content_filter: &str,
) -> String {
    let params = FilterParams::from_fields(
        collections,
        topics,
        username,
        query,
        orientation,
        content_filter,
    );
    save_new_image_with_config(ClientConfig::default(), api_key, folder, &params)
}

/// Same as [`save_new_image`] with explicit client settings.
pub fn save_new_image_with_config(
    config: ClientConfig,
    api_key: &str,
    folder: &str,
    params: &FilterParams,
) -> String {
    let client = match UnsplashClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to set up Unsplash client");
            return ERROR_SENTINEL.to_string();
        }
    };

    match client.save_new_image(api_key, Path::new(folder), params) {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(err) => {
            error!(kind = err.kind(), error = %err, "Failed to save new image");
            ERROR_SENTINEL.to_string()
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_api_base_gives_sentinel() {
        let config = ClientConfig::default().with_api_base("not a url");
        let dir = tempfile::tempdir().unwrap();
        let outcome = save_new_image_with_config(
            config,
            "key",
            &dir.path().to_string_lossy(),
            &FilterParams::new(),
        );
        assert_eq!(outcome, ERROR_SENTINEL);
    }

    #[test]
    fn nan_backoff_gives_sentinel() {
        let mut config = ClientConfig::default().with_api_base("http://127.0.0.1:1");
        config.retry.backoff_multiplier = f64::NAN;
        let dir = tempfile::tempdir().unwrap();
        let outcome = save_new_image_with_config(
            config,
            "key",
            &dir.path().to_string_lossy(),
            &FilterParams::new(),
        );
        assert_eq!(outcome, ERROR_SENTINEL);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
