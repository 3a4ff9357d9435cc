//! Request a random photo and save it, in one call.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::api::UnsplashClient;
use crate::download::download;
use crate::error::Error;
use crate::params::FilterParams;

impl UnsplashClient {
    /// Fetches a random photo matching `params` and saves it as
    /// `{destination_dir}/{id}.jpg`.
    ///
    /// The first failure ends the call; only the API request itself is
    /// retried. On error nothing is left under the final name.
    pub fn save_new_image(
        &self,
        api_key: &str,
        destination_dir: &Path,
        params: &FilterParams,
    ) -> Result<PathBuf, Error> {
        let query = params.encode();
        debug!(filters = query.pairs().len(), "Encoded filters");

        let photo = self.fetch_random(api_key, &query)?;
        match &photo.photographer {
            Some(name) => info!(id = %photo.id, photographer = %name, "Photo selected"),
            None => info!(id = %photo.id, "Photo selected"),
        }

        let path = download(
            &self.http,
            self.config.download_timeout,
            &photo.url,
            destination_dir,
            &photo.id,
        )?;
        info!(path = %path.display(), "Saved new image");
        Ok(path)
    }
}
