//! Shared constants for talking to Unsplash
//!

use std::time::Duration;

/// Base URL of the Unsplash API
pub const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

/// Path of the random photo endpoint, relative to the API base
pub const RANDOM_PHOTO_PATH: &str = "photos/random";

/// API version requested through the `Accept-Version` header
pub const ACCEPT_VERSION: &str = "v1";

/// Header used to pin the API version
pub const ACCEPT_VERSION_HEADER: &str = "accept-version";

/// Returned by the boundary call instead of a path when anything fails
pub const ERROR_SENTINEL: &str = "ERROR";

/// Extension of saved images
pub const IMAGE_EXTENSION: &str = "jpg";

/// Suffix of in-flight download files
pub const PARTIAL_SUFFIX: &str = ".part";

/// Default orientation requested by the CLI when none is given
pub const DEFAULT_ORIENTATION: &str = "landscape";

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for the API request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for streaming an image to disk.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
