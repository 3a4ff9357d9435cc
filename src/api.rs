//! Client for the Unsplash random photo endpoint.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::constants::{ACCEPT_VERSION, ACCEPT_VERSION_HEADER, RANDOM_PHOTO_PATH};
use crate::error::FetchError;
use crate::params::Query;
use crate::retry::with_retry;

/// Longest chunk of an unexpected error body kept in error messages
const MAX_ERROR_BODY: usize = 200;

/// Rendition of a photo to download.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Original upload, no processing
    #[default]
    Raw,
    /// Full size JPEG
    Full,
    /// 1080px wide
    Regular,
    /// 400px wide
    Small,
}

impl ImageSize {
    /// Key of this rendition in the response's `urls` object
    pub fn key(self) -> &'static str {
        match self {
            ImageSize::Raw => "raw",
            ImageSize::Full => "full",
            ImageSize::Regular => "regular",
            ImageSize::Small => "small",
        }
    }
}

/// What we keep from a successful random photo response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RandomPhoto {
    /// API-assigned photo id, used as the file stem
    pub id: String,
    /// Source URL of the selected rendition
    pub url: String,
    /// Photographer's display name (or username), for attribution
    pub photographer: Option<String>,
}

#[derive(Deserialize)]
struct PhotoPayload {
    id: String,
    urls: HashMap<String, String>,
    #[serde(default)]
    user: Option<UserPayload>,
}

#[derive(Deserialize)]
struct UserPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    errors: Vec<String>,
}

/// Holds the HTTP client and settings; build once and share by reference.
#[derive(Debug)]
pub struct UnsplashClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
    endpoint: Url,
}

impl UnsplashClient {
    /// Builds a client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        config.retry.validate().map_err(FetchError::InvalidConfig)?;
        let endpoint = random_photo_endpoint(&config.api_base)?;
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// Settings this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Asks the API for one random photo matching `query`.
    ///
    /// Rate limiting, server errors and network failures are retried with
    /// backoff according to the client's retry settings.
    pub fn fetch_random(&self, api_key: &str, query: &Query) -> Result<RandomPhoto, FetchError> {
        let mut url = self.endpoint.clone();
        query.apply_to(&mut url);

        with_retry(&self.config.retry, |attempt| {
            debug!(attempt, url = %url, "Requesting random photo");
            self.request_once(api_key, &url)
        })
    }

    fn request_once(&self, api_key: &str, url: &Url) -> Result<RandomPhoto, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, format!("Client-ID {api_key}"))
            .header(ACCEPT_VERSION_HEADER, ACCEPT_VERSION)
            .send()
            .map_err(FetchError::Network)?;

        let status = response.status();
        if let Some(err) = classify_status(status, response.headers()) {
            if let FetchError::Rejected { status, .. } = err {
                let body = response.text().unwrap_or_else(|err| {
                    debug!(status, error = %err, "Failed to read error body");
                    String::new()
                });
                return Err(FetchError::Rejected {
                    status,
                    message: error_message(status, &body),
                });
            }
            return Err(err);
        }

        let body = response.bytes().map_err(FetchError::Network)?;
        parse_random_photo(&body, self.config.image_size)
    }
}

/// Maps a non-success status to its error; `None` means go ahead and parse.
///
/// `Rejected` comes back with an empty message, the caller fills it from the body.
fn classify_status(status: StatusCode, headers: &HeaderMap) -> Option<FetchError> {
    match status.as_u16() {
        200..=299 => None,
        status @ (401 | 403) => Some(FetchError::Unauthorized { status }),
        404 => Some(FetchError::NoMatch),
        429 => Some(FetchError::Transient {
            status: 429,
            retry_after: parse_retry_after(headers),
        }),
        status @ 500..=599 => Some(FetchError::Transient {
            status,
            retry_after: None,
        }),
        status => Some(FetchError::Rejected {
            status,
            message: String::new(),
        }),
    }
}

/// Reads a `Retry-After` header given in seconds. HTTP dates are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    match value.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!(value, "Ignoring non-numeric Retry-After header");
            None
        }
    }
}

fn error_message(status: u16, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body)
        && !payload.errors.is_empty()
    {
        return payload.errors.join("; ");
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("unknown error")
            .to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

/// Pulls the id and the `size` URL out of a 200 response body.
pub(crate) fn parse_random_photo(body: &[u8], size: ImageSize) -> Result<RandomPhoto, FetchError> {
    let payload: PhotoPayload = serde_json::from_slice(body)
        .map_err(|err| FetchError::MalformedResponse(format!("unexpected body: {err}")))?;

    validate_id(&payload.id)?;

    let url = payload
        .urls
        .get(size.key())
        .ok_or_else(|| {
            FetchError::MalformedResponse(format!("response has no urls.{}", size.key()))
        })?
        .clone();
    Url::parse(&url).map_err(|err| {
        FetchError::MalformedResponse(format!("urls.{} is not a URL: {err}", size.key()))
    })?;

    let photographer = payload
        .user
        .and_then(|user| user.name.filter(|name| !name.is_empty()).or(user.username));

    Ok(RandomPhoto {
        id: payload.id,
        url,
        photographer,
    })
}

/// The id becomes a file name, so it must not be able to leave the directory.
fn validate_id(id: &str) -> Result<(), FetchError> {
    if id.is_empty() {
        return Err(FetchError::MalformedResponse("empty photo id".to_string()));
    }
    if id.starts_with('.') || id.contains(['/', '\\', '\0']) {
        return Err(FetchError::MalformedResponse(format!(
            "photo id {id:?} is not usable as a file name"
        )));
    }
    Ok(())
}

fn random_photo_endpoint(api_base: &str) -> Result<Url, FetchError> {
    let base = if api_base.ends_with('/') {
        Url::parse(api_base)?
    } else {
        Url::parse(&format!("{api_base}/"))?
    };
    Ok(base.join(RANDOM_PHOTO_PATH)?)
}
