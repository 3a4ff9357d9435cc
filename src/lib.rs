//! Fetch a random Unsplash photo and save it to a folder

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![deny(warnings)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod api;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod constants;
pub mod download;
pub mod error;
mod fetch;
pub mod params;
pub mod retry;

pub use api::{ImageSize, RandomPhoto, UnsplashClient};
pub use boundary::{save_new_image, save_new_image_with_config};
pub use config::{ClientConfig, RetryConfig};
pub use error::{DownloadError, Error, FetchError};
pub use params::{FilterParams, Query};
