//! CLI parser
use clap::Parser;

use crate::constants::DEFAULT_ORIENTATION;

#[derive(Parser, Debug)]
#[command(name = "unsplash-fetch", about = "Get random images from Unsplash!")]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "UNSPLASH_DEBUG")]
    /// Enable debug logging. Env: UNSPLASH_DEBUG
    pub debug: bool,

    #[clap(long, required = true, env = "UNSPLASH_API_KEY", hide_env_values = true)]
    /// Unsplash access key.
    /// Env: UNSPLASH_API_KEY
    pub api_key: String,

    #[clap(long, short, default_value = ".", env = "UNSPLASH_FOLDER")]
    /// Folder to save images in, defaults to the current directory.
    /// Env: UNSPLASH_FOLDER
    pub folder: String,

    #[clap(long, default_value = "")]
    /// Comma separated collection ids
    pub collections: String,

    #[clap(long, default_value = "")]
    /// Comma separated topic ids or slugs
    pub topics: String,

    #[clap(long, default_value = "")]
    /// Only photos from this user
    pub username: String,

    #[clap(long, short, default_value = "")]
    /// Search terms
    pub query: String,

    #[clap(long, short, default_value = DEFAULT_ORIENTATION)]
    /// `landscape`, `portrait` or `squarish`; pass an empty value for any
    pub orientation: String,

    #[clap(long, default_value = "")]
    /// `low` or `high`
    pub content_filter: String,
}
