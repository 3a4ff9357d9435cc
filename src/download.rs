//! Streams an image to disk and promotes it atomically.
//!
//! Bytes land in a hidden `.part` file next to the destination and are only
//! renamed to `{stem}.jpg` once the whole body has been written and synced.
//! Any failure drops the temporary file, so the final name is either absent
//! or complete.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

use crate::constants::{IMAGE_EXTENSION, PARTIAL_SUFFIX};
use crate::error::DownloadError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Downloads `source_url` into `destination_dir` as `{stem}.jpg`.
///
/// Returns the absolute path of the saved file. An existing file with the
/// same name is replaced.
pub fn download(
    http: &Client,
    timeout: Duration,
    source_url: &str,
    destination_dir: &Path,
    stem: &str,
) -> Result<PathBuf, DownloadError> {
    let destination_dir = usable_directory(destination_dir)?;
    let final_path = destination_dir.join(format!("{stem}.{IMAGE_EXTENSION}"));

    let mut partial = Builder::new()
        .prefix(&format!(".{stem}."))
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(&destination_dir)
        .map_err(|err| DownloadError::DirectoryUnavailable {
            path: destination_dir.clone(),
            reason: format!("cannot create a file in it: {err}"),
        })?;
    debug!(temp = %partial.path().display(), url = source_url, "Downloading image");

    let mut response = http
        .get(source_url)
        .timeout(timeout)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|err| DownloadError::Network(err.to_string()))?;

    let written = copy_body(&mut response, &mut partial)?;
    partial.as_file_mut().sync_all()?;

    promote(partial, &final_path)?;
    debug!(bytes = written, path = %final_path.display(), "Image saved");
    Ok(final_path)
}

/// Resolves `dir` to an absolute path and checks it is a directory.
fn usable_directory(dir: &Path) -> Result<PathBuf, DownloadError> {
    let unavailable = |reason: String| DownloadError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason,
    };
    let metadata = fs::metadata(dir).map_err(|err| unavailable(err.to_string()))?;
    if !metadata.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }
    std::path::absolute(dir).map_err(|err| unavailable(err.to_string()))
}

/// Copies the body chunk by chunk, keeping read and write failures apart.
fn copy_body(body: &mut impl Read, partial: &mut NamedTempFile) -> Result<u64, DownloadError> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut written: u64 = 0;
    loop {
        let read = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(bytes = written, error = %err, "Image stream interrupted");
                return Err(DownloadError::Network(err.to_string()));
            }
        };
        partial.write_all(&buffer[..read])?;
        written += read as u64;
    }
    partial.flush()?;
    Ok(written)
}

fn promote(partial: NamedTempFile, final_path: &Path) -> Result<(), DownloadError> {
    partial
        .persist(final_path)
        .map(|_| ())
        .map_err(|err| DownloadError::Io(err.error))
}
