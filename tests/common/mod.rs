//! Shared helpers for the integration tests
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::runtime::Runtime;
use unsplash_fetch::{ClientConfig, RetryConfig, UnsplashClient};
use wiremock::{Mock, MockServer};

pub const API_KEY: &str = "test-access-key";
pub const RANDOM_PATH: &str = "/photos/random";

/// A wiremock server plus the runtime that drives it, usable from plain
/// blocking tests.
pub struct MockApi {
    runtime: Runtime,
    pub server: MockServer,
}

impl MockApi {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build test runtime");
        let server = runtime.block_on(MockServer::start());
        Self { runtime, server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// How many requests hit `path` so far
    pub fn hits(&self, path: &str) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == path)
            .count()
    }

    /// Client settings aimed at this server, with short retry delays
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_api_base(self.uri())
            .with_retry(fast_retry(3))
    }

    pub fn client(&self) -> UnsplashClient {
        UnsplashClient::new(self.config()).expect("build client")
    }

    pub fn image_url(&self, name: &str) -> String {
        format!("{}/images/{name}", self.uri())
    }
}

pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

/// Minimal random photo body pointing `urls.raw` at `raw_url`
pub fn photo_body(id: &str, raw_url: &str) -> Value {
    json!({
        "id": id,
        "urls": {
            "raw": raw_url,
            "full": format!("{raw_url}?fm=jpg"),
        },
        "user": {"username": "tester", "name": "Test Photographer"}
    })
}

/// Fake JPEG bytes, distinct per `seed`
pub fn jpeg_bytes(seed: u8, len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend((0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)));
    bytes.extend([0xFF, 0xD9]);
    bytes
}

/// Serves one response that promises `declared` bytes but sends `sent`
/// and hangs up. Returns the URL to request.
pub fn truncated_image_server(declared: usize, sent: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind truncating server");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {declared}\r\nConnection: close\r\n\r\n"
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&sent);
        let _ = stream.flush();
    });
    format!("http://{addr}/broken.jpg")
}

/// Serves one response that sends its head and `sent` bytes, then goes quiet
/// for `stall` while keeping the connection open. Returns the URL to request.
pub fn stalled_image_server(sent: Vec<u8>, stall: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stalling server");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
            sent.len() * 10
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(&sent);
        let _ = stream.flush();
        std::thread::sleep(stall);
    });
    format!("http://{addr}/stalled.jpg")
}

/// An address nothing listens on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn expected_path(dir: &Path, id: &str) -> PathBuf {
    std::path::absolute(dir)
        .expect("absolute dir")
        .join(format!("{id}.jpg"))
}
