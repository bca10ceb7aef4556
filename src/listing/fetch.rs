use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::FetchError;

pub const USER_AGENT: &str = concat!("arxiv-scrape/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw listing content. Implementations hold no shared state.
pub trait Fetcher {
    async fn fetch(&self, target: &str) -> Result<String, FetchError>;
}

/// Static HTTP fetch; only `200 OK` counts as success.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await.map_err(|e| transport(url, e))?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status { url: url.to_string(), status_code: status.as_u16() });
        }
        resp.text().await.map_err(|e| transport(url, e))
    }
}

fn transport(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Transport { url: url.to_string(), source }
}

/// Reads a page saved earlier, e.g. a browser-rendered dump.
pub struct FileFetcher;

impl Fetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Read { path: PathBuf::from(path), source })
    }
}

pub enum Source {
    Http(HttpFetcher),
    File(FileFetcher),
}

impl Fetcher for Source {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        match self {
            Source::Http(f) => f.fetch(target).await,
            Source::File(f) => f.fetch(target).await,
        }
    }
}
