use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;

use super::parse_directory;
use crate::config::DirectoryLocation;
use crate::error::{DirectoryError, Result};
use crate::models::Practitioner;

/// Somewhere a directory snapshot can be fetched from, once.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Human-readable origin for logs and health output.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Practitioner>>;
}

/// `GET` of a JSON array over HTTP. No retries, no timeout.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DirectorySource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<Practitioner>> {
        tracing::debug!(url = %self.url, "Fetching practitioner directory");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_directory(&body)
    }
}

/// JSON array read from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DirectorySource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Practitioner>> {
        tracing::debug!(path = %self.path.display(), "Reading practitioner directory");
        let body = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading directory file {}", self.path.display()))?;
        parse_directory(&body)
    }
}

/// Fixed, already-decoded records.
pub struct StaticSource {
    practitioners: Vec<Practitioner>,
}

impl StaticSource {
    pub fn new(practitioners: Vec<Practitioner>) -> Self {
        Self { practitioners }
    }
}

#[async_trait]
impl DirectorySource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn fetch(&self) -> Result<Vec<Practitioner>> {
        Ok(self.practitioners.clone())
    }
}

pub fn source_for(location: &DirectoryLocation) -> Box<dyn DirectorySource> {
    match location {
        DirectoryLocation::Url(url) => Box::new(HttpSource::new(url.clone())),
        DirectoryLocation::File(path) => Box::new(FileSource::new(path.clone())),
    }
}
