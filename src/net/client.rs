//! HTTP client for the page and its image.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client, Response};

use crate::error::{Error, Result};
use crate::output::progress::{create_fetch_spinner, create_image_bar};

/// Minimum image size to show a progress bar (2 MB).
const PROGRESS_THRESHOLD: u64 = 2 * 1024 * 1024;

/// Retrieves text and bytes by URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a page as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a binary payload.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// `reqwest`-backed fetcher.
pub struct HttpFetcher {
    client: Client,
    show_progress: bool,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher.
    pub fn new(user_agent: &str, show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    /// GET a URL, treating any non-success status as an error.
    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        // Turns 4xx/5xx into Error::Http
        Ok(response.error_for_status()?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let spinner = self
            .show_progress
            .then(|| create_fetch_spinner(url));

        let result = self.get_text(url).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let text = result?;
        tracing::debug!("Page length: {} bytes", text.len());
        Ok(text)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;

        let content_length = response.content_length();
        let progress = if self.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
        {
            Some(create_image_bar(url, content_length.unwrap_or(0)))
        } else {
            None
        };

        let mut bytes = Vec::with_capacity(content_length.unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            bytes.extend_from_slice(&chunk);

            if let Some(ref pb) = progress {
                pb.set_position(bytes.len() as u64);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        tracing::debug!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}
