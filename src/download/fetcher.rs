//! Media byte fetching.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::api::client::USER_AGENT;
use crate::error::{Error, Result};

/// Source of media file contents.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Stream the body behind a media URL into `sink`, returning the number of
    /// bytes written.
    async fn fetch_into(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64>;
}

/// Plain HTTP fetcher; media URLs are pre-signed and need no session.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn fetch_into(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        Ok(written)
    }
}
