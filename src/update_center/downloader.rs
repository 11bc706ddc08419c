//! Downloader trait and its HTTP implementation

use std::path::Path;

#[cfg(test)]
use mockall::automock;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::update_center::error::DownloadError;

/// Trait for copying a remote document into a local file
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    /// Streams the body at `url` into `dest`, truncating any existing content
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of bytes written
    /// * `Err(DownloadError)` - Network failure, non-success status or write failure
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}

/// Downloader backed by a single plain HTTP(S) GET, without retries
#[derive(Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("jenkins-update-center")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Update center returned status {}: {}", status, url);
            return Err(DownloadError::Status(status));
        }

        // Handle is closed when it goes out of scope, on every return path
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {:?}", written, dest);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[tokio::test]
    async fn download_writes_body_to_destination() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/update-center.json")
            .with_status(200)
            .with_body("callback(\n{}\n);")
            .create_async()
            .await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.tmp");

        let written = HttpDownloader::new()
            .download(&format!("{}/update-center.json", server.url()), &dest)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(written, 15);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "callback(\n{}\n);");
    }

    #[tokio::test]
    async fn download_truncates_existing_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/short")
            .with_status(200)
            .with_body("new")
            .create_async()
            .await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.tmp");
        std::fs::write(&dest, "much longer previous content").unwrap();

        HttpDownloader::new()
            .download(&format!("{}/short", server.url()), &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
    }

    #[tokio::test]
    async fn download_returns_status_error_for_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let dir = TempDir::new().unwrap();

        let result = HttpDownloader::new()
            .download(
                &format!("{}/missing", server.url()),
                &dir.path().join("out.tmp"),
            )
            .await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(DownloadError::Status(status)) if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn download_returns_write_error_for_unwritable_destination() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/ok")
            .with_status(200)
            .with_body("body")
            .create_async()
            .await;
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("no-such-dir").join("out.tmp");

        let result = HttpDownloader::new()
            .download(&format!("{}/ok", server.url()), &dest)
            .await;

        assert!(matches!(result, Err(DownloadError::Write(_))));
    }

    #[tokio::test]
    async fn download_returns_network_error_when_unreachable() {
        let dir = TempDir::new().unwrap();

        let result = HttpDownloader::new()
            .download("http://127.0.0.1:1/update-center.json", &dir.path().join("out.tmp"))
            .await;

        assert!(matches!(result, Err(DownloadError::Network(_))));
    }
}
