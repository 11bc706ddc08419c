//! Update-center manifest fetching
//!
//! Resolves a Jenkins version to its LTS update line, downloads that line's
//! `update-center.json` into a temporary file and returns the JSON payload
//! with the JSONP envelope removed.
//!
//! # Modules
//!
//! - [`downloader`]: `Downloader` trait and the `reqwest` implementation
//! - [`envelope`]: JSONP envelope stripping
//! - [`error`]: Error types for resolution, download and extraction

pub mod downloader;
pub mod envelope;
pub mod error;

use std::path::Path;
use std::sync::Arc;

use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::config::UpdateCenterConfig;
use crate::lts::{UpdateLine, resolve_update_line};
use crate::update_center::downloader::{Downloader, HttpDownloader};
use crate::update_center::envelope::strip_jsonp_envelope;
use crate::update_center::error::{Stage, UpdateCenterError};

/// Builds the manifest URL for an update line under `base_url`.
pub fn manifest_url(base_url: &str, line: UpdateLine) -> String {
    format!(
        "{}/pub/jenkins/updates/stable-{}/update-center.json",
        base_url.trim_end_matches('/'),
        line
    )
}

/// Fetches update-center manifests for Jenkins versions
pub struct UpdateCenter {
    config: UpdateCenterConfig,
    downloader: Arc<dyn Downloader>,
}

impl UpdateCenter {
    /// Create an UpdateCenter that downloads over HTTP
    pub fn new(config: UpdateCenterConfig) -> Self {
        Self::with_downloader(config, Arc::new(HttpDownloader::new()))
    }

    /// Create an UpdateCenter writing its downloads under `temp_dir`
    pub fn with_temp_dir(temp_dir: impl AsRef<Path>) -> Self {
        Self::new(UpdateCenterConfig {
            temp_dir: Some(temp_dir.as_ref().to_path_buf()),
            ..Default::default()
        })
    }

    pub fn with_downloader(config: UpdateCenterConfig, downloader: Arc<dyn Downloader>) -> Self {
        Self { config, downloader }
    }

    /// Resolves `jenkins_version` and returns the manifest URL of its update line
    pub fn manifest_url_for(&self, jenkins_version: &str) -> Result<String, UpdateCenterError> {
        let line = resolve_update_line(jenkins_version)?;
        Ok(manifest_url(&self.config.base_url, line))
    }

    /// Downloads the manifest matching `jenkins_version` and returns its JSON payload.
    ///
    /// Performs exactly one request. Every failure is returned as-is; nothing is retried.
    pub async fn fetch_manifest_for(
        &self,
        jenkins_version: &str,
    ) -> Result<String, UpdateCenterError> {
        let url = self.manifest_url_for(jenkins_version)?;
        info!("Jenkins update URL is {}", url);

        let destination = self.create_temp_file().await?;
        self.downloader
            .download(&url, &destination)
            .await
            .map_err(|source| UpdateCenterError::Download {
                url: url.clone(),
                source,
            })?;

        let payload = read_payload(&destination).await;
        self.release_temp_file(destination);
        payload
    }

    /// Synchronous variant of [`UpdateCenter::fetch_manifest_for`].
    ///
    /// Runs on a private current-thread runtime, so it must not be called
    /// from within an async context.
    pub fn fetch_manifest_for_blocking(
        &self,
        jenkins_version: &str,
    ) -> Result<String, UpdateCenterError> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(UpdateCenterError::Runtime)?
            .block_on(self.fetch_manifest_for(jenkins_version))
    }

    async fn create_temp_file(&self) -> Result<TempPath, UpdateCenterError> {
        let temp_dir = self.config.resolved_temp_dir();
        tokio::fs::create_dir_all(&temp_dir)
            .await
            .map_err(|source| UpdateCenterError::Io {
                stage: Stage::CreateTempDir,
                path: temp_dir.clone(),
                source,
            })?;

        let path = tempfile::Builder::new()
            .prefix("update-center-")
            .suffix(".tmp")
            .tempfile_in(&temp_dir)
            .map_err(|source| UpdateCenterError::Io {
                stage: Stage::CreateTempFile,
                path: temp_dir.clone(),
                source,
            })?
            .into_temp_path();

        debug!("Downloading into {:?}", path);
        Ok(path)
    }

    fn release_temp_file(&self, path: TempPath) {
        if self.config.keep_downloads {
            match path.keep() {
                Ok(kept) => info!("Kept downloaded manifest at {:?}", kept),
                Err(e) => warn!("Failed to keep downloaded manifest: {}", e),
            }
        } else {
            let removed_path = path.to_path_buf();
            if let Err(e) = path.close() {
                warn!("Failed to remove temp file {:?}: {}", removed_path, e);
            }
        }
    }
}

impl Default for UpdateCenter {
    fn default() -> Self {
        Self::new(UpdateCenterConfig::default())
    }
}

async fn read_payload(path: &Path) -> Result<String, UpdateCenterError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| UpdateCenterError::Io {
            stage: Stage::ReadManifest,
            path: path.to_path_buf(),
            source,
        })?;

    strip_jsonp_envelope(&text)
        .map(str::to_string)
        .map_err(|source| UpdateCenterError::Extract {
            path: path.to_path_buf(),
            source,
        })
}
