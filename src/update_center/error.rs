use std::fmt;
use std::path::PathBuf;

use semver::Version;
use thiserror::Error;

/// Local filesystem step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateTempDir,
    CreateTempFile,
    ReadManifest,
    ReadConfig,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Stage::CreateTempDir => "create temp directory",
            Stage::CreateTempFile => "create temp file",
            Stage::ReadManifest => "read downloaded manifest",
            Stage::ReadConfig => "read config",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Error)]
pub enum UpdateCenterError {
    #[error("Invalid Jenkins version '{version}': {source}")]
    Parse {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("Can't test Jenkins versions lower than {lowest} (requested {requested})")]
    UnsupportedVersion { requested: Version, lowest: Version },

    #[error("Failed to {stage} at {path:?}: {source}")]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Couldn't download 'update-center.json' from {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: DownloadError,
    },

    #[error("Couldn't extract manifest from {path:?}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl UpdateCenterError {
    /// True for every failure caused by filesystem, network or manifest I/O,
    /// as opposed to a rejected version string.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            UpdateCenterError::Io { .. }
                | UpdateCenterError::Download { .. }
                | UpdateCenterError::Extract { .. }
                | UpdateCenterError::Runtime(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("expected a JSONP envelope with at least 2 lines, found {lines}")]
    MissingPayload { lines: usize },
}
