use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::update_center::error::{Stage, UpdateCenterError};

// =============================================================================
// Update center constants
// =============================================================================

/// Default mirror hosting the per-LTS-line update-center manifests
pub const DEFAULT_BASE_URL: &str = "https://ftp-chi.osuosl.org";

/// Environment variable overriding the default temporary directory
pub const TEMP_DIR_ENV: &str = "JENKINS_UPDATE_CENTER_TMP";

/// Name of the directory created under the system temp location
const TEMP_DIR_NAME: &str = "jenkins-update-center";

/// Update center configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCenterConfig {
    /// Directory the downloaded manifests are written to.
    /// Falls back to [`default_temp_dir`] when unset.
    pub temp_dir: Option<PathBuf>,
    /// Mirror root; manifests live under `/pub/jenkins/updates/`
    pub base_url: String,
    /// Leave the downloaded file on disk instead of removing it after extraction
    pub keep_downloads: bool,
}

impl Default for UpdateCenterConfig {
    fn default() -> Self {
        Self {
            temp_dir: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            keep_downloads: false,
        }
    }
}

impl UpdateCenterConfig {
    /// Loads a configuration from a JSON file. Missing fields use their defaults.
    pub fn from_file(path: &Path) -> Result<Self, UpdateCenterError> {
        let text = std::fs::read_to_string(path).map_err(|source| UpdateCenterError::Io {
            stage: Stage::ReadConfig,
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| UpdateCenterError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the configured temp directory, or the process-wide default.
    pub fn resolved_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(default_temp_dir)
    }
}

/// Returns the default directory for downloaded manifests.
/// Uses $JENKINS_UPDATE_CENTER_TMP if set,
/// otherwise `<system temp>/jenkins-update-center`.
pub fn default_temp_dir() -> PathBuf {
    temp_dir_with_env(std::env::var(TEMP_DIR_ENV).ok(), std::env::temp_dir())
}

fn temp_dir_with_env(override_dir: Option<String>, system_temp: PathBuf) -> PathBuf {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| system_temp.join(TEMP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<UpdateCenterConfig>(json!({
            "keepDownloads": true
        }))
        .unwrap();

        assert!(result.keep_downloads);
        assert_eq!(result.base_url, DEFAULT_BASE_URL);
        assert_eq!(result.temp_dir, None);
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<UpdateCenterConfig>(json!({
            "tempDir": "/var/tmp/uc",
            "baseUrl": "http://mirror.local",
            "keepDownloads": false
        }))
        .unwrap();

        assert_eq!(
            result,
            UpdateCenterConfig {
                temp_dir: Some(PathBuf::from("/var/tmp/uc")),
                base_url: "http://mirror.local".to_string(),
                keep_downloads: false,
            }
        );
    }

    #[test]
    fn from_file_reads_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "baseUrl": "http://localhost:1234" }"#).unwrap();

        let config = UpdateCenterConfig::from_file(&path).unwrap();

        assert_eq!(config.base_url, "http://localhost:1234");
        assert!(!config.keep_downloads);
    }

    #[test]
    fn from_file_reports_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = UpdateCenterConfig::from_file(&path);

        assert!(matches!(result, Err(UpdateCenterError::Config { .. })));
    }

    #[test]
    fn from_file_reports_missing_file_as_io() {
        let dir = TempDir::new().unwrap();

        let result = UpdateCenterConfig::from_file(&dir.path().join("missing.json"));

        assert!(result.unwrap_err().is_io());
    }

    #[test]
    fn resolved_temp_dir_prefers_explicit_setting() {
        let config = UpdateCenterConfig {
            temp_dir: Some(PathBuf::from("/custom")),
            ..Default::default()
        };

        assert_eq!(config.resolved_temp_dir(), PathBuf::from("/custom"));
    }

    #[test]
    fn temp_dir_with_env_uses_override_when_set() {
        let path = temp_dir_with_env(Some("/tmp/override".to_string()), PathBuf::from("/tmp"));

        assert_eq!(path, PathBuf::from("/tmp/override"));
    }

    #[test]
    fn temp_dir_with_env_ignores_empty_override() {
        let path = temp_dir_with_env(Some(String::new()), PathBuf::from("/tmp"));

        assert_eq!(path, PathBuf::from("/tmp/jenkins-update-center"));
    }

    #[test]
    fn temp_dir_with_env_falls_back_to_system_temp() {
        let path = temp_dir_with_env(None, PathBuf::from("/tmp"));

        assert_eq!(path, PathBuf::from("/tmp/jenkins-update-center"));
    }

    #[test]
    #[serial]
    fn default_temp_dir_reads_environment() {
        // SAFETY: serialized with other env-mutating tests
        unsafe { std::env::set_var(TEMP_DIR_ENV, "/tmp/from-env") };
        let path = default_temp_dir();
        unsafe { std::env::remove_var(TEMP_DIR_ENV) };

        assert_eq!(path, PathBuf::from("/tmp/from-env"));
    }
}
