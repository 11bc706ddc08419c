//! Fetches the Jenkins plugin update-center manifest matching a Jenkins version.
//!
//! A requested version is mapped to the newest supported LTS baseline not
//! newer than it, and that line's `update-center.json` is downloaded and
//! returned without its JSONP wrapper.
//!
//! ```no_run
//! use jenkins_update_center::UpdateCenter;
//!
//! # async fn run() -> Result<(), jenkins_update_center::UpdateCenterError> {
//! let json = UpdateCenter::default().fetch_manifest_for("2.107.3").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod lts;
pub mod update_center;

pub use config::UpdateCenterConfig;
pub use update_center::UpdateCenter;
pub use update_center::error::UpdateCenterError;
