use std::fmt;

use semver::Version;

use crate::lts::floor::floor;
use crate::update_center::error::UpdateCenterError;

/// Known LTS baselines, newest first. The last entry is the oldest supported version.
pub const LTS_BASELINES: [Version; 5] = [
    Version::new(2, 107, 0),
    Version::new(2, 89, 0),
    Version::new(2, 73, 0),
    Version::new(2, 60, 0),
    Version::new(2, 46, 0),
];

/// `major.minor` identifier of an update-center release line, e.g. `2.107`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateLine {
    pub major: u64,
    pub minor: u64,
}

impl From<&Version> for UpdateLine {
    fn from(version: &Version) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
        }
    }
}

impl fmt::Display for UpdateLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Resolve a Jenkins version to the update line of the newest LTS baseline
/// that is less than or equal to it.
///
/// Examples:
/// - "2.107.0" -> 2.107
/// - "2.150.3-rc1" -> 2.107
/// - "2.100.1" -> 2.89
/// - "2.45.0" -> UnsupportedVersion
pub fn resolve_update_line(requested: &str) -> Result<UpdateLine, UpdateCenterError> {
    let version = Version::parse(requested).map_err(|source| UpdateCenterError::Parse {
        version: requested.to_string(),
        source,
    })?;

    floor(&LTS_BASELINES, &version)
        .map(UpdateLine::from)
        .ok_or_else(|| UpdateCenterError::UnsupportedVersion {
            lowest: lowest_baseline(),
            requested: version,
        })
}

/// All supported update lines, newest first
pub fn supported_lines() -> Vec<UpdateLine> {
    LTS_BASELINES.iter().map(UpdateLine::from).collect()
}

fn lowest_baseline() -> Version {
    LTS_BASELINES[LTS_BASELINES.len() - 1].clone()
}
