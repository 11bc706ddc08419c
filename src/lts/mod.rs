//! Jenkins LTS line resolution
//!
//! Maps an arbitrary Jenkins version onto the newest known LTS baseline that
//! is not newer than it. The baseline's `major.minor` pair names the
//! update-center line whose manifest matches that Jenkins version.
//!
//! # Modules
//!
//! - [`baseline`]: The fixed list of supported LTS baselines and resolution
//! - [`floor`]: Floor search over a descending sequence

pub mod baseline;
pub mod floor;

pub use baseline::{LTS_BASELINES, UpdateLine, resolve_update_line, supported_lines};
