//! Concrete versions.

use crate::{VersionError, VersionResult};
use metaed_model::MetaEdEnvironment;
use semver::Version;

/// Parse a version, accepting a leading `v` and missing minor or patch numbers.
pub fn parse_version(text: &str) -> VersionResult<Version> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (numbers, suffix) = trimmed.split_at(split);

    let parts = numbers.split('.').count();
    let padded = match parts {
        1 => format!("{}.0.0{}", numbers, suffix),
        2 => format!("{}.0{}", numbers, suffix),
        _ => trimmed.to_string(),
    };
    Version::parse(&padded).map_err(|e| VersionError::invalid_version(text, e.to_string()))
}

/// Render a version, optionally without its pre-release segment.
pub fn format_version_with_suppress_prerelease(version: &Version, suppress: bool) -> String {
    if suppress {
        format!("{}.{}.{}", version.major, version.minor, version.patch)
    } else {
        version.to_string()
    }
}

/// The version a plugin targets, or 0.0.0 for a plugin without a record.
pub fn target_technology_version_for(env: &MetaEdEnvironment, short_name: &str) -> Version {
    env.plugin_environment(short_name)
        .map(|plugin| plugin.target_technology_version.clone())
        .unwrap_or_else(|| Version::new(0, 0, 0))
}
