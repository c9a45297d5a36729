//! Version comparison for probed runtimes

use anyhow::Result;
use semver::Version;

/// Oldest Node.js the generated project supports
pub const MIN_NODE_VERSION: &str = "14.0.0";

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present (node prints `v18.17.0`)
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Returns a warning when `found` is older than `minimum`.
/// Versions that cannot be parsed are not compared.
pub fn check_minimum(name: &str, found: &str, minimum: &str) -> Option<String> {
    let found_ver = parse_version(found).ok()?;
    let min_ver = parse_version(minimum).ok()?;

    if found_ver < min_ver {
        Some(format!(
            "{} {} is older than the required {}; generated projects may not run",
            name, found, minimum
        ))
    } else {
        None
    }
}
