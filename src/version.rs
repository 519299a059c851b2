//! Schema version history.
//!
//! Each translator upgrades documents by exactly one step of [`KNOWN_VERSIONS`]. Callers
//! walking an old document up to the current schema use [`upgrade_path`] to find the
//! steps they need.

/// Every on-disk schema version, oldest first.
pub const KNOWN_VERSIONS: &[&str] = &[
    "0.3.0", "0.3.1", "0.5.0", "0.6.0", "0.7.0", "0.8.0", "0.8.1", "0.9.0", "0.9.1", "0.9.3",
    "0.9.4", "0.9.5", "1.0.0", "1.0.1", "1.0.2", "1.0.3", "1.0.4", "1.0.5",
];

/// The schema version this crate translates from.
pub const SOURCE_VERSION: &str = "1.0.2";

/// The schema version this crate translates to. Every translated root carries it.
pub const TARGET_VERSION: &str = "1.0.3";

/// The version directly after `version`, if there is one.
pub fn next_version(version: &str) -> Option<&'static str> {
    let index = KNOWN_VERSIONS.iter().position(|v| *v == version)?;
    KNOWN_VERSIONS.get(index + 1).copied()
}

/// The ordered list of versions a document passes through going from `from` to `to`,
/// excluding `from` and including `to`.
///
/// Returns `None` if either version is unknown or `to` is older than `from`.
pub fn upgrade_path(from: &str, to: &str) -> Option<Vec<&'static str>> {
    let start = KNOWN_VERSIONS.iter().position(|v| *v == from)?;
    let end = KNOWN_VERSIONS.iter().position(|v| *v == to)?;
    if end < start {
        return None;
    }
    Some(KNOWN_VERSIONS[start + 1..=end].to_vec())
}

/// Whether this crate can translate documents tagged with `version`.
pub fn is_supported_source(version: &str) -> bool {
    version == SOURCE_VERSION
}
