//! Package version stamping
//!
//! Generated packages track upstream releases additively, so the default
//! cadence is a minor bump over the highest published version. The brand
//! package instead pins its version to the upstream icon library's, which
//! is why an explicit override exists.

use semver::Version;
use std::path::Path;
use thiserror::Error;

use crate::fetch::{self, FetchError};

/// Version assigned to a package that has never been published.
const BASELINE_VERSION: &str = "1.0.0";

/// Error type for version stamping failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VersionError {
    /// Registry query failed (other than "never published")
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Manifest could not be read or written
    #[error("failed to update manifest: {0}")]
    Io(#[from] std::io::Error),
    /// Manifest is not valid JSON
    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// Manifest has no `name` field to query the registry with
    #[error("manifest '{}' has no package name", .0.display())]
    MissingName(std::path::PathBuf),
    /// Manifest is valid JSON but not an object
    #[error("manifest '{}' is not a JSON object", .0.display())]
    NotAnObject(std::path::PathBuf),
}

/// Compute the next version from a published version list: highest
/// version by semver order, minor bumped, patch reset. An empty list
/// yields the baseline.
pub fn next_version(published: &[Version]) -> Version {
    match published.iter().max() {
        Some(v) => Version::new(v.major, v.minor + 1, 0),
        None => Version::new(1, 0, 0),
    }
}

/// Rewrite a package manifest's `version` field.
///
/// An explicit version is written verbatim. Otherwise the registry is
/// queried for the manifest's package name; a never-published package
/// gets the baseline version, anything else gets a minor bump over the
/// highest published version. Returns the version written.
pub fn stamp(manifest: &Path, explicit: Option<&str>) -> Result<String, VersionError> {
    let version = match explicit {
        Some(v) => v.to_string(),
        None => {
            let name = package_name(manifest)?;
            match fetch::package_info(&name) {
                Ok(info) => next_version(&info.published_versions()).to_string(),
                Err(FetchError::NotFound(_)) => BASELINE_VERSION.to_string(),
                Err(e) => return Err(e.into()),
            }
        }
    };
    write_version(manifest, &version)?;
    Ok(version)
}

fn package_name(manifest: &Path) -> Result<String, VersionError> {
    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(manifest)?)?;
    value
        .get("name")
        .and_then(|n| n.as_str())
        .map(str::to_string)
        .ok_or_else(|| VersionError::MissingName(manifest.to_path_buf()))
}

fn write_version(manifest: &Path, version: &str) -> Result<(), VersionError> {
    let mut value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(manifest)?)?;
    value
        .as_object_mut()
        .ok_or_else(|| VersionError::NotAnObject(manifest.to_path_buf()))?
        .insert(
            "version".to_string(),
            serde_json::Value::String(version.to_string()),
        );
    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    std::fs::write(manifest, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(raw: &[&str]) -> Vec<Version> {
        raw.iter().map(|v| Version::parse(v).unwrap()).collect()
    }

    #[test]
    fn test_next_version_minor_bump_patch_reset() {
        assert_eq!(
            next_version(&versions(&["1.0.0", "1.2.0"])),
            Version::new(1, 3, 0)
        );
        assert_eq!(
            next_version(&versions(&["2.4.7"])),
            Version::new(2, 5, 0)
        );
    }

    #[test]
    fn test_next_version_orders_by_semver_not_lexicographic() {
        assert_eq!(
            next_version(&versions(&["1.10.0", "1.9.0"])),
            Version::new(1, 11, 0)
        );
    }

    #[test]
    fn test_next_version_baseline() {
        assert_eq!(next_version(&[]), Version::new(1, 0, 0));
    }

    #[test]
    fn test_stamp_explicit_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("package.json");
        std::fs::write(&manifest, r#"{"name": "@fixture/icons", "version": "0.0.0"}"#).unwrap();

        let written = stamp(&manifest, Some("5.2.1")).unwrap();
        assert_eq!(written, "5.2.1");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(value["version"], "5.2.1");
        assert_eq!(value["name"], "@fixture/icons");
    }
}
