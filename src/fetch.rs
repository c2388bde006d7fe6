//! npm registry queries and upstream tarball retrieval
//!
//! All network calls are synchronous and blocking. A failed request or a
//! non-2xx response is fatal for the run; nothing is retried.

use semver::Version;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Base URL of the package registry.
pub const REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Error type for registry and download failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Package has never been published
    #[error("package '{0}' not found in registry")]
    NotFound(String),
    /// Registry returned a non-success status
    #[error("registry returned {status} for '{package}'")]
    Status {
        package: String,
        status: reqwest::StatusCode,
    },
    /// No published version satisfies the requested major-version cap
    #[error("no published version of '{package}' with major <= {major}")]
    NoMatchingVersion { package: String, major: u64 },
    /// Version resolved upstream but missing from the registry document
    #[error("version '{0}' has no registry entry")]
    UnknownVersion(String),
}

/// Registry document for one package: the published version map, each
/// entry carrying its dist tarball URL.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    #[serde(default)]
    pub versions: BTreeMap<String, VersionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    pub dist: Dist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dist {
    pub tarball: String,
}

impl PackageInfo {
    /// Published versions that parse as semver, in ascending order.
    /// Registry keys that are not valid semver are ignored.
    pub fn published_versions(&self) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .versions
            .keys()
            .filter_map(|v| Version::parse(v).ok())
            .collect();
        versions.sort();
        versions
    }

    /// Highest non-prerelease published version.
    pub fn latest_version(&self) -> Result<Version, FetchError> {
        self.published_versions()
            .into_iter()
            .rev()
            .find(|v| v.pre.is_empty())
            .ok_or_else(|| FetchError::NotFound(self.name.clone()))
    }

    /// Highest non-prerelease version, optionally capped at a requested
    /// major version. A cap that matches nothing is fatal.
    pub fn resolve_version(&self, major_cap: Option<u64>) -> Result<Version, FetchError> {
        match major_cap {
            None => self.latest_version(),
            Some(major) => self
                .published_versions()
                .into_iter()
                .rev()
                .find(|v| v.pre.is_empty() && v.major <= major)
                .ok_or_else(|| FetchError::NoMatchingVersion {
                    package: self.name.clone(),
                    major,
                }),
        }
    }
}

/// Fetch the registry document for a package.
///
/// A 404 maps to [`FetchError::NotFound`] so callers can distinguish
/// "never published" from other failures.
pub fn package_info(name: &str) -> Result<PackageInfo, FetchError> {
    let url = format!("{}/{}", REGISTRY_URL, name);
    let response = reqwest::blocking::get(&url)?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(name.to_string()));
    }
    if !response.status().is_success() {
        return Err(FetchError::Status {
            package: name.to_string(),
            status: response.status(),
        });
    }

    Ok(response.json()?)
}

/// Download the `.tgz` tarball for a resolved version of a package.
pub fn download_tarball(info: &PackageInfo, version: &Version) -> Result<Vec<u8>, FetchError> {
    let entry = info
        .versions
        .get(&version.to_string())
        .ok_or_else(|| FetchError::UnknownVersion(version.to_string()))?;

    let response = reqwest::blocking::get(&entry.dist.tarball)?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            package: info.name.clone(),
            status: response.status(),
        });
    }

    Ok(response.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(versions: &[&str]) -> PackageInfo {
        PackageInfo {
            name: "fixture-icons".to_string(),
            versions: versions
                .iter()
                .map(|v| {
                    (
                        v.to_string(),
                        VersionInfo {
                            dist: Dist {
                                tarball: format!("https://example.invalid/{}.tgz", v),
                            },
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_latest_skips_prereleases() {
        let info = info(&["1.0.0", "2.0.0", "3.0.0-beta.1"]);
        assert_eq!(info.latest_version().unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_resolve_with_major_cap() {
        let info = info(&["9.4.0", "10.0.0", "11.2.0"]);
        let resolved = info.resolve_version(Some(10)).unwrap();
        assert_eq!(resolved, Version::new(10, 0, 0));
    }

    #[test]
    fn test_resolve_cap_matching_nothing_is_fatal() {
        let info = info(&["5.0.0"]);
        let err = info.resolve_version(Some(4)).unwrap_err();
        assert!(matches!(err, FetchError::NoMatchingVersion { major: 4, .. }));
    }

    #[test]
    fn test_versions_sorted_by_semver_not_lexicographic() {
        let info = info(&["1.10.0", "1.2.0", "1.9.0"]);
        let versions = info.published_versions();
        assert_eq!(
            versions,
            vec![
                Version::new(1, 2, 0),
                Version::new(1, 9, 0),
                Version::new(1, 10, 0)
            ]
        );
    }
}
