//! Per-provider package generation
//!
//! Each generation run is self-contained: fetch the upstream tarball into
//! a run-scoped scratch directory, extract and normalize every record,
//! render component files, then build barrel files from the written tree.
//! The write-all-icons and build-index phases stay separate because the
//! symbol style trees need several index builds at different directory
//! levels after all writes complete.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::extract::{self, ExtractError};
use crate::fetch::{self, FetchError};
use crate::index::{self, IndexError};
use crate::models::Icon;
use crate::normalize::{self, NormalizeError, SlugRegistry};
use crate::render;
use crate::version::{self, VersionError};

/// Upstream npm package for the brand provider.
pub const BRAND_UPSTREAM: &str = "simple-icons";
/// Upstream npm package for the outline provider.
pub const OUTLINE_UPSTREAM: &str = "bootstrap-icons";
/// Symbol style trees, each split into a base and a `filled/` sub-area.
pub const SYMBOL_STYLES: [&str; 3] = ["outlined", "rounded", "sharp"];

/// Upstream npm package for one symbol weight.
pub fn symbol_upstream(weight: u16) -> String {
    format!("@material-symbols/svg-{}", weight)
}

/// Error type for a failed generation run
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Component files written.
    pub icons: usize,
    /// Version stamped into the package manifest.
    pub version: String,
}

/// Generate the brand icon package.
///
/// The package version is pinned to the upstream icon library's resolved
/// version rather than auto-incremented; `upstream_major` optionally caps
/// which upstream release is used.
pub fn generate_brand(root: &Path, upstream_major: Option<u64>) -> Result<Summary, GenerateError> {
    let info = fetch::package_info(BRAND_UPSTREAM)?;
    let upstream_version = info.resolve_version(upstream_major)?;
    let tarball = download_to_scratch(&info, &upstream_version)?;

    let pkg_dir = root.join("brand");
    let icons = write_brand_icons(&pkg_dir, File::open(tarball.path())?)?;
    let version = version::stamp(
        &pkg_dir.join("package.json"),
        Some(&upstream_version.to_string()),
    )?;
    Ok(Summary { icons, version })
}

/// Generate the outline icon package from the latest upstream release.
pub fn generate_outline(root: &Path) -> Result<Summary, GenerateError> {
    let info = fetch::package_info(OUTLINE_UPSTREAM)?;
    let upstream_version = info.latest_version()?;
    let tarball = download_to_scratch(&info, &upstream_version)?;

    let pkg_dir = root.join("outline");
    let icons = write_outline_icons(&pkg_dir, File::open(tarball.path())?)?;
    let version = version::stamp(&pkg_dir.join("package.json"), None)?;
    Ok(Summary { icons, version })
}

/// Generate one symbol icon package for the given weight.
pub fn generate_symbol(root: &Path, weight: u16) -> Result<Summary, GenerateError> {
    let info = fetch::package_info(&symbol_upstream(weight))?;
    let upstream_version = info.latest_version()?;
    let tarball = download_to_scratch(&info, &upstream_version)?;

    let pkg_dir = root.join("symbol").join(weight.to_string());
    let icons = write_symbol_icons(&pkg_dir, File::open(tarball.path())?)?;
    let version = version::stamp(&pkg_dir.join("package.json"), None)?;
    Ok(Summary { icons, version })
}

/// Write the brand package's component files and barrel from a tarball.
pub fn write_brand_icons<R: Read>(pkg_dir: &Path, tgz: R) -> Result<usize, GenerateError> {
    let src_dir = pkg_dir.join("src");
    let icons_dir = reset_icons_dir(&src_dir)?;

    let mut registry = SlugRegistry::new();
    let records = extract::brand_records(tgz)?;
    for record in &records {
        let icon = normalize::brand_icon(record);
        write_component(&icons_dir, &icon, &mut registry)?;
    }

    index::build_index(&src_dir, &icons_dir)?;
    Ok(records.len())
}

/// Write the outline package's component files and barrel from a tarball.
pub fn write_outline_icons<R: Read>(pkg_dir: &Path, tgz: R) -> Result<usize, GenerateError> {
    let src_dir = pkg_dir.join("src");
    let icons_dir = reset_icons_dir(&src_dir)?;

    let mut registry = SlugRegistry::new();
    let records = extract::outline_entries(tgz)?;
    for record in &records {
        let icon = normalize::outline_icon(record)?;
        write_component(&icons_dir, &icon, &mut registry)?;
    }

    index::build_index(&src_dir, &icons_dir)?;
    Ok(records.len())
}

/// Write one symbol package's component files and barrels from a tarball.
///
/// Components land under `src/icons/<style>[/filled]/`; after all writes,
/// each populated style sub-tree gets its own in-place barrel.
pub fn write_symbol_icons<R: Read>(pkg_dir: &Path, tgz: R) -> Result<usize, GenerateError> {
    let src_dir = pkg_dir.join("src");
    let icons_dir = reset_icons_dir(&src_dir)?;

    let mut registry = SlugRegistry::new();
    let records = extract::symbol_entries(tgz)?;
    for record in &records {
        let (icon, location) = normalize::symbol_icon(record)?;
        write_component(&icons_dir.join(location), &icon, &mut registry)?;
    }

    for style in SYMBOL_STYLES {
        for sub in [PathBuf::from(style), Path::new(style).join("filled")] {
            let dir = icons_dir.join(sub);
            if dir.is_dir() {
                index::build_index(&dir, &dir)?;
            }
        }
    }
    Ok(records.len())
}

/// Download a resolved upstream tarball into a run-scoped scratch file.
/// The scratch directory is removed when the returned handle drops,
/// success or failure.
fn download_to_scratch(
    info: &fetch::PackageInfo,
    version: &semver::Version,
) -> Result<ScratchTarball, GenerateError> {
    let scratch = tempfile::tempdir()?;
    let path = scratch.path().join("upstream.tgz");
    fs::write(&path, fetch::download_tarball(info, version)?)?;
    Ok(ScratchTarball { _scratch: scratch, path })
}

struct ScratchTarball {
    _scratch: tempfile::TempDir,
    path: PathBuf,
}

impl ScratchTarball {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Remove any previously generated icons directory and recreate it empty.
fn reset_icons_dir(src_dir: &Path) -> Result<PathBuf, GenerateError> {
    let icons_dir = src_dir.join("icons");
    match fs::remove_dir_all(&icons_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(&icons_dir)?;
    Ok(icons_dir)
}

/// Claim the icon's slug for its directory, then render and write its
/// component file.
fn write_component(
    dir: &Path,
    icon: &Icon,
    registry: &mut SlugRegistry,
) -> Result<(), GenerateError> {
    registry.claim(dir, &icon.slug)?;
    fs::create_dir_all(dir)?;
    fs::write(
        dir.join(format!("{}.tsx", icon.slug)),
        render::icon_component(icon),
    )?;
    Ok(())
}
