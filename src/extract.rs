//! Raw icon extraction from upstream distributions
//!
//! Each provider ships a different shape of npm tarball:
//! - brand icons carry a structured JSON data file, no markup parsing needed
//! - outline icons are loose SVGs under `package/icons/`
//! - symbol icons are SVGs spread across three parallel style trees
//!
//! Extraction is a pure transformation over already-fetched bytes; it never
//! touches the network.

use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use thiserror::Error;

/// Tarball entry holding the brand-icon data payload.
const BRAND_DATA_ENTRY: &str = "package/_data/simple-icons.json";

/// Error type for extraction failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// Archive could not be read
    #[error("failed to read archive: {0}")]
    Io(#[from] std::io::Error),
    /// Brand data payload is not valid JSON
    #[error("failed to parse brand icon data: {0}")]
    Json(#[from] serde_json::Error),
    /// Brand tarball has no data entry
    #[error("brand tarball is missing '{BRAND_DATA_ENTRY}'")]
    MissingDataEntry,
    /// An SVG entry is not valid UTF-8
    #[error("entry '{}' is not valid UTF-8", .0.display())]
    NonUtf8Entry(PathBuf),
}

/// A raw per-icon record from an archive provider: a path hint plus the
/// entry's markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIcon {
    /// Entry path with the leading `package/` component stripped.
    pub path: PathBuf,
    pub markup: String,
}

/// One brand icon's metadata, straight from the structured payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BrandRecord {
    pub title: String,
    pub slug: String,
    pub hex: String,
    pub path: String,
}

fn open<R: Read>(tgz: R) -> Archive<GzDecoder<R>> {
    Archive::new(GzDecoder::new(tgz))
}

fn read_entry_string<R: Read>(
    entry: &mut tar::Entry<'_, GzDecoder<R>>,
    path: &Path,
) -> Result<String, ExtractError> {
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|_| ExtractError::NonUtf8Entry(path.to_path_buf()))
}

/// Strip the npm `package/` wrapper directory from an entry path.
fn strip_package_root(path: &Path) -> PathBuf {
    path.components().skip(1).collect()
}

/// Extract brand-icon records from the brand provider's tarball.
///
/// The payload is a mapping from export name to icon metadata; records are
/// returned in ascending key order so repeated runs see an identical
/// sequence.
pub fn brand_records<R: Read>(tgz: R) -> Result<Vec<BrandRecord>, ExtractError> {
    let mut archive = open(tgz);
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.path()? == Path::new(BRAND_DATA_ENTRY) {
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            let records: BTreeMap<String, BrandRecord> = serde_json::from_slice(&bytes)?;
            return Ok(records.into_values().collect());
        }
    }
    Err(ExtractError::MissingDataEntry)
}

/// Extract outline-icon records: only entries under `package/icons/` are
/// relevant, everything else is skipped without error.
pub fn outline_entries<R: Read>(tgz: R) -> Result<Vec<RawIcon>, ExtractError> {
    let mut archive = open(tgz);
    let mut records = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let mut components = path.components();
        let under_icons = components.next().map_or(false, |c| c.as_os_str() == "package")
            && components.next().map_or(false, |c| c.as_os_str() == "icons");
        if !under_icons || path.extension().map_or(true, |e| e != "svg") {
            continue;
        }
        let markup = read_entry_string(&mut entry, &path)?;
        records.push(RawIcon {
            path: strip_package_root(&path),
            markup,
        });
    }
    Ok(records)
}

/// Extract symbol-icon records: every `.svg` entry is relevant; the style
/// tree (outlined/rounded/sharp) and `-fill` variant stay encoded in the
/// returned path for the normalizer to classify.
pub fn symbol_entries<R: Read>(tgz: R) -> Result<Vec<RawIcon>, ExtractError> {
    let mut archive = open(tgz);
    let mut records = Vec::new();
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        if path.extension().map_or(true, |e| e != "svg") {
            continue;
        }
        let markup = read_entry_string(&mut entry, &path)?;
        records.push(RawIcon {
            path: strip_package_root(&path),
            markup,
        });
    }
    Ok(records)
}
