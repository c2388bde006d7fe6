//! Barrel-file construction from on-disk generated artifacts
//!
//! The index is derived by re-scanning the output directory rather than
//! from the in-memory icon list, so it can run independently of how the
//! artifacts got there. Nested symbol style trees call this once per
//! directory level after all component writes complete.

use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::models::IndexEntry;
use crate::render;

/// Error type for index building failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IndexError {
    /// Directory scan or file write failed
    #[error("index build failed: {0}")]
    Io(#[from] std::io::Error),
    /// A component file has a non-UTF-8 stem
    #[error("component file '{}' has an unusable name", .0.display())]
    BadFileName(PathBuf),
}

/// Build one barrel file.
///
/// Scans `using` (non-recursively) for rendered `.tsx` components, sorts
/// the entries by slug ascending, and writes `index.ts` into `at`.
/// Idempotent: unchanged inputs produce a byte-identical barrel.
pub fn build_index(at: &Path, using: &Path) -> Result<(), IndexError> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(using)? {
        let path = dir_entry?.path();
        if !path.is_file() || path.extension().map_or(true, |e| e != "tsx") {
            continue;
        }
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| IndexError::BadFileName(path.clone()))?
            .to_string();
        let relative_path = relative_to(&path.with_extension(""), at);
        entries.push(IndexEntry {
            slug,
            relative_path,
        });
    }

    entries.sort_by(|a, b| a.slug.cmp(&b.slug));

    fs::create_dir_all(at)?;
    fs::write(at.join("index.ts"), render::barrel(&entries))?;
    Ok(())
}

/// Compute `target` relative to `base`, walking up with `..` components
/// where the paths diverge. Both paths are assumed to share a root (they
/// always live under one generated package).
fn relative_to(target: &Path, base: &Path) -> PathBuf {
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part);
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_to_descending() {
        assert_eq!(
            relative_to(Path::new("pkg/src/icons/OutlineDot"), Path::new("pkg/src")),
            PathBuf::from("icons/OutlineDot")
        );
    }

    #[test]
    fn test_relative_to_same_directory() {
        assert_eq!(
            relative_to(
                Path::new("pkg/icons/outlined/SymbolHome"),
                Path::new("pkg/icons/outlined")
            ),
            PathBuf::from("SymbolHome")
        );
    }

    #[test]
    fn test_relative_to_walks_up() {
        assert_eq!(
            relative_to(Path::new("pkg/a/Icon"), Path::new("pkg/b/c")),
            PathBuf::from("../../a/Icon")
        );
    }

    #[test]
    fn test_build_index_sorted_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let icons = src.join("icons");
        fs::create_dir_all(&icons).unwrap();
        fs::write(icons.join("OutlineDot.tsx"), "// dot").unwrap();
        fs::write(icons.join("OutlineAlarm.tsx"), "// alarm").unwrap();
        fs::write(icons.join("notes.txt"), "ignored").unwrap();

        build_index(&src, &icons).unwrap();
        let first = fs::read_to_string(src.join("index.ts")).unwrap();
        assert_eq!(
            first,
            "export { default as OutlineAlarm } from \"./icons/OutlineAlarm\";\n\
             export { default as OutlineDot } from \"./icons/OutlineDot\";\n"
        );

        build_index(&src, &icons).unwrap();
        let second = fs::read_to_string(src.join("index.ts")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_index_in_place_ignores_existing_barrel() {
        let dir = tempfile::tempdir().unwrap();
        let outlined = dir.path().join("outlined");
        fs::create_dir_all(&outlined).unwrap();
        fs::write(outlined.join("SymbolHome.tsx"), "// home").unwrap();

        build_index(&outlined, &outlined).unwrap();
        build_index(&outlined, &outlined).unwrap();

        let barrel = fs::read_to_string(outlined.join("index.ts")).unwrap();
        assert_eq!(
            barrel,
            "export { default as SymbolHome } from \"./SymbolHome\";\n"
        );
    }
}
