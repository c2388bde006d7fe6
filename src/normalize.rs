//! Provider-specific mapping of raw records into canonical icons
//!
//! Each provider gets its own slug prefix and its own extraction rule for
//! vector data. Slugs must be unique within one output directory; the same
//! slug may legally recur across symbol style/filled trees because those
//! are two renderings of the same logical icon.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::extract::{BrandRecord, RawIcon};
use crate::models::{Icon, Provider};
use crate::svg::{self, SvgError};

/// Error type for normalization failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormalizeError {
    /// Markup could not be probed
    #[error(transparent)]
    Svg(#[from] SvgError),
    /// Record yields neither a path nor a circle
    #[error("icon '{0}' has no renderable path or circle")]
    NoRenderableShape(String),
    /// Two icons destined for the same directory share a slug
    #[error("duplicate slug '{slug}' in '{location}'", location = .location.display())]
    DuplicateSlug { slug: String, location: PathBuf },
    /// Archive entry path has no usable file stem
    #[error("entry '{}' has no file stem", .0.display())]
    MissingStem(PathBuf),
}

/// Convert a raw upstream name to PascalCase.
///
/// Segments split on hyphens, underscores, and digit-to-letter
/// transitions; the first letter of each segment is uppercased and the
/// rest passes through unchanged. Stable: identical input always yields
/// an identical slug.
pub fn pascal_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut boundary = true;
    let mut prev_digit = false;
    for c in raw.chars() {
        if c == '-' || c == '_' {
            boundary = true;
            prev_digit = false;
            continue;
        }
        if boundary || (prev_digit && c.is_alphabetic()) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        boundary = false;
        prev_digit = c.is_ascii_digit();
    }
    out
}

fn file_stem(path: &Path) -> Result<&str, NormalizeError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| NormalizeError::MissingStem(path.to_path_buf()))
}

/// Map a brand record to a canonical icon. Fields are structured upstream,
/// so this is a near-1:1 copy plus the slug prefix.
pub fn brand_icon(record: &BrandRecord) -> Icon {
    Icon {
        slug: format!("{}{}", Provider::Brand.slug_prefix(), pascal_case(&record.slug)),
        title: record.title.clone(),
        svg_path: Some(record.path.clone()),
        svg_circle: None,
        hex: Some(record.hex.clone()),
    }
}

/// Map an outline record to a canonical icon: `<path>` data first, falling
/// back to a bare `<circle>` fragment for the few icons shipped that way.
pub fn outline_icon(raw: &RawIcon) -> Result<Icon, NormalizeError> {
    let stem = file_stem(&raw.path)?;
    let slug = format!("{}{}", Provider::Outline.slug_prefix(), pascal_case(stem));

    let svg_path = svg::path_data(&raw.markup)?;
    let svg_circle = match svg_path {
        Some(_) => None,
        None => svg::circle_markup(&raw.markup)?,
    };
    if svg_path.is_none() && svg_circle.is_none() {
        return Err(NormalizeError::NoRenderableShape(slug));
    }

    Ok(Icon {
        slug,
        title: String::new(),
        svg_path,
        svg_circle,
        hex: None,
    })
}

/// Map a symbol record to a canonical icon plus its output sub-directory.
///
/// The `-fill` stem suffix selects the `filled/` sub-area of the entry's
/// style tree; the slug itself never encodes style or fill, so the same
/// slug recurs across trees.
pub fn symbol_icon(raw: &RawIcon) -> Result<(Icon, PathBuf), NormalizeError> {
    let stem = file_stem(&raw.path)?;
    let filled = stem.ends_with("-fill");
    let base = stem.strip_suffix("-fill").unwrap_or(stem);
    let slug = format!("{}{}", Provider::Symbol.slug_prefix(), pascal_case(base));

    let svg_path = svg::path_data(&raw.markup)?
        .ok_or_else(|| NormalizeError::NoRenderableShape(slug.clone()))?;

    let style_tree = raw.path.parent().unwrap_or(Path::new(""));
    let location = if filled {
        style_tree.join("filled")
    } else {
        style_tree.to_path_buf()
    };

    let icon = Icon {
        slug,
        title: String::new(),
        svg_path: Some(svg_path),
        svg_circle: None,
        hex: None,
    };
    Ok((icon, location))
}

/// Tracks claimed slugs per output directory. Cross-directory reuse is
/// allowed; reuse within one directory is fatal.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashSet<(PathBuf, String)>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a slug for a directory, failing on a same-location duplicate.
    pub fn claim(&mut self, location: &Path, slug: &str) -> Result<(), NormalizeError> {
        if !self.seen.insert((location.to_path_buf(), slug.to_string())) {
            return Err(NormalizeError::DuplicateSlug {
                slug: slug.to_string(),
                location: location.to_path_buf(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_simple() {
        assert_eq!(pascal_case("github"), "Github");
        assert_eq!(pascal_case("alarm-clock"), "AlarmClock");
        assert_eq!(pascal_case("type_bold"), "TypeBold");
    }

    #[test]
    fn test_pascal_case_digit_boundaries() {
        assert_eq!(pascal_case("arrow-90deg-down"), "Arrow90DegDown");
        assert_eq!(pascal_case("badge-3d"), "Badge3D");
        assert_eq!(pascal_case("type-h1"), "TypeH1");
    }

    #[test]
    fn test_pascal_case_is_stable() {
        for _ in 0..3 {
            assert_eq!(pascal_case("filter-square-fill"), "FilterSquareFill");
        }
    }

    #[test]
    fn test_brand_icon_mapping() {
        let record = BrandRecord {
            title: "GitHub".to_string(),
            slug: "github".to_string(),
            hex: "181717".to_string(),
            path: "M12 0C5.37".to_string(),
        };
        let icon = brand_icon(&record);
        assert_eq!(icon.slug, "BrandGithub");
        assert_eq!(icon.hex.as_deref(), Some("181717"));
        assert_eq!(icon.svg_path.as_deref(), Some("M12 0C5.37"));
    }

    #[test]
    fn test_outline_icon_circle_fallback() {
        let raw = RawIcon {
            path: PathBuf::from("icons/dot.svg"),
            markup: r#"<svg><circle cx="8" cy="8" r="1"/></svg>"#.to_string(),
        };
        let icon = outline_icon(&raw).unwrap();
        assert_eq!(icon.slug, "OutlineDot");
        assert_eq!(icon.svg_path, None);
        assert_eq!(
            icon.svg_circle.as_deref(),
            Some(r#"<circle cx="8" cy="8" r="1"/>"#)
        );
    }

    #[test]
    fn test_outline_icon_without_shape_fails() {
        let raw = RawIcon {
            path: PathBuf::from("icons/ghost.svg"),
            markup: "<svg></svg>".to_string(),
        };
        assert!(matches!(
            outline_icon(&raw).unwrap_err(),
            NormalizeError::NoRenderableShape(slug) if slug == "OutlineGhost"
        ));
    }

    #[test]
    fn test_symbol_icon_filled_variant_shares_slug() {
        let base = RawIcon {
            path: PathBuf::from("outlined/home.svg"),
            markup: r#"<svg><path d="M1 1"/></svg>"#.to_string(),
        };
        let fill = RawIcon {
            path: PathBuf::from("outlined/home-fill.svg"),
            markup: r#"<svg><path d="M2 2"/></svg>"#.to_string(),
        };
        let (base_icon, base_loc) = symbol_icon(&base).unwrap();
        let (fill_icon, fill_loc) = symbol_icon(&fill).unwrap();
        assert_eq!(base_icon.slug, "SymbolHome");
        assert_eq!(fill_icon.slug, "SymbolHome");
        assert_eq!(base_loc, PathBuf::from("outlined"));
        assert_eq!(fill_loc, PathBuf::from("outlined/filled"));
    }

    #[test]
    fn test_slug_registry_same_location_collision() {
        let mut registry = SlugRegistry::new();
        registry.claim(Path::new("outlined"), "SymbolHome").unwrap();
        registry
            .claim(Path::new("outlined/filled"), "SymbolHome")
            .unwrap();
        assert!(matches!(
            registry.claim(Path::new("outlined"), "SymbolHome"),
            Err(NormalizeError::DuplicateSlug { .. })
        ));
    }
}
