//! Data models for canonical icons and derived index entries

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The three upstream icon providers, each with its own raw format
/// and slug-prefix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Brand icons: structured JSON payload, one accent color per icon
    Brand,
    /// Outline icons: archive of SVG files under `package/icons/`
    Outline,
    /// Symbol icons: archive of SVG files split into three style trees
    Symbol,
}

impl Provider {
    /// The slug prefix this provider's icons carry.
    pub fn slug_prefix(&self) -> &'static str {
        match self {
            Provider::Brand => "Brand",
            Provider::Outline => "Outline",
            Provider::Symbol => "Symbol",
        }
    }
}

/// The canonical icon entity every provider maps into.
///
/// Exactly one of `svg_path` / `svg_circle` must be populated before
/// rendering; an icon with neither is a normalization failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Icon {
    /// Unique, stable identifier; also the component file stem and the
    /// exported symbol name. Valid TypeScript identifier.
    pub slug: String,
    /// Human-readable display name; empty when the provider has none.
    #[serde(default)]
    pub title: String,
    /// SVG path data (the `d` attribute) for single-path icons.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub svg_path: Option<String>,
    /// Raw markup fragment (e.g. a `<circle/>`) for icons that are not
    /// expressible as a single path.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub svg_circle: Option<String>,
    /// Canonical accent color; brand-icon provenance only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hex: Option<String>,
}

impl Icon {
    /// Whether the icon carries at least one renderable shape.
    pub fn is_renderable(&self) -> bool {
        self.svg_path.is_some() || self.svg_circle.is_some()
    }
}

/// One barrel-file entry, derived from on-disk state at index-build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Component file stem, doubles as the re-exported symbol name.
    pub slug: String,
    /// Path from the barrel file's directory to the component file,
    /// extension stripped.
    pub relative_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_roundtrip() {
        let icon = Icon {
            slug: "BrandGithub".to_string(),
            title: "GitHub".to_string(),
            svg_path: Some("M12 0C5.37...".to_string()),
            svg_circle: None,
            hex: Some("181717".to_string()),
        };
        let json = serde_json::to_string(&icon).unwrap();
        let parsed: Icon = serde_json::from_str(&json).unwrap();
        assert_eq!(icon, parsed);
    }

    #[test]
    fn test_icon_omits_empty_optionals() {
        let icon = Icon {
            slug: "OutlineDot".to_string(),
            title: String::new(),
            svg_path: None,
            svg_circle: Some("<circle cx=\"8\" cy=\"8\" r=\"1\"/>".to_string()),
            hex: None,
        };
        let json = serde_json::to_string(&icon).unwrap();
        assert!(!json.contains("svg_path"));
        assert!(!json.contains("hex"));
    }

    #[test]
    fn test_renderable_requires_path_or_circle() {
        let icon = Icon {
            slug: "SymbolHome".to_string(),
            title: String::new(),
            svg_path: None,
            svg_circle: None,
            hex: None,
        };
        assert!(!icon.is_renderable());
    }

    #[test]
    fn test_provider_prefixes() {
        assert_eq!(Provider::Brand.slug_prefix(), "Brand");
        assert_eq!(Provider::Outline.slug_prefix(), "Outline");
        assert_eq!(Provider::Symbol.slug_prefix(), "Symbol");
    }
}
