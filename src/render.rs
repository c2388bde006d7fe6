//! Template rendering for per-icon components and barrel files
//!
//! Rendering is a pure function: identical input always produces
//! byte-identical output. Writing the result to disk is the caller's job.

use std::path::Path;

use crate::models::{Icon, IndexEntry};

/// Render a canonical icon into a self-contained React component source.
///
/// Brand icons default their fill to the upstream accent color; everything
/// else inherits `currentColor`. The icon's title, when present, becomes
/// an SVG `<title>` element.
pub fn icon_component(icon: &Icon) -> String {
    let fill = match &icon.hex {
        Some(hex) => format!("#{}", hex),
        None => "currentColor".to_string(),
    };

    let title = if icon.title.is_empty() {
        String::new()
    } else {
        format!("    <title>{}</title>\n", icon.title)
    };

    let shape = match (&icon.svg_path, &icon.svg_circle) {
        (Some(d), _) => format!("<path d=\"{}\" />", d),
        (None, Some(fragment)) => fragment.clone(),
        // Normalized icons always carry a shape; anything else renders empty.
        (None, None) => String::new(),
    };

    format!(
        "import * as React from \"react\";\n\
         \n\
         const {slug} = (props: React.SVGProps<SVGSVGElement>) => (\n\
         {i}<svg\n\
         {i}{i}xmlns=\"http://www.w3.org/2000/svg\"\n\
         {i}{i}viewBox=\"0 0 24 24\"\n\
         {i}{i}width=\"1em\"\n\
         {i}{i}height=\"1em\"\n\
         {i}{i}fill=\"{fill}\"\n\
         {i}{i}{{...props}}\n\
         {i}>\n\
         {title}{i}{i}{shape}\n\
         {i}</svg>\n\
         );\n\
         \n\
         export default {slug};\n",
        slug = icon.slug,
        fill = fill,
        title = title,
        shape = shape,
        i = "  ",
    )
}

/// Render an ordered list of index entries into a barrel file: one
/// re-export statement per entry, in the given order.
pub fn barrel(entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "export {{ default as {} }} from \"{}\";\n",
            entry.slug,
            module_specifier(&entry.relative_path)
        ));
    }
    out
}

/// Render a relative path as a JS module specifier: forward slashes, and
/// a `./` prefix unless the path already walks upward.
fn module_specifier(path: &Path) -> String {
    let joined = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{}", joined)
    }
}
