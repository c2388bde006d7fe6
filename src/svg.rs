//! SVG markup probing for the normalizer
//!
//! Upstream icons are either a single `<path>` (the common case) or, for a
//! handful of outline icons, a bare `<circle>`. This module pulls out the
//! first of either; it does not interpret path data.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Error type for markup probing failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SvgError {
    /// Markup is not well-formed XML
    #[error("malformed SVG markup: {0}")]
    Parse(#[from] quick_xml::Error),
    /// An element carries a malformed attribute
    #[error("malformed SVG attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    /// Markup is not valid UTF-8
    #[error("SVG markup is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Extract the `d` attribute of the first `<path>` element.
///
/// Returns `Ok(None)` when the markup is well-formed but contains no
/// `<path>`; malformed markup is a hard error.
pub fn path_data(markup: &str) -> Result<Option<String>, SvgError> {
    let mut reader = Reader::from_str(markup);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"path" => {
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.as_ref() == b"d" {
                        return Ok(Some(attr.unescape_value()?.into_owned()));
                    }
                }
                return Ok(None);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Extract the first `<circle>` element as a self-closing markup fragment,
/// attributes preserved in document order.
pub fn circle_markup(markup: &str) -> Result<Option<String>, SvgError> {
    let mut reader = Reader::from_str(markup);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"circle" => {
                return Ok(Some(serialize_self_closing(&e)?));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn serialize_self_closing(element: &BytesStart<'_>) -> Result<String, SvgError> {
    let mut out = String::from("<circle");
    for attr in element.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&value);
        out.push('"');
    }
    out.push_str("/>");
    Ok(out)
}
