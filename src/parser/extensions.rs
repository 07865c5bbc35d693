use std::io::BufRead;

use super::pull::{PullParser, XmlEvent};
use crate::error::{GpxError, Result};
use crate::model::Extension;

/// Parse an `<extensions>` container into its top-level extension nodes.
pub(super) fn read_extensions<R: BufRead>(parser: &mut PullParser<R>) -> Result<Vec<Extension>> {
    parser.require_start("extensions")?;
    let mut extensions = Vec::new();

    while parser.next_in_body()? {
        if parser.start_name().is_some() {
            extensions.push(read_extension(parser)?);
        }
    }

    parser.require_end("extensions")?;
    Ok(extensions)
}

/// Parse one arbitrary element and its whole subtree.
///
/// The value is the text that directly follows the start tag. When the element
/// also has children, a whitespace-only value is treated as empty.
fn read_extension<R: BufRead>(parser: &mut PullParser<R>) -> Result<Extension> {
    let start = match parser.current() {
        XmlEvent::StartTag(start) => start.clone(),
        other => return Err(GpxError::unexpected("a start tag", other.describe())),
    };

    let mut value = String::new();
    let mut children = Vec::new();
    let mut first = true;

    loop {
        match parser.next()? {
            XmlEvent::Text(text) => {
                if first {
                    value = text.clone();
                }
            }
            XmlEvent::StartTag(_) => children.push(read_extension(parser)?),
            XmlEvent::EndTag(_) => break,
            XmlEvent::EndDocument => {
                return Err(GpxError::unexpected(
                    format!("</{}>", start.name),
                    "end of document",
                ));
            }
            XmlEvent::StartDocument => {}
        }
        first = false;
    }
    parser.require_end(&start.name)?;

    if !children.is_empty() && value.trim().is_empty() {
        value.clear();
    }

    Ok(Extension::builder(start.name)
        .prefix(start.prefix)
        .namespace(start.namespace)
        .attributes(start.attributes)
        .value(value)
        .children(children)
        .build())
}
