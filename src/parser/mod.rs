//! GPX reader built on a namespace-aware quick-xml pull parser.
//!
//! Parsing is lenient about content it does not model: unknown elements are
//! skipped with their whole subtree, and so are comments and processing
//! instructions. Structural problems (mismatched tags, missing required
//! attributes, unparsable numbers or timestamps) fail the whole parse.

mod extensions;
mod metadata;
mod point;
mod primitives;
mod pull;
mod track;

use std::io::{BufRead, BufReader, Read};

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use quick_xml::encoding::{EncodingError, detect_encoding};
use tracing::debug;

use crate::error::Result;
use crate::model::{Gpx, GpxVersion, WayPoint};
use point::read_point;
use primitives::skip;
use pull::PullParser;

/// Parse a GPX 1.0 or 1.1 document from any byte source.
///
/// The encoding is taken from a byte order mark or the XML declaration, as
/// in `<?xml version="1.0" encoding="ISO-8859-1"?>`, and defaults to UTF-8.
pub fn parse_gpx<R: Read>(input: R) -> Result<Gpx> {
    let mut input = BufReader::new(input);
    match utf16_encoding(input.fill_buf()?) {
        Some(encoding) => {
            let mut bytes = Vec::new();
            input.read_to_end(&mut bytes)?;
            let text = transcode(encoding, &bytes)?;
            read_document(&mut PullParser::from_text(&text))
        }
        None => read_document(&mut PullParser::new(input)),
    }
}

/// Parse a GPX document held in memory.
pub fn parse_gpx_str(input: &str) -> Result<Gpx> {
    read_document(&mut PullParser::from_text(input))
}

/// quick-xml only reads ASCII-compatible encodings, so UTF-16 input is
/// converted to UTF-8 before parsing.
fn utf16_encoding(head: &[u8]) -> Option<&'static Encoding> {
    detect_encoding(head)
        .map(|(encoding, _)| encoding)
        .filter(|&encoding| encoding == UTF_16LE || encoding == UTF_16BE)
}

fn transcode(encoding: &'static Encoding, bytes: &[u8]) -> Result<String> {
    let (text, malformed) = encoding.decode_with_bom_removal(bytes);
    if malformed {
        return Err(quick_xml::Error::from(EncodingError::Other(encoding)).into());
    }
    Ok(text.into_owned())
}

fn read_document<R: BufRead>(parser: &mut PullParser<R>) -> Result<Gpx> {
    parser.next_tag()?;
    let gpx = read_gpx(parser)?;

    debug!(
        version = %gpx.version(),
        waypoints = gpx.waypoints().len(),
        routes = gpx.routes().len(),
        tracks = gpx.tracks().len(),
        "parsed GPX document"
    );
    Ok(gpx)
}

fn read_gpx<R: BufRead>(parser: &mut PullParser<R>) -> Result<Gpx> {
    let start = parser.require_start("gpx")?;
    let version = match start.attribute("version") {
        Some(version) => version.parse()?,
        None => GpxVersion::default(),
    };
    let mut builder = Gpx::builder(version)
        .creator(start.attribute("creator").unwrap_or_default())
        .attributes(start.attributes.clone());

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "metadata" => builder.metadata(metadata::read_metadata(parser)?),
            "wpt" => builder.waypoints([read_point::<WayPoint, _>(parser)?]),
            "rte" => builder.routes([track::read_route(parser)?]),
            "trk" => builder.tracks([track::read_track(parser)?]),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("gpx")?;
    Ok(builder.build())
}
