//! GPX serializer built on a namespace-aware quick-xml event sink.

mod elements;
mod sink;

use std::io::Write;

use tracing::debug;

use crate::error::{GpxError, Result};
use crate::model::Gpx;
use crate::options::WriteOptions;
use sink::XmlSink;

/// Write `gpx` as a UTF-8 XML document with default options.
pub fn write_gpx<W: Write>(gpx: &Gpx, output: W) -> Result<()> {
    write_gpx_with_options(gpx, output, &WriteOptions::default())
}

pub fn write_gpx_with_options<W: Write>(gpx: &Gpx, output: W, opts: &WriteOptions) -> Result<()> {
    write_document(gpx, output, opts).map(drop)
}

/// Write `gpx` into a `String` with default options.
pub fn write_gpx_to_string(gpx: &Gpx) -> Result<String> {
    let buffer = write_document(gpx, Vec::new(), &WriteOptions::default())?;
    String::from_utf8(buffer).map_err(|e| GpxError::Utf8(e.utf8_error()))
}

fn write_document<W: Write>(gpx: &Gpx, output: W, opts: &WriteOptions) -> Result<W> {
    let mut sink = XmlSink::new(output, opts.indent);
    if opts.xml_declaration {
        sink.start_document()?;
    }
    elements::write_root(&mut sink, gpx)?;
    sink.end_document()?;

    debug!(
        version = %gpx.version(),
        waypoints = gpx.waypoints().len(),
        "wrote GPX document"
    );
    Ok(sink.into_inner())
}
