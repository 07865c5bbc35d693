//! Schema-directed reader and writer for GPX 1.0 and 1.1 documents.
//!
//! ```
//! let gpx = gpx_io::parse(r#"<gpx version="1.1" creator="demo"><wpt lat="1" lon="2"/></gpx>"#.as_bytes())?;
//! assert_eq!(gpx.waypoints().len(), 1);
//!
//! let mut out = Vec::new();
//! gpx_io::write(&gpx, &mut out)?;
//! # Ok::<(), gpx_io::GpxError>(())
//! ```

pub mod error;
pub mod model;
pub mod options;
pub mod parser;
pub mod writer;

use std::io::{Read, Write};

pub use error::{ErrorKind, GpxError, Result};
pub use model::*;
pub use options::WriteOptions;

/// Parse a GPX document. The input is consumed and dropped on every exit path.
pub fn parse<R: Read>(input: R) -> Result<Gpx> {
    parser::parse_gpx(input)
}

/// Serialize `gpx` as UTF-8 XML. The output is flushed and dropped on return.
pub fn write<W: Write>(gpx: &Gpx, output: W) -> Result<()> {
    writer::write_gpx(gpx, output)
}
