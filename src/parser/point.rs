use std::io::BufRead;

use super::extensions::read_extensions;
use super::metadata::read_link;
use super::primitives::{read_double, read_speed, read_string, read_time, required_double, skip};
use super::pull::PullParser;
use crate::error::Result;
use crate::model::{Point, PointVariant};

/// Parse a `<wpt>`, `<rtept>` or `<trkpt>` element, depending on `P`.
pub(super) fn read_point<P: PointVariant, R: BufRead>(parser: &mut PullParser<R>) -> Result<P> {
    let start = parser.require_start(P::TAG)?;
    let latitude = required_double(start, P::TAG, "lat")?;
    let longitude = required_double(start, P::TAG, "lon")?;
    let mut builder = Point::builder(latitude, longitude);

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "ele" => builder.elevation(read_double(parser, "ele")?),
            "time" => builder.time(read_time(parser, "time")?),
            "name" => builder.name(read_string(parser, "name")?),
            "desc" => builder.desc(read_string(parser, "desc")?),
            "cmt" => builder.cmt(read_string(parser, "cmt")?),
            "src" => builder.src(read_string(parser, "src")?),
            "link" => builder.link(read_link(parser)?),
            "sym" => builder.sym(read_string(parser, "sym")?),
            "type" => builder.point_type(read_string(parser, "type")?),
            // GPX 1.0 carries speed as a plain child
            "speed" => builder.speed(read_speed(parser)?),
            "extensions" => builder.extensions(read_extensions(parser)?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end(P::TAG)?;
    Ok(P::from(builder.build()))
}
