use std::io::BufRead;

use super::extensions::read_extensions;
use super::metadata::read_link;
use super::point::read_point;
use super::primitives::{read_number, read_string, skip};
use super::pull::PullParser;
use crate::error::Result;
use crate::model::{Route, RoutePoint, Track, TrackPoint, TrackSegment};

pub(super) fn read_route<R: BufRead>(parser: &mut PullParser<R>) -> Result<Route> {
    parser.require_start("rte")?;
    let mut builder = Route::builder();

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "rtept" => builder.points([read_point::<RoutePoint, _>(parser)?]),
            "name" => builder.name(read_string(parser, "name")?),
            "desc" => builder.desc(read_string(parser, "desc")?),
            "cmt" => builder.cmt(read_string(parser, "cmt")?),
            "src" => builder.src(read_string(parser, "src")?),
            "link" => builder.link(read_link(parser)?),
            "number" => builder.number(read_number(parser, "number")?),
            "type" => builder.route_type(read_string(parser, "type")?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("rte")?;
    Ok(builder.build())
}

pub(super) fn read_track<R: BufRead>(parser: &mut PullParser<R>) -> Result<Track> {
    parser.require_start("trk")?;
    let mut builder = Track::builder();

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "trkseg" => builder.segments([read_segment(parser)?]),
            "name" => builder.name(read_string(parser, "name")?),
            "desc" => builder.desc(read_string(parser, "desc")?),
            "cmt" => builder.cmt(read_string(parser, "cmt")?),
            "src" => builder.src(read_string(parser, "src")?),
            "link" => builder.link(read_link(parser)?),
            "number" => builder.number(read_number(parser, "number")?),
            "type" => builder.track_type(read_string(parser, "type")?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("trk")?;
    Ok(builder.build())
}

/// Parse a `<trkseg>`. Repeated `<extensions>` children accumulate.
fn read_segment<R: BufRead>(parser: &mut PullParser<R>) -> Result<TrackSegment> {
    parser.require_start("trkseg")?;
    let mut builder = TrackSegment::builder();

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "trkpt" => builder.points([read_point::<TrackPoint, _>(parser)?]),
            "extensions" => builder.extensions(read_extensions(parser)?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("trkseg")?;
    Ok(builder.build())
}
