use std::io::Write;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use super::sink::XmlSink;
use crate::error::Result;
use crate::model::{
    Author, Bounds, Copyright, Email, Extension, Gpx, Link, Metadata, WayPoint,
};

/// Write the `<gpx>` root and everything below it.
///
/// Only metadata and waypoints are emitted; routes and tracks stay in the model.
pub(super) fn write_root<W: Write>(sink: &mut XmlSink<W>, gpx: &Gpx) -> Result<()> {
    let ns = gpx.namespace();

    sink.set_prefix("", ns)?;
    for attr in gpx.attributes() {
        if !attr.prefix().is_empty() {
            sink.set_prefix(attr.prefix(), attr.namespace())?;
        }
    }
    sink.start_tag(ns, "gpx")?;
    sink.attribute("", "creator", gpx.creator())?;
    sink.attribute("", "version", gpx.version().as_str())?;

    for attr in gpx.attributes() {
        if matches!(attr.name(), "creator" | "version") {
            continue;
        }
        sink.attribute(attr.namespace(), attr.name(), attr.value())?;
        if !attr.prefix().is_empty() {
            sink.set_prefix(attr.prefix(), attr.namespace())?;
        }
    }

    if let Some(metadata) = gpx.metadata() {
        write_metadata(sink, ns, metadata)?;
    }
    for waypoint in gpx.waypoints() {
        write_waypoint(sink, ns, waypoint)?;
    }

    sink.end_tag(ns, "gpx")
}

fn write_metadata<W: Write>(sink: &mut XmlSink<W>, ns: &str, metadata: &Metadata) -> Result<()> {
    sink.start_tag(ns, "metadata")?;
    write_optional(sink, ns, "name", metadata.name())?;
    write_optional(sink, ns, "desc", metadata.desc())?;
    if let Some(author) = metadata.author() {
        write_author(sink, ns, author)?;
    }
    if let Some(copyright) = metadata.copyright() {
        write_copyright(sink, ns, copyright)?;
    }
    if let Some(link) = metadata.link() {
        write_link(sink, ns, link)?;
    }
    write_optional(sink, ns, "keywords", metadata.keywords())?;
    if let Some(time) = metadata.time() {
        write_time(sink, ns, &time)?;
    }
    if let Some(bounds) = metadata.bounds() {
        write_bounds(sink, ns, bounds)?;
    }
    sink.end_tag(ns, "metadata")
}

fn write_author<W: Write>(sink: &mut XmlSink<W>, ns: &str, author: &Author) -> Result<()> {
    sink.start_tag(ns, "author")?;
    write_optional(sink, ns, "name", author.name())?;
    if let Some(email) = author.email() {
        write_email(sink, ns, email)?;
    }
    if let Some(link) = author.link() {
        write_link(sink, ns, link)?;
    }
    sink.end_tag(ns, "author")
}

fn write_email<W: Write>(sink: &mut XmlSink<W>, ns: &str, email: &Email) -> Result<()> {
    sink.start_tag(ns, "email")?;
    sink.attribute("", "id", email.id())?;
    sink.attribute("", "domain", email.domain())?;
    sink.end_tag(ns, "email")
}

fn write_copyright<W: Write>(sink: &mut XmlSink<W>, ns: &str, copyright: &Copyright) -> Result<()> {
    sink.start_tag(ns, "copyright")?;
    sink.attribute("", "author", copyright.author())?;
    if let Some(year) = copyright.year() {
        write_text(sink, ns, "year", &year.to_string())?;
    }
    write_optional(sink, ns, "license", copyright.license())?;
    sink.end_tag(ns, "copyright")
}

fn write_link<W: Write>(sink: &mut XmlSink<W>, ns: &str, link: &Link) -> Result<()> {
    sink.start_tag(ns, "link")?;
    sink.attribute("", "href", link.href())?;
    write_optional(sink, ns, "text", link.text())?;
    write_optional(sink, ns, "type", link.link_type())?;
    sink.end_tag(ns, "link")
}

fn write_bounds<W: Write>(sink: &mut XmlSink<W>, ns: &str, bounds: &Bounds) -> Result<()> {
    sink.start_tag(ns, "bounds")?;
    sink.attribute("", "minlat", &bounds.min_lat().to_string())?;
    sink.attribute("", "minlon", &bounds.min_lon().to_string())?;
    sink.attribute("", "maxlat", &bounds.max_lat().to_string())?;
    sink.attribute("", "maxlon", &bounds.max_lon().to_string())?;
    sink.end_tag(ns, "bounds")
}

fn write_waypoint<W: Write>(sink: &mut XmlSink<W>, ns: &str, waypoint: &WayPoint) -> Result<()> {
    sink.start_tag(ns, "wpt")?;
    sink.attribute("", "lat", &waypoint.latitude().to_string())?;
    sink.attribute("", "lon", &waypoint.longitude().to_string())?;

    if let Some(elevation) = waypoint.elevation() {
        write_text(sink, ns, "ele", &elevation.to_string())?;
    }
    if let Some(time) = waypoint.time() {
        write_time(sink, ns, &time)?;
    }
    write_optional(sink, ns, "name", waypoint.name())?;
    write_optional(sink, ns, "desc", waypoint.desc())?;
    write_optional(sink, ns, "type", waypoint.point_type())?;
    write_optional(sink, ns, "sym", waypoint.sym())?;
    write_optional(sink, ns, "cmt", waypoint.cmt())?;
    write_optional(sink, ns, "src", waypoint.src())?;
    if let Some(link) = waypoint.link() {
        write_link(sink, ns, link)?;
    }
    write_extensions(sink, ns, waypoint.extensions())?;

    sink.end_tag(ns, "wpt")
}

fn write_extensions<W: Write>(sink: &mut XmlSink<W>, ns: &str, extensions: &[Extension]) -> Result<()> {
    if extensions.is_empty() {
        return Ok(());
    }
    sink.start_tag(ns, "extensions")?;
    for extension in extensions {
        write_extension(sink, extension)?;
    }
    sink.end_tag(ns, "extensions")
}

/// Write one extension node in its own namespace. Empty values are not
/// written, so a leaf without text comes out self-closing.
fn write_extension<W: Write>(sink: &mut XmlSink<W>, extension: &Extension) -> Result<()> {
    for attr in extension.attributes() {
        if !attr.prefix().is_empty() {
            sink.set_prefix(attr.prefix(), attr.namespace())?;
        }
    }
    sink.set_prefix(extension.prefix(), extension.namespace())?;

    sink.start_tag(extension.namespace(), extension.name())?;
    for attr in extension.attributes() {
        sink.attribute(attr.namespace(), attr.name(), attr.value())?;
    }
    if !extension.value().is_empty() {
        sink.text(extension.value())?;
    }
    for child in extension.children() {
        write_extension(sink, child)?;
    }
    sink.end_tag(extension.namespace(), extension.name())
}

fn write_time<W: Write>(sink: &mut XmlSink<W>, ns: &str, time: &DateTime<FixedOffset>) -> Result<()> {
    write_text(sink, ns, "time", &time.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn write_optional<W: Write>(
    sink: &mut XmlSink<W>,
    ns: &str,
    name: &str,
    value: Option<&str>,
) -> Result<()> {
    match value {
        Some(value) => write_text(sink, ns, name, value),
        None => Ok(()),
    }
}

fn write_text<W: Write>(sink: &mut XmlSink<W>, ns: &str, name: &str, value: &str) -> Result<()> {
    sink.start_tag(ns, name)?;
    sink.text(value)?;
    sink.end_tag(ns, name)
}
