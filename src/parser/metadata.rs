use std::io::BufRead;

use tracing::debug;

use super::primitives::{
    attribute_or_empty, read_string, read_time, read_year, required_double, skip,
};
use super::pull::PullParser;
use crate::error::Result;
use crate::model::{Author, Bounds, Copyright, Email, Link, Metadata};

/// Parse a `<metadata>` element. Metadata-level extensions are not modeled and are skipped.
pub(super) fn read_metadata<R: BufRead>(parser: &mut PullParser<R>) -> Result<Metadata> {
    parser.require_start("metadata")?;
    let mut builder = Metadata::builder();

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "name" => builder.name(read_string(parser, "name")?),
            "desc" => builder.desc(read_string(parser, "desc")?),
            "author" => builder.author(read_author(parser)?),
            "copyright" => builder.copyright(read_copyright(parser)?),
            "link" => builder.link(read_link(parser)?),
            "time" => builder.time(read_time(parser, "time")?),
            "keywords" => builder.keywords(read_string(parser, "keywords")?),
            "bounds" => builder.bounds(read_bounds(parser)?),
            "extensions" => {
                debug!("dropping metadata extensions");
                skip(parser)?;
                builder
            }
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("metadata")?;
    Ok(builder.build())
}

fn read_author<R: BufRead>(parser: &mut PullParser<R>) -> Result<Author> {
    parser.require_start("author")?;
    let mut builder = Author::builder();

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "name" => builder.name(read_string(parser, "name")?),
            "email" => builder.email(read_email(parser)?),
            "link" => builder.link(read_link(parser)?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("author")?;
    Ok(builder.build())
}

/// `<email>` carries everything in attributes and has no body.
fn read_email<R: BufRead>(parser: &mut PullParser<R>) -> Result<Email> {
    let start = parser.require_start("email")?;
    let email = Email::new(
        attribute_or_empty(start, "id"),
        attribute_or_empty(start, "domain"),
    );

    parser.next_tag()?;
    parser.require_end("email")?;
    Ok(email)
}

fn read_copyright<R: BufRead>(parser: &mut PullParser<R>) -> Result<Copyright> {
    let start = parser.require_start("copyright")?;
    let mut builder = Copyright::builder(attribute_or_empty(start, "author"));

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "year" => builder.year(read_year(parser)?),
            "license" => builder.license(read_string(parser, "license")?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("copyright")?;
    Ok(builder.build())
}

/// Parse a `<link>` element.
pub(super) fn read_link<R: BufRead>(parser: &mut PullParser<R>) -> Result<Link> {
    let start = parser.require_start("link")?;
    let mut builder = Link::builder(attribute_or_empty(start, "href"));

    while parser.next_in_body()? {
        let Some(name) = parser.start_name() else {
            continue;
        };
        builder = match name.as_str() {
            "text" => builder.text(read_string(parser, "text")?),
            "type" => builder.link_type(read_string(parser, "type")?),
            _ => {
                skip(parser)?;
                builder
            }
        };
    }

    parser.require_end("link")?;
    Ok(builder.build())
}

fn read_bounds<R: BufRead>(parser: &mut PullParser<R>) -> Result<Bounds> {
    let start = parser.require_start("bounds")?;
    let bounds = Bounds::new(
        required_double(start, "bounds", "minlat")?,
        required_double(start, "bounds", "minlon")?,
        required_double(start, "bounds", "maxlat")?,
        required_double(start, "bounds", "maxlon")?,
    );

    parser.next_tag()?;
    parser.require_end("bounds")?;
    Ok(bounds)
}
