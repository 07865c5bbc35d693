use std::io::BufRead;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::pull::{PullParser, StartTag, XmlEvent};
use crate::error::{GpxError, Result};
use crate::model::speed_from_text;

/// Read the text body of the current start tag and leave the parser on its end tag.
/// An element with no text reads as the empty string.
fn read_text<R: BufRead>(parser: &mut PullParser<R>) -> Result<String> {
    let text = match parser.next()? {
        XmlEvent::Text(text) => Some(text.clone()),
        _ => None,
    };
    match text {
        Some(text) => {
            parser.next_tag()?;
            Ok(text)
        }
        None => Ok(String::new()),
    }
}

pub(super) fn read_string<R: BufRead>(parser: &mut PullParser<R>, tag: &str) -> Result<String> {
    parser.require_start(tag)?;
    let value = read_text(parser)?;
    parser.require_end(tag)?;
    Ok(value)
}

fn read_parsed<T: FromStr, R: BufRead>(
    parser: &mut PullParser<R>,
    tag: &'static str,
) -> Result<(T, String)> {
    let text = read_string(parser, tag)?;
    match text.trim().parse::<T>() {
        Ok(value) => Ok((value, text)),
        Err(_) => Err(GpxError::InvalidValue {
            element: tag,
            value: text,
        }),
    }
}

pub(super) fn read_double<R: BufRead>(parser: &mut PullParser<R>, tag: &'static str) -> Result<f64> {
    let (value, text): (f64, _) = read_parsed(parser, tag)?;
    if !value.is_finite() {
        return Err(GpxError::InvalidValue {
            element: tag,
            value: text,
        });
    }
    Ok(value)
}

pub(super) fn read_number<R: BufRead>(parser: &mut PullParser<R>, tag: &'static str) -> Result<u32> {
    read_parsed(parser, tag).map(|(value, _)| value)
}

pub(super) fn read_time<R: BufRead>(
    parser: &mut PullParser<R>,
    tag: &'static str,
) -> Result<DateTime<FixedOffset>> {
    let text = read_string(parser, tag)?;
    parse_timestamp(&text).ok_or_else(|| GpxError::InvalidValue {
        element: tag,
        value: text,
    })
}

/// Read a `<year>`, dropping a trailing time-zone designator such as `2019+05:00`.
pub(super) fn read_year<R: BufRead>(parser: &mut PullParser<R>) -> Result<i32> {
    let text = read_string(parser, "year")?;
    strip_year_zone(&text)
        .trim()
        .parse::<i32>()
        .map_err(|_| GpxError::InvalidValue {
            element: "year",
            value: text,
        })
}

/// Read a `<speed>`; a body that is not a number yields 0.0.
pub(super) fn read_speed<R: BufRead>(parser: &mut PullParser<R>) -> Result<f64> {
    let text = read_string(parser, "speed")?;
    Ok(speed_from_text(&text))
}

/// Advance past the current element and everything nested in it.
pub(super) fn skip<R: BufRead>(parser: &mut PullParser<R>) -> Result<()> {
    let name = match parser.current() {
        XmlEvent::StartTag(tag) => tag.name.clone(),
        _ => {
            return Err(GpxError::InvalidState(
                "skip called outside a start tag".to_string(),
            ));
        }
    };
    debug!(element = %name, depth = parser.depth(), "skipping unknown element");

    let mut depth = 1usize;
    while depth != 0 {
        match parser.next()? {
            XmlEvent::StartTag(_) => depth += 1,
            XmlEvent::EndTag(_) => depth -= 1,
            XmlEvent::EndDocument => {
                return Err(GpxError::unexpected(format!("</{name}>"), "end of document"));
            }
            _ => {}
        }
    }
    Ok(())
}

/// A required numeric attribute; non-finite values are rejected.
pub(super) fn required_double(
    start: &StartTag,
    element: &'static str,
    attribute: &'static str,
) -> Result<f64> {
    let raw = start
        .attribute(attribute)
        .ok_or(GpxError::MissingAttribute { element, attribute })?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GpxError::InvalidAttribute {
            element,
            attribute,
            value: raw.to_string(),
        }),
    }
}

pub(super) fn attribute_or_empty(start: &StartTag, attribute: &str) -> String {
    start.attribute(attribute).unwrap_or_default().to_string()
}

fn strip_year_zone(text: &str) -> &str {
    let cut = text.find('+').or_else(|| text.find('-'));
    match cut {
        Some(index) => &text[..index],
        None => text,
    }
}

/// ISO-8601 date-time. Values without a zone designator are taken as UTC, and a
/// bare date as midnight UTC.
pub(super) fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
