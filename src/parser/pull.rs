use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::NsReader;
use quick_xml::encoding::{Decoder, EncodingError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use tracing::warn;

use crate::error::{GpxError, Result};
use crate::model::XmlAttribute;

/// A start tag with its namespace already resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StartTag {
    pub name: String,
    pub prefix: String,
    pub namespace: String,
    pub attributes: Vec<XmlAttribute>,
}

impl StartTag {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name() == name)
            .map(XmlAttribute::value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum XmlEvent {
    StartDocument,
    StartTag(StartTag),
    EndTag(String),
    Text(String),
    EndDocument,
}

impl XmlEvent {
    pub(super) fn describe(&self) -> String {
        match self {
            Self::StartDocument => "start of document".to_string(),
            Self::StartTag(tag) => format!("<{}>", tag.name),
            Self::EndTag(name) => format!("</{name}>"),
            Self::Text(_) => "text".to_string(),
            Self::EndDocument => "end of document".to_string(),
        }
    }
}

/// Pull parser over quick-xml yielding owned events with one current position.
///
/// Adjacent text, CDATA and entity references are merged into a single
/// [`XmlEvent::Text`]; comments, processing instructions and the declaration
/// never surface.
pub(crate) struct PullParser<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    current: XmlEvent,
    lookahead: Option<XmlEvent>,
    depth: usize,
}

impl<'a> PullParser<&'a [u8]> {
    /// Parser over text that is already UTF-8, whatever its declaration says.
    pub fn from_text(input: &'a str) -> Self {
        Self::with_reader(NsReader::from_str(input))
    }
}

impl<R: BufRead> PullParser<R> {
    /// Parser over raw bytes. The encoding comes from a BOM or the XML
    /// declaration and defaults to UTF-8.
    pub fn new(input: R) -> Self {
        Self::with_reader(NsReader::from_reader(input))
    }

    fn with_reader(mut reader: NsReader<R>) -> Self {
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            current: XmlEvent::StartDocument,
            lookahead: None,
            depth: 0,
        }
    }

    pub fn current(&self) -> &XmlEvent {
        &self.current
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn next(&mut self) -> Result<&XmlEvent> {
        let event = match self.lookahead.take() {
            Some(event) => event,
            None => self.read_raw()?,
        };

        self.current = match event {
            XmlEvent::Text(mut text) => {
                loop {
                    match self.read_raw()? {
                        XmlEvent::Text(more) => text.push_str(&more),
                        other => {
                            self.lookahead = Some(other);
                            break;
                        }
                    }
                }
                XmlEvent::Text(text)
            }
            other => other,
        };

        match self.current {
            XmlEvent::StartTag(_) => self.depth += 1,
            XmlEvent::EndTag(_) => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }

        Ok(&self.current)
    }

    /// Advances to the next start or end tag, skipping whitespace-only text.
    pub fn next_tag(&mut self) -> Result<&XmlEvent> {
        loop {
            self.next()?;
            match &self.current {
                XmlEvent::Text(text) if text.trim().is_empty() => {}
                XmlEvent::StartTag(_) | XmlEvent::EndTag(_) => break,
                other => return Err(GpxError::unexpected("a tag", other.describe())),
            }
        }
        Ok(&self.current)
    }

    /// Advances one event and reports whether the enclosing element still has content.
    pub fn next_in_body(&mut self) -> Result<bool> {
        let event = self.next()?;
        Ok(!matches!(event, XmlEvent::EndTag(_) | XmlEvent::EndDocument))
    }

    /// Local name of the current event when it is a start tag.
    pub fn start_name(&self) -> Option<String> {
        match &self.current {
            XmlEvent::StartTag(tag) => Some(tag.name.clone()),
            _ => None,
        }
    }

    pub fn require_start(&self, name: &str) -> Result<&StartTag> {
        match &self.current {
            XmlEvent::StartTag(tag) if tag.name == name => Ok(tag),
            other => Err(GpxError::unexpected(format!("<{name}>"), other.describe())),
        }
    }

    pub fn require_end(&self, name: &str) -> Result<()> {
        match &self.current {
            XmlEvent::EndTag(end) if end == name => Ok(()),
            other => Err(GpxError::unexpected(format!("</{name}>"), other.describe())),
        }
    }

    fn read_raw(&mut self) -> Result<XmlEvent> {
        loop {
            self.buf.clear();
            let decoder = self.reader.decoder();
            let event = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => XmlEvent::StartTag(resolve_start(&self.reader, &e)?),
                Event::End(e) => XmlEvent::EndTag(decode(decoder, e.local_name().as_ref())?),
                Event::Text(e) => XmlEvent::Text(owned(e.decode())?),
                Event::CData(e) => XmlEvent::Text(owned(e.decode())?),
                Event::GeneralRef(e) => {
                    // Character references (&#60; &#x3C;) and the predefined entities
                    let text = if let Ok(Some(ch)) = e.resolve_char_ref() {
                        ch.to_string()
                    } else {
                        match decode(decoder, e.as_ref())?.as_str() {
                            "amp" => "&".to_string(),
                            "lt" => "<".to_string(),
                            "gt" => ">".to_string(),
                            "quot" => "\"".to_string(),
                            "apos" => "'".to_string(),
                            other => {
                                warn!(entity = other, "dropping unknown entity reference");
                                String::new()
                            }
                        }
                    };
                    XmlEvent::Text(text)
                }
                Event::Eof => XmlEvent::EndDocument,
                _ => continue,
            };
            return Ok(event);
        }
    }
}

fn resolve_start<R>(reader: &NsReader<R>, start: &BytesStart<'_>) -> Result<StartTag> {
    let decoder = reader.decoder();
    let (resolved, local) = reader.resolve_element(start.name());
    let namespace = namespace_uri(decoder, resolved, start.name())?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, attr_local) = reader.resolve_attribute(attr.key);
        let attr_namespace = namespace_uri(decoder, resolved, attr.key)?;
        let value = attr.decode_and_unescape_value(decoder)?;
        attributes.push(
            XmlAttribute::builder(decode(decoder, attr_local.as_ref())?, value)
                .prefix(prefix_of(decoder, attr.key)?)
                .namespace(attr_namespace)
                .build(),
        );
    }

    Ok(StartTag {
        name: decode(decoder, local.as_ref())?,
        prefix: prefix_of(decoder, start.name())?.unwrap_or_default(),
        namespace,
        attributes,
    })
}

fn namespace_uri(decoder: Decoder, resolved: ResolveResult<'_>, name: QName<'_>) -> Result<String> {
    match resolved {
        ResolveResult::Bound(ns) => decode(decoder, ns.as_ref()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(_) => Err(GpxError::UnboundPrefix(
            prefix_of(decoder, name)?.unwrap_or_default(),
        )),
    }
}

fn prefix_of(decoder: Decoder, name: QName<'_>) -> Result<Option<String>> {
    name.prefix()
        .map(|prefix| decode(decoder, prefix.as_ref()))
        .transpose()
}

fn decode(decoder: Decoder, bytes: &[u8]) -> Result<String> {
    owned(decoder.decode(bytes))
}

fn owned(text: std::result::Result<Cow<'_, str>, EncodingError>) -> Result<String> {
    let text = text.map_err(quick_xml::Error::from)?;
    Ok(text.into_owned())
}
