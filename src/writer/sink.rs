use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{GpxError, Result};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An element whose start tag has been requested.
///
/// The start tag itself stays buffered until the first child or text arrives,
/// so attributes can still be added and an element without content can be
/// written self-closing.
#[derive(Debug)]
struct Scope {
    namespace: String,
    name: String,
    qname: String,
    bindings: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
    written: bool,
}

impl Scope {
    fn start_tag(&self) -> BytesStart<'_> {
        let mut start = BytesStart::new(self.qname.as_str());
        for (prefix, uri) in &self.bindings {
            let key = if prefix.is_empty() {
                "xmlns".to_string()
            } else {
                format!("xmlns:{prefix}")
            };
            start.push_attribute((key.as_str(), uri.as_str()));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        start
    }
}

/// Namespace-aware XML event sink over a quick-xml [`Writer`].
pub(crate) struct XmlSink<W: Write> {
    writer: Writer<W>,
    scopes: Vec<Scope>,
    pending: Vec<(String, String)>,
    next_generated: usize,
    started: bool,
    root_closed: bool,
}

impl<W: Write> XmlSink<W> {
    pub fn new(output: W, indent: usize) -> Self {
        let writer = if indent > 0 {
            Writer::new_with_indent(output, b' ', indent)
        } else {
            Writer::new(output)
        };
        Self {
            writer,
            scopes: Vec::new(),
            pending: Vec::new(),
            next_generated: 0,
            started: false,
            root_closed: false,
        }
    }

    /// Write the XML declaration. Only valid before anything else.
    pub fn start_document(&mut self) -> Result<()> {
        if self.started {
            return Err(GpxError::InvalidState(
                "document already started".to_string(),
            ));
        }
        self.started = true;
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Bind `prefix` to `uri` from the next start tag on. The empty prefix
    /// sets the default namespace.
    pub fn set_prefix(&mut self, prefix: &str, uri: &str) -> Result<()> {
        match prefix {
            "xmlns" => {
                return Err(GpxError::InvalidArgument(
                    "the xmlns prefix cannot be bound".to_string(),
                ));
            }
            "xml" if uri == XML_NAMESPACE => return Ok(()),
            "xml" => {
                return Err(GpxError::InvalidArgument(format!(
                    "the xml prefix cannot be bound to '{uri}'"
                )));
            }
            _ => {}
        }
        if !prefix.is_empty() && uri.is_empty() {
            return Err(GpxError::InvalidArgument(format!(
                "prefix '{prefix}' cannot be bound to an empty namespace"
            )));
        }

        self.pending.retain(|(bound, _)| bound != prefix);
        self.pending.push((prefix.to_string(), uri.to_string()));
        Ok(())
    }

    pub fn start_tag(&mut self, namespace: &str, name: &str) -> Result<()> {
        if self.root_closed {
            return Err(GpxError::InvalidState(format!(
                "<{name}> after the root element was closed"
            )));
        }
        self.flush_start()?;
        self.started = true;

        self.scopes.push(Scope {
            namespace: namespace.to_string(),
            name: name.to_string(),
            qname: String::new(),
            bindings: Vec::new(),
            attributes: Vec::new(),
            written: false,
        });
        for (prefix, uri) in std::mem::take(&mut self.pending) {
            if self.resolve(&prefix).unwrap_or("") != uri {
                self.declare(prefix, uri);
            }
        }

        let qname = if namespace.is_empty() {
            if self.resolve("").is_some() {
                self.declare(String::new(), String::new());
            }
            name.to_string()
        } else {
            let prefix = self.prefix_for(namespace, true);
            qualify(&prefix, name)
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.qname = qname;
        }
        Ok(())
    }

    /// Add an attribute to the start tag opened last.
    pub fn attribute(&mut self, namespace: &str, name: &str, value: &str) -> Result<()> {
        if !self.scopes.last().is_some_and(|scope| !scope.written) {
            return Err(GpxError::InvalidState(format!(
                "attribute '{name}' outside a start tag"
            )));
        }

        let key = if namespace.is_empty() {
            name.to_string()
        } else {
            let prefix = self.prefix_for(namespace, false);
            qualify(&prefix, name)
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.attributes.push((key, value.to_string()));
        }
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> Result<()> {
        if self.scopes.is_empty() {
            return Err(GpxError::InvalidState(
                "text outside the root element".to_string(),
            ));
        }
        self.flush_start()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    pub fn end_tag(&mut self, namespace: &str, name: &str) -> Result<()> {
        let scope = match self.scopes.pop() {
            Some(scope) if scope.namespace == namespace && scope.name == name => scope,
            Some(scope) => {
                return Err(GpxError::InvalidState(format!(
                    "</{name}> does not close <{}>",
                    scope.qname
                )));
            }
            None => {
                return Err(GpxError::InvalidState(format!(
                    "</{name}> without an open element"
                )));
            }
        };

        if scope.written {
            self.writer
                .write_event(Event::End(BytesEnd::new(scope.qname.as_str())))?;
        } else {
            self.writer.write_event(Event::Empty(scope.start_tag()))?;
        }
        if self.scopes.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    /// Check that every element was closed and flush the output.
    pub fn end_document(&mut self) -> Result<()> {
        if let Some(scope) = self.scopes.last() {
            return Err(GpxError::InvalidState(format!(
                "document ended with <{}> still open",
                scope.qname
            )));
        }
        self.writer.get_mut().flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn flush_start(&mut self) -> Result<()> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        if scope.written {
            return Ok(());
        }
        self.writer.write_event(Event::Start(scope.start_tag()))?;
        scope.written = true;
        scope.attributes.clear();
        Ok(())
    }

    /// Current binding of `prefix`, innermost first. An unbound default
    /// namespace resolves to `None`.
    fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.bindings.iter().rev())
            .find(|(bound, _)| bound == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Prefix to qualify a name in `namespace`, declaring a generated one if
    /// nothing in scope maps to it. The XML namespace is always `xml`.
    fn prefix_for(&mut self, namespace: &str, allow_default: bool) -> String {
        if namespace == XML_NAMESPACE {
            return "xml".to_string();
        }
        match self.lookup_prefix(namespace, allow_default) {
            Some(prefix) => prefix,
            None => self.generate_prefix(namespace),
        }
    }

    fn lookup_prefix(&self, namespace: &str, allow_default: bool) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.bindings.iter().rev())
            .filter(|(prefix, uri)| uri == namespace && (allow_default || !prefix.is_empty()))
            .map(|(prefix, _)| prefix)
            .find(|prefix| self.resolve(prefix) == Some(namespace))
            .cloned()
    }

    fn generate_prefix(&mut self, namespace: &str) -> String {
        let prefix = loop {
            let candidate = format!("n{}", self.next_generated);
            self.next_generated += 1;
            if self.resolve(&candidate).is_none() {
                break candidate;
            }
        };
        self.declare(prefix.clone(), namespace.to_string());
        prefix
    }

    fn declare(&mut self, prefix: String, uri: String) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.retain(|(bound, _)| *bound != prefix);
            scope.bindings.push((prefix, uri));
        }
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}:{name}")
    }
}
