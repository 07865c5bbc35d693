use serde::Serialize;

/// An attribute captured verbatim from a source element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlAttribute {
    name: String,
    value: String,
    attr_type: String,
    prefix: String,
    namespace: String,
}

impl XmlAttribute {
    pub fn builder(name: impl Into<String>, value: impl Into<String>) -> XmlAttributeBuilder {
        XmlAttributeBuilder {
            name: name.into(),
            value: value.into(),
            attr_type: "CDATA".to_string(),
            prefix: String::new(),
            namespace: String::new(),
        }
    }

    /// Local name, without prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Attribute type as reported by the source, normally `CDATA`.
    pub fn attr_type(&self) -> &str {
        &self.attr_type
    }

    /// Namespace prefix; empty when the attribute is unprefixed.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[derive(Debug, Clone)]
pub struct XmlAttributeBuilder {
    name: String,
    value: String,
    attr_type: String,
    prefix: String,
    namespace: String,
}

impl XmlAttributeBuilder {
    pub fn attr_type(mut self, attr_type: impl Into<String>) -> Self {
        self.attr_type = attr_type.into();
        self
    }

    /// `None` is stored as the empty prefix.
    pub fn prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.prefix = prefix.map(Into::into).unwrap_or_default();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn build(self) -> XmlAttribute {
        XmlAttribute {
            name: self.name,
            value: self.value,
            attr_type: self.attr_type,
            prefix: self.prefix,
            namespace: self.namespace,
        }
    }
}

/// An opaque element captured from inside `<extensions>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extension {
    name: String,
    prefix: String,
    namespace: String,
    attributes: Vec<XmlAttribute>,
    value: String,
    children: Vec<Extension>,
}

impl Extension {
    pub fn builder(name: impl Into<String>) -> ExtensionBuilder {
        ExtensionBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespace URI bound to the prefix where the element appeared.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name() == name)
            .map(XmlAttribute::value)
    }

    /// Text content; empty when the element had none.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn children(&self) -> &[Extension] {
        &self.children
    }

    /// Depth-first search of the descendants (not including `self`) by local name.
    pub fn find(&self, name: &str) -> Option<&Extension> {
        self.children.iter().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }

    /// Speed carried by a `speed` element. A body that is not a number reads as 0.0.
    pub fn speed(&self) -> Option<f64> {
        (self.name == "speed").then(|| speed_from_text(&self.value))
    }

    pub(crate) fn find_speed(&self) -> Option<f64> {
        self.speed()
            .or_else(|| self.find("speed").and_then(Extension::speed))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    name: String,
    prefix: String,
    namespace: String,
    attributes: Vec<XmlAttribute>,
    value: String,
    children: Vec<Extension>,
}

impl ExtensionBuilder {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn attributes(mut self, attributes: impl IntoIterator<Item = XmlAttribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn child(mut self, child: Extension) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Extension>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Extension {
        Extension {
            name: self.name,
            prefix: self.prefix,
            namespace: self.namespace,
            attributes: self.attributes,
            value: self.value,
            children: self.children,
        }
    }
}

pub(crate) fn speed_from_text(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}
