use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Document-level information (`<metadata>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    name: Option<String>,
    desc: Option<String>,
    author: Option<Author>,
    copyright: Option<Copyright>,
    link: Option<Link>,
    time: Option<DateTime<FixedOffset>>,
    keywords: Option<String>,
    bounds: Option<Bounds>,
}

impl Metadata {
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn copyright(&self) -> Option<&Copyright> {
        self.copyright.as_ref()
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        self.time
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataBuilder {
    metadata: Metadata,
}

impl MetadataBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.metadata.desc = Some(desc.into());
        self
    }

    pub fn author(mut self, author: Author) -> Self {
        self.metadata.author = Some(author);
        self
    }

    pub fn copyright(mut self, copyright: Copyright) -> Self {
        self.metadata.copyright = Some(copyright);
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.metadata.link = Some(link);
        self
    }

    pub fn time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.metadata.time = Some(time);
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.metadata.keywords = Some(keywords.into());
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.metadata.bounds = Some(bounds);
        self
    }

    pub fn build(self) -> Metadata {
        self.metadata
    }
}

/// Person or organization (`<author>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Author {
    name: Option<String>,
    email: Option<Email>,
    link: Option<Link>,
}

impl Author {
    pub fn builder() -> AuthorBuilder {
        AuthorBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorBuilder {
    author: Author,
}

impl AuthorBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.author.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: Email) -> Self {
        self.author.email = Some(email);
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.author.link = Some(link);
        self
    }

    pub fn build(self) -> Author {
        self.author
    }
}

/// An email address split the way GPX stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    id: String,
    domain: String,
}

impl Email {
    pub fn new(id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn address(&self) -> String {
        format!("{}@{}", self.id, self.domain)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Copyright {
    author: String,
    year: Option<i32>,
    license: Option<String>,
}

impl Copyright {
    pub fn builder(author: impl Into<String>) -> CopyrightBuilder {
        CopyrightBuilder {
            copyright: Copyright {
                author: author.into(),
                ..Default::default()
            },
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct CopyrightBuilder {
    copyright: Copyright,
}

impl CopyrightBuilder {
    pub fn year(mut self, year: i32) -> Self {
        self.copyright.year = Some(year);
        self
    }

    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.copyright.license = Some(license.into());
        self
    }

    pub fn build(self) -> Copyright {
        self.copyright
    }
}

/// A GPX link element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    href: String,
    text: Option<String>,
    link_type: Option<String>,
}

impl Link {
    pub fn builder(href: impl Into<String>) -> LinkBuilder {
        LinkBuilder {
            link: Link {
                href: href.into(),
                ..Default::default()
            },
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// MIME type from the `<type>` child.
    pub fn link_type(&self) -> Option<&str> {
        self.link_type.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct LinkBuilder {
    link: Link,
}

impl LinkBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.link.text = Some(text.into());
        self
    }

    pub fn link_type(mut self, link_type: impl Into<String>) -> Self {
        self.link.link_type = Some(link_type.into());
        self
    }

    pub fn build(self) -> Link {
        self.link
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl Bounds {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }
}
