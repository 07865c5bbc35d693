use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::extension::XmlAttribute;
use super::metadata::Metadata;
use super::point::WayPoint;
use super::route::{Route, Track};
use crate::error::GpxError;

pub const GPX10_NAMESPACE: &str = "http://www.topografix.com/GPX/1/0";
pub const GPX11_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum GpxVersion {
    #[serde(rename = "1.0")]
    V1_0,
    #[default]
    #[serde(rename = "1.1")]
    V1_1,
}

impl GpxVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
        }
    }

    pub fn namespace(self) -> &'static str {
        match self {
            Self::V1_0 => GPX10_NAMESPACE,
            Self::V1_1 => GPX11_NAMESPACE,
        }
    }
}

impl fmt::Display for GpxVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpxVersion {
    type Err = GpxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            other => Err(GpxError::InvalidAttribute {
                element: "gpx",
                attribute: "version",
                value: other.to_string(),
            }),
        }
    }
}

/// A parsed GPX document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Gpx {
    version: GpxVersion,
    creator: String,
    metadata: Option<Metadata>,
    waypoints: Vec<WayPoint>,
    routes: Vec<Route>,
    tracks: Vec<Track>,
    attributes: Vec<XmlAttribute>,
}

impl Gpx {
    pub fn builder(version: GpxVersion) -> GpxBuilder {
        GpxBuilder {
            gpx: Gpx {
                version,
                ..Default::default()
            },
        }
    }

    pub fn version(&self) -> GpxVersion {
        self.version
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// Namespace URI of the GPX vocabulary for this document's version.
    pub fn namespace(&self) -> &'static str {
        self.version.namespace()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn waypoints(&self) -> &[WayPoint] {
        &self.waypoints
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Attributes of the root element in document order, `version` and `creator` included.
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }
}

#[derive(Debug, Clone)]
pub struct GpxBuilder {
    gpx: Gpx,
}

impl GpxBuilder {
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.gpx.creator = creator.into();
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.gpx.metadata = Some(metadata);
        self
    }

    pub fn waypoints(mut self, waypoints: impl IntoIterator<Item = WayPoint>) -> Self {
        self.gpx.waypoints.extend(waypoints);
        self
    }

    pub fn routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.gpx.routes.extend(routes);
        self
    }

    pub fn tracks(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.gpx.tracks.extend(tracks);
        self
    }

    pub fn attributes(mut self, attributes: impl IntoIterator<Item = XmlAttribute>) -> Self {
        self.gpx.attributes.extend(attributes);
        self
    }

    pub fn build(self) -> Gpx {
        self.gpx
    }
}
