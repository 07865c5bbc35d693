use serde::Serialize;

use super::extension::Extension;
use super::metadata::Link;
use super::point::{RoutePoint, TrackPoint};

/// A GPX route (`<rte>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    name: Option<String>,
    desc: Option<String>,
    cmt: Option<String>,
    src: Option<String>,
    link: Option<Link>,
    number: Option<u32>,
    route_type: Option<String>,
    points: Vec<RoutePoint>,
}

impl Route {
    pub fn builder() -> RouteBuilder {
        RouteBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn cmt(&self) -> Option<&str> {
        self.cmt.as_deref()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn route_type(&self) -> Option<&str> {
        self.route_type.as_deref()
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    route: Route,
}

impl RouteBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.route.name = Some(name.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.route.desc = Some(desc.into());
        self
    }

    pub fn cmt(mut self, cmt: impl Into<String>) -> Self {
        self.route.cmt = Some(cmt.into());
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.route.src = Some(src.into());
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.route.link = Some(link);
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.route.number = Some(number);
        self
    }

    pub fn route_type(mut self, route_type: impl Into<String>) -> Self {
        self.route.route_type = Some(route_type.into());
        self
    }

    pub fn points(mut self, points: impl IntoIterator<Item = RoutePoint>) -> Self {
        self.route.points.extend(points);
        self
    }

    pub fn build(self) -> Route {
        self.route
    }
}

/// A GPX track (`<trk>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    name: Option<String>,
    desc: Option<String>,
    cmt: Option<String>,
    src: Option<String>,
    link: Option<Link>,
    number: Option<u32>,
    track_type: Option<String>,
    segments: Vec<TrackSegment>,
}

impl Track {
    pub fn builder() -> TrackBuilder {
        TrackBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn cmt(&self) -> Option<&str> {
        self.cmt.as_deref()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn track_type(&self) -> Option<&str> {
        self.track_type.as_deref()
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    track: Track,
}

impl TrackBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.track.name = Some(name.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.track.desc = Some(desc.into());
        self
    }

    pub fn cmt(mut self, cmt: impl Into<String>) -> Self {
        self.track.cmt = Some(cmt.into());
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.track.src = Some(src.into());
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.track.link = Some(link);
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.track.number = Some(number);
        self
    }

    pub fn track_type(mut self, track_type: impl Into<String>) -> Self {
        self.track.track_type = Some(track_type.into());
        self
    }

    pub fn segments(mut self, segments: impl IntoIterator<Item = TrackSegment>) -> Self {
        self.track.segments.extend(segments);
        self
    }

    pub fn build(self) -> Track {
        self.track
    }
}

/// A GPX track segment (`<trkseg>`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackSegment {
    points: Vec<TrackPoint>,
    extensions: Vec<Extension>,
}

impl TrackSegment {
    pub fn builder() -> TrackSegmentBuilder {
        TrackSegmentBuilder::default()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackSegmentBuilder {
    segment: TrackSegment,
}

impl TrackSegmentBuilder {
    pub fn points(mut self, points: impl IntoIterator<Item = TrackPoint>) -> Self {
        self.segment.points.extend(points);
        self
    }

    /// Appends to the extensions collected so far.
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.segment.extensions.extend(extensions);
        self
    }

    pub fn build(self) -> TrackSegment {
        self.segment
    }
}
