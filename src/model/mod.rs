//! Immutable GPX records and their builders.

mod extension;
mod gpx;
mod metadata;
mod point;
mod route;

pub use extension::{Extension, ExtensionBuilder, XmlAttribute, XmlAttributeBuilder};
pub(crate) use extension::speed_from_text;
pub use gpx::{GPX10_NAMESPACE, GPX11_NAMESPACE, Gpx, GpxBuilder, GpxVersion};
pub use metadata::{
    Author, AuthorBuilder, Bounds, Copyright, CopyrightBuilder, Email, Link, LinkBuilder,
    Metadata, MetadataBuilder,
};
pub use point::{Point, PointBuilder, PointVariant, RoutePoint, TrackPoint, WayPoint};
pub use route::{Route, RouteBuilder, Track, TrackBuilder, TrackSegment, TrackSegmentBuilder};
