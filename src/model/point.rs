use std::ops::Deref;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::extension::Extension;
use super::metadata::Link;

/// Attributes shared by waypoints, route points and track points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    latitude: f64,
    longitude: f64,
    elevation: Option<f64>,
    time: Option<DateTime<FixedOffset>>,
    name: Option<String>,
    desc: Option<String>,
    cmt: Option<String>,
    src: Option<String>,
    link: Option<Link>,
    sym: Option<String>,
    point_type: Option<String>,
    speed: Option<f64>,
    extensions: Vec<Extension>,
}

impl Point {
    pub fn builder(latitude: f64, longitude: f64) -> PointBuilder {
        PointBuilder {
            point: Point {
                latitude,
                longitude,
                elevation: None,
                time: None,
                name: None,
                desc: None,
                cmt: None,
                src: None,
                link: None,
                sym: None,
                point_type: None,
                speed: None,
                extensions: Vec::new(),
            },
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        self.time
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

    pub fn sym(&self) -> Option<&str> {
        self.sym.as_deref()
    }

    /// Content of the `<type>` child.
    pub fn point_type(&self) -> Option<&str> {
        self.point_type.as_deref()
    }

    /// Speed from a GPX 1.0 `<speed>` child, or else from the first `speed`
    /// element found in the extensions.
    pub fn speed(&self) -> Option<f64> {
        self.speed
            .or_else(|| self.extensions.iter().find_map(Extension::find_speed))
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }
}

#[derive(Debug, Clone)]
pub struct PointBuilder {
    point: Point,
}

impl PointBuilder {
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.point.elevation = Some(elevation);
        self
    }

    pub fn time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.point.time = Some(time);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.point.name = Some(name.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.point.desc = Some(desc.into());
        self
    }

    pub fn cmt(mut self, cmt: impl Into<String>) -> Self {
        self.point.cmt = Some(cmt.into());
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.point.src = Some(src.into());
        self
    }

    pub fn link(mut self, link: Link) -> Self {
        self.point.link = Some(link);
        self
    }

    pub fn sym(mut self, sym: impl Into<String>) -> Self {
        self.point.sym = Some(sym.into());
        self
    }

    pub fn point_type(mut self, point_type: impl Into<String>) -> Self {
        self.point.point_type = Some(point_type.into());
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.point.speed = Some(speed);
        self
    }

    /// Replaces any extensions set earlier.
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.point.extensions = extensions.into_iter().collect();
        self
    }

    pub fn build(self) -> Point {
        self.point
    }

    pub fn build_waypoint(self) -> WayPoint {
        WayPoint(self.point)
    }

    pub fn build_route_point(self) -> RoutePoint {
        RoutePoint(self.point)
    }

    pub fn build_track_point(self) -> TrackPoint {
        TrackPoint(self.point)
    }
}

/// A point variant, tagged by the element name it is read from and written to.
pub trait PointVariant: From<Point> + Deref<Target = Point> {
    const TAG: &'static str;
}

macro_rules! point_variant {
    ($(#[$doc:meta])* $name:ident, $tag:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(transparent)]
        pub struct $name(Point);

        impl $name {
            pub fn point(&self) -> &Point {
                &self.0
            }

            pub fn into_point(self) -> Point {
                self.0
            }
        }

        impl From<Point> for $name {
            fn from(point: Point) -> Self {
                Self(point)
            }
        }

        impl Deref for $name {
            type Target = Point;

            fn deref(&self) -> &Point {
                &self.0
            }
        }

        impl PointVariant for $name {
            const TAG: &'static str = $tag;
        }
    };
}

point_variant!(
    /// A standalone point of interest (`<wpt>`).
    WayPoint,
    "wpt"
);
point_variant!(
    /// A point of a planned route (`<rtept>`).
    RoutePoint,
    "rtept"
);
point_variant!(
    /// A recorded point of a track segment (`<trkpt>`).
    TrackPoint,
    "trkpt"
);
