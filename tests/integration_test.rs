use chrono::{DateTime, Timelike};
use gpx_io::parser::parse_gpx_str;
use gpx_io::writer::write_gpx_to_string;
use gpx_io::{
    Bounds, ErrorKind, Extension, Gpx, GpxError, GpxVersion, Metadata, Point, WayPoint,
};

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn load_fixture_bytes(path: &str) -> Vec<u8> {
    std::fs::read(format!("tests/fixtures/{path}")).unwrap()
}

fn parse(xml: &str) -> Gpx {
    parse_gpx_str(xml).unwrap()
}

fn wrap(body: &str) -> String {
    format!(
        r#"<gpx version="1.1" creator="X" xmlns="http://www.topografix.com/GPX/1/1">{body}</gpx>"#
    )
}

fn wrap_root_attrs(attrs: &str, body: &str) -> String {
    format!(
        r#"<gpx version="1.1" creator="X" xmlns="http://www.topografix.com/GPX/1/1" {attrs}>{body}</gpx>"#
    )
}

// ---- basic/ ----

#[test]
fn test_01_minimal_waypoint() {
    let gpx = parse(&load_fixture("basic/01_minimal_waypoint.gpx"));
    assert_eq!(gpx.version(), GpxVersion::V1_1);
    assert_eq!(gpx.creator(), "gpx-io tests");
    assert_eq!(gpx.waypoints().len(), 1);

    let wpt = &gpx.waypoints()[0];
    assert!((wpt.latitude() - 35.6762).abs() < 1e-9);
    assert!((wpt.longitude() - 139.6503).abs() < 1e-9);
    assert_eq!(wpt.elevation(), None);
    assert_eq!(wpt.name(), None);
    assert!(wpt.extensions().is_empty());
}

#[test]
fn test_02_full_waypoint() {
    let gpx = parse(&load_fixture("basic/02_full_waypoint.gpx"));
    let wpt = &gpx.waypoints()[0];

    assert_eq!(wpt.name(), Some("Tokyo Tower"));
    assert_eq!(wpt.cmt(), Some("A comment"));
    assert_eq!(wpt.desc(), Some("A famous landmark in Tokyo"));
    assert_eq!(wpt.src(), Some("GPS"));
    assert_eq!(wpt.sym(), Some("Flag, Blue"));
    assert_eq!(wpt.point_type(), Some("POI"));
    assert_eq!(wpt.elevation(), Some(40.5));
    assert_eq!(
        wpt.time(),
        Some(DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z").unwrap())
    );

    let link = wpt.link().unwrap();
    assert_eq!(link.href(), "https://example.com/tokyo-tower");
    assert_eq!(link.text(), Some("Tokyo Tower Website"));
    assert_eq!(link.link_type(), Some("text/html"));
}

#[test]
fn test_03_simple_route() {
    let gpx = parse(&load_fixture("basic/03_simple_route.gpx"));
    assert_eq!(gpx.routes().len(), 1);

    let rte = &gpx.routes()[0];
    assert_eq!(rte.name(), Some("Station Walk"));
    assert_eq!(rte.cmt(), Some("Morning route"));
    assert_eq!(rte.desc(), Some("Tokyo Station to the Imperial Palace"));
    assert_eq!(rte.number(), Some(1));
    assert_eq!(rte.route_type(), Some("walking"));

    let points = rte.points();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].name(), Some("Tokyo Station"));
    assert_eq!(points[1].name(), None);
    assert_eq!(points[2].name(), Some("Imperial Palace"));
    assert_eq!(points[2].elevation(), Some(12.0));
}

#[test]
fn test_04_simple_track() {
    let gpx = parse(&load_fixture("basic/04_simple_track.gpx"));
    let trk = &gpx.tracks()[0];
    assert_eq!(trk.name(), Some("Morning Run"));
    assert_eq!(trk.track_type(), Some("running"));

    let points = trk.segments()[0].points();
    let elevations: Vec<_> = points.iter().filter_map(|p| p.elevation()).collect();
    assert_eq!(elevations, [40.0, 41.5, 42.0]);

    let seconds: Vec<_> = points
        .iter()
        .filter_map(|p| p.time())
        .map(|t| t.second())
        .collect();
    assert_eq!(seconds, [0, 10, 20]);
}

#[test]
fn test_05_complete() {
    let gpx = parse(&load_fixture("basic/05_complete.gpx"));
    let metadata = gpx.metadata().unwrap();

    assert_eq!(metadata.name(), Some("Tokyo Day Trip"));
    assert_eq!(metadata.desc(), Some("Landmarks around central Tokyo"));
    assert_eq!(metadata.keywords(), Some("tokyo, walk"));
    assert_eq!(metadata.link().unwrap().href(), "https://example.com");
    assert_eq!(
        metadata.time().unwrap().offset().local_minus_utc(),
        9 * 3600
    );
    assert_eq!(
        metadata.bounds(),
        Some(&Bounds::new(35.6, 139.6, 35.7, 139.8))
    );

    let author = metadata.author().unwrap();
    assert_eq!(author.name(), Some("Jane Doe"));
    assert_eq!(author.email().unwrap().address(), "jane@example.com");
    assert_eq!(author.link().unwrap().text(), Some("Jane"));

    let copyright = metadata.copyright().unwrap();
    assert_eq!(copyright.author(), "Jane Doe");
    assert_eq!(copyright.year(), Some(2024));

    assert_eq!(gpx.waypoints().len(), 1);
    assert_eq!(gpx.routes().len(), 1);
    assert_eq!(gpx.tracks().len(), 1);

    let schema = gpx
        .attributes()
        .iter()
        .find(|a| a.name() == "schemaLocation")
        .unwrap();
    assert_eq!(schema.prefix(), "xsi");
    assert_eq!(
        schema.namespace(),
        "http://www.w3.org/2001/XMLSchema-instance"
    );
    assert_eq!(schema.attr_type(), "CDATA");
}

// ---- tracks/ ----

#[test]
fn test_06_multi_segment() {
    let gpx = parse(&load_fixture("tracks/06_multi_segment.gpx"));
    let segments = gpx.tracks()[0].segments();
    assert_eq!(segments.len(), 2);

    let lats: Vec<Vec<f64>> = segments
        .iter()
        .map(|s| s.points().iter().map(|p| p.latitude()).collect())
        .collect();
    assert_eq!(lats, vec![vec![35.0, 35.1], vec![35.2, 35.3, 35.4]]);
}

#[test]
fn test_07_multi_track() {
    let gpx = parse(&load_fixture("tracks/07_multi_track.gpx"));
    let names: Vec<_> = gpx.tracks().iter().filter_map(|t| t.name()).collect();
    assert_eq!(names, ["Day 1", "Day 2", "Day 3"]);

    let numbers: Vec<_> = gpx.tracks().iter().filter_map(|t| t.number()).collect();
    assert_eq!(numbers, [1, 2, 3]);
    assert!(gpx.tracks()[2].segments().is_empty());
}

// ---- edge_cases/ ----

#[test]
fn test_09_empty() {
    let gpx = parse(&load_fixture("edge_cases/09_empty.gpx"));
    assert!(gpx.metadata().is_none());
    assert!(gpx.waypoints().is_empty());
    assert!(gpx.routes().is_empty());
    assert!(gpx.tracks().is_empty());
}

#[test]
fn test_10_empty_segments() {
    let gpx = parse(&load_fixture("edge_cases/10_empty_segments.gpx"));
    let sizes: Vec<_> = gpx.tracks()[0]
        .segments()
        .iter()
        .map(|s| s.points().len())
        .collect();
    assert_eq!(sizes, [0, 1, 0]);
}

#[test]
fn test_11_cdata_and_entities() {
    let gpx = parse(&load_fixture("edge_cases/11_cdata_and_entities.gpx"));
    let wpt = &gpx.waypoints()[0];
    assert_eq!(wpt.name(), Some("Café & Bar"));
    assert_eq!(wpt.desc(), Some("Fish & Chips <fresh>"));
    assert_eq!(wpt.cmt(), Some("ABC"));
}

#[test]
fn test_12_no_namespace() {
    let gpx = parse(&load_fixture("edge_cases/12_no_namespace.gpx"));
    assert_eq!(gpx.namespace(), "http://www.topografix.com/GPX/1/1");
    assert_eq!(gpx.waypoints()[0].name(), Some("Big Ben"));
    assert_eq!(gpx.waypoints()[0].longitude(), -0.1246);
    assert_eq!(gpx.tracks()[0].segments()[0].points().len(), 1);
}

#[test]
fn test_13_gpx10() {
    let gpx = parse(&load_fixture("edge_cases/13_gpx10.gpx"));
    assert_eq!(gpx.version(), GpxVersion::V1_0);
    assert_eq!(gpx.namespace(), "http://www.topografix.com/GPX/1/0");

    let wpt = &gpx.waypoints()[0];
    assert_eq!(wpt.name(), Some("Eiffel Tower"));
    assert_eq!(wpt.speed(), Some(1.5));

    let trkpt = &gpx.tracks()[0].segments()[0].points()[0];
    assert_eq!(trkpt.speed(), Some(1.2));
}

#[test]
fn test_15_unknown_elements_ignored() {
    let gpx = parse(&load_fixture("edge_cases/15_unknown_elements.gpx"));
    let expected = parse(&wrap(concat!(
        r#"<wpt lat="35.6812" lon="139.7671"><name>Tokyo Station</name></wpt>"#,
        r#"<rte><rtept lat="35.0" lon="135.0"/></rte>"#,
    )));

    assert_eq!(gpx.waypoints(), expected.waypoints());
    assert_eq!(gpx.routes(), expected.routes());
    assert!(gpx.tracks().is_empty());
    assert!(gpx.metadata().is_none());
}

#[test]
fn test_16_latin1_declared_encoding() {
    let gpx = gpx_io::parse(load_fixture_bytes("edge_cases/16_latin1.gpx").as_slice()).unwrap();
    assert_eq!(gpx.creator(), "Café Logger");

    let wpt = &gpx.waypoints()[0];
    assert_eq!(wpt.name(), Some("Café"));
    assert_eq!(wpt.desc(), Some("Crème brûlée"));
}

#[test]
fn test_17_utf16le_with_bom() {
    let gpx = gpx_io::parse(load_fixture_bytes("edge_cases/17_utf16le_bom.gpx").as_slice()).unwrap();
    assert_eq!(gpx.creator(), "gpx-io tests");
    assert_eq!(gpx.namespace(), "http://www.topografix.com/GPX/1/1");

    let wpt = &gpx.waypoints()[0];
    assert_eq!(wpt.latitude(), 55.7558);
    assert_eq!(wpt.name(), Some("Красная площадь"));
}

#[test]
fn test_utf16be_without_bom() {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-16BE"?>{}"#,
        wrap(r#"<wpt lat="1" lon="2"><name>Zürich</name></wpt>"#)
    );
    let bytes: Vec<u8> = xml.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let gpx = gpx_io::parse(bytes.as_slice()).unwrap();
    assert_eq!(gpx.waypoints()[0].name(), Some("Zürich"));
}

// ---- vendor/ ----

#[test]
fn test_14_garmin_extensions() {
    let gpx = parse(&load_fixture("vendor/14_garmin_extensions.gpx"));

    let ext = &gpx.waypoints()[0].extensions()[0];
    assert_eq!(ext.name(), "WaypointExtension");
    assert_eq!(ext.prefix(), "gpxx");
    assert_eq!(
        ext.namespace(),
        "http://www.garmin.com/xmlschemas/GpxExtensions/v3"
    );
    assert_eq!(ext.value(), "");
    assert_eq!(ext.children()[0].value(), "SymbolAndName");

    let segment = &gpx.tracks()[0].segments()[0];
    let first = &segment.points()[0];
    let tpe = &first.extensions()[0];
    let names: Vec<_> = tpe.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["hr", "cad", "speed"]);
    assert_eq!(tpe.find("hr").map(Extension::value), Some("120"));
    assert_eq!(first.speed(), Some(4.2));

    // a non-numeric speed does not fail the parse
    assert_eq!(segment.points()[1].speed(), Some(0.0));

    assert_eq!(segment.extensions().len(), 1);
    assert_eq!(segment.extensions()[0].value(), "first");
}

// ---- scenarios ----

#[test]
fn test_s1_minimal_waypoint() {
    let gpx = parse(
        r#"<gpx version="1.1" creator="X" xmlns="http://www.topografix.com/GPX/1/1"><wpt lat="10.0" lon="20.0"/></gpx>"#,
    );
    assert_eq!(gpx.version(), GpxVersion::V1_1);
    assert_eq!(gpx.creator(), "X");
    assert_eq!(
        gpx.waypoints(),
        [Point::builder(10.0, 20.0).build_waypoint()]
    );
}

#[test]
fn test_s2_metadata_bounds() {
    let gpx = parse(&wrap(
        r#"<metadata><name>Trip</name><bounds minlat="1" minlon="2" maxlat="3" maxlon="4"/></metadata>"#,
    ));
    let expected = Metadata::builder()
        .name("Trip")
        .bounds(Bounds::new(1.0, 2.0, 3.0, 4.0))
        .build();
    assert_eq!(gpx.metadata(), Some(&expected));
}

#[test]
fn test_s3_track_point() {
    let gpx = parse(&wrap(
        r#"<trk><name>A</name><trkseg><trkpt lat="0" lon="0"><ele>5.5</ele><time>2024-01-15T08:30:00Z</time></trkpt></trkseg></trk>"#,
    ));
    let trk = &gpx.tracks()[0];
    assert_eq!(trk.name(), Some("A"));
    assert_eq!(trk.segments().len(), 1);

    let points = trk.segments()[0].points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].elevation(), Some(5.5));
    assert_eq!(
        points[0].time(),
        Some(DateTime::parse_from_rfc3339("2024-01-15T08:30:00Z").unwrap())
    );
}

#[test]
fn test_s4_copyright_year_with_zone() {
    let gpx = parse(&wrap(
        r#"<metadata><copyright author="Me"><year>2019+05:00</year><license>CC</license></copyright></metadata>"#,
    ));
    let copyright = gpx.metadata().unwrap().copyright().unwrap();
    assert_eq!(copyright.author(), "Me");
    assert_eq!(copyright.year(), Some(2019));
    assert_eq!(copyright.license(), Some("CC"));
}

#[test]
fn test_s5_segment_extension() {
    let gpx = parse(&wrap(
        r#"<trk><trkseg><extensions><gpxx:TrackExtension xmlns:gpxx="urn:x"><gpxx:DisplayColor>Red</gpxx:DisplayColor></gpxx:TrackExtension></extensions></trkseg></trk>"#,
    ));
    let extensions = gpx.tracks()[0].segments()[0].extensions();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].name(), "TrackExtension");
    assert_eq!(extensions[0].namespace(), "urn:x");
    assert_eq!(extensions[0].children().len(), 1);
    assert_eq!(extensions[0].children()[0].value(), "Red");
}

#[test]
fn test_s6_author_email() {
    let gpx = parse(&wrap(
        r#"<metadata><author><email id="a" domain="b.com"/></author></metadata>"#,
    ));
    let email = gpx.metadata().unwrap().author().unwrap().email().unwrap();
    assert_eq!(email.id(), "a");
    assert_eq!(email.domain(), "b.com");
}

// ---- properties ----

#[test]
fn test_unknown_sibling_anywhere() {
    let parts = [
        r#"<metadata><name>M</name></metadata>"#,
        r#"<wpt lat="1" lon="2"><name>W</name></wpt>"#,
        r#"<rte><rtept lat="3" lon="4"/></rte>"#,
        r#"<trk><trkseg><trkpt lat="5" lon="6"/></trkseg></trk>"#,
    ];
    let original = parse(&wrap(&parts.concat()));

    for position in 0..=parts.len() {
        let mut body: Vec<&str> = parts.to_vec();
        body.insert(position, "<noise a=\"1\"><inner>text</inner></noise>");
        let with_noise = parse(&wrap(&body.concat()));
        assert_eq!(with_noise, original, "unknown element at position {position}");
    }
}

#[test]
fn test_document_order_preserved() {
    let gpx = parse(&wrap(concat!(
        r#"<wpt lat="1" lon="0"/><trk><name>t1</name></trk><wpt lat="2" lon="0"/>"#,
        r#"<rte><name>r1</name></rte><wpt lat="3" lon="0"/><trk><name>t2</name></trk>"#,
    )));
    let lats: Vec<_> = gpx.waypoints().iter().map(|w| w.latitude()).collect();
    assert_eq!(lats, [1.0, 2.0, 3.0]);
    let tracks: Vec<_> = gpx.tracks().iter().filter_map(|t| t.name()).collect();
    assert_eq!(tracks, ["t1", "t2"]);
}

#[test]
fn test_duplicate_simple_child_last_wins() {
    let gpx = parse(&wrap("<trk><name>first</name><name>second</name></trk>"));
    assert_eq!(gpx.tracks()[0].name(), Some("second"));
}

#[test]
fn test_namespace_mapping() {
    for (version, namespace) in [
        ("1.0", "http://www.topografix.com/GPX/1/0"),
        ("1.1", "http://www.topografix.com/GPX/1/1"),
    ] {
        let gpx = parse(&format!(r#"<gpx version="{version}" creator="X"/>"#));
        assert_eq!(gpx.namespace(), namespace);
    }
}

#[test]
fn test_write_then_read_round_trip() {
    let gpx = parse(&load_fixture("basic/05_complete.gpx"));
    let reread = parse(&write_gpx_to_string(&gpx).unwrap());

    assert_eq!(reread.version(), gpx.version());
    assert_eq!(reread.creator(), gpx.creator());
    assert_eq!(reread.metadata(), gpx.metadata());
    assert_eq!(reread.waypoints(), gpx.waypoints());
}

#[test]
fn test_round_trip_keeps_extensions_and_empty_text() {
    let gpx = parse(&wrap(concat!(
        r#"<wpt lat="1" lon="2"><name></name>"#,
        r#"<extensions><a:x xmlns:a="urn:a" a:k="v"><a:y>1</a:y></a:x></extensions></wpt>"#,
    )));
    let reread = parse(&write_gpx_to_string(&gpx).unwrap());

    assert_eq!(reread.waypoints()[0].name(), Some(""));
    assert_eq!(reread.waypoints(), gpx.waypoints());
}

#[test]
fn test_round_trip_keeps_sub_millisecond_time() {
    let gpx = parse(&wrap(concat!(
        r#"<wpt lat="1" lon="2"><time>2024-01-15T08:30:00.123456Z</time></wpt>"#,
        r#"<wpt lat="3" lon="4"><time>2024-01-15T08:30:00.123456789+02:00</time></wpt>"#,
    )));
    let xml = write_gpx_to_string(&gpx).unwrap();
    assert!(xml.contains("<time>2024-01-15T08:30:00.123456Z</time>"));
    assert!(xml.contains("<time>2024-01-15T08:30:00.123456789+02:00</time>"));

    let reread = parse(&xml);
    assert_eq!(reread.waypoints(), gpx.waypoints());
    assert_eq!(reread.waypoints()[0].time().unwrap().nanosecond(), 123_456_000);
}

#[test]
fn test_round_trip_keeps_xml_lang() {
    let gpx = parse(&wrap_root_attrs(r#"xml:lang="en""#, ""));
    let xml = write_gpx_to_string(&gpx).unwrap();
    assert!(xml.contains(r#" xml:lang="en""#));
    assert!(!xml.contains("xmlns:n0"));

    let reread = parse(&xml);
    let lang = reread
        .attributes()
        .iter()
        .find(|a| a.name() == "lang")
        .unwrap();
    assert_eq!(lang.prefix(), "xml");
    assert_eq!(lang.namespace(), "http://www.w3.org/XML/1998/namespace");
    assert_eq!(lang.value(), "en");
}

#[test]
fn test_writer_omits_routes_and_tracks() {
    let gpx = parse(&load_fixture("basic/05_complete.gpx"));
    let xml = write_gpx_to_string(&gpx).unwrap();

    assert!(!xml.contains("<rte"));
    assert!(!xml.contains("<trk"));

    let reread = parse(&xml);
    assert!(reread.routes().is_empty());
    assert!(reread.tracks().is_empty());
}

#[test]
fn test_top_level_api() {
    let xml = load_fixture("basic/01_minimal_waypoint.gpx");
    let gpx = gpx_io::parse(xml.as_bytes()).unwrap();

    let mut out = Vec::new();
    gpx_io::write(&gpx, &mut out).unwrap();
    let again = gpx_io::parse(out.as_slice()).unwrap();
    let first: &[WayPoint] = gpx.waypoints();
    assert_eq!(again.waypoints(), first);
}

#[test]
fn test_model_serializes_to_json() {
    let gpx = parse(&load_fixture("basic/02_full_waypoint.gpx"));
    let json = serde_json::to_value(&gpx).unwrap();
    assert_eq!(json["version"], "1.1");
    assert_eq!(json["waypoints"][0]["name"], "Tokyo Tower");
}

// ---- errors ----

#[test]
fn test_error_kinds() {
    let cases = [
        (r#"<gpx><wpt lon="1"/></gpx>"#, ErrorKind::MalformedStructure),
        (r#"<gpx><wpt lat="x" lon="1"/></gpx>"#, ErrorKind::MalformedValue),
        (r#"<gpx><wpt lat="NaN" lon="1"/></gpx>"#, ErrorKind::MalformedValue),
        (r#"<gpx><wpt lat="1" lon="1"><time>noon</time></wpt></gpx>"#, ErrorKind::MalformedValue),
        ("<gpx><wpt lat=\"1\" lon=\"1\"></gpx>", ErrorKind::MalformedStructure),
        ("<gpx><a:b/></gpx>", ErrorKind::MalformedStructure),
        ("<gpx><metadata>", ErrorKind::MalformedStructure),
        ("<gpx><rte><number>-1</number></rte></gpx>", ErrorKind::MalformedValue),
    ];
    for (xml, kind) in cases {
        let err = parse_gpx_str(xml).unwrap_err();
        assert_eq!(err.kind(), kind, "{xml}: {err}");
    }
}

struct BrokenReader;

impl std::io::Read for BrokenReader {
    fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("connection reset"))
    }
}

#[test]
fn test_read_failure_is_io_failure() {
    let err = gpx_io::parse(BrokenReader).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

#[test]
fn test_read_failure_mid_document() {
    let head = r#"<gpx version="1.1"><wpt lat="1" lon="2"><name>"#;
    let err = gpx_io::parse(std::io::Read::chain(head.as_bytes(), BrokenReader)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure, "{err}");
}

#[test]
fn test_invalid_value_message() {
    let err = parse_gpx_str(r#"<gpx><wpt lat="1" lon="1"><ele>high</ele></wpt></gpx>"#).unwrap_err();
    assert!(matches!(err, GpxError::InvalidValue { element: "ele", .. }));
    assert_eq!(err.to_string(), "Invalid value 'high' in <ele>");
}
