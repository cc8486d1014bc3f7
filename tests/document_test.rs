use easyeda_pcb::testing::{record_fields, record_kind, track_points, without_id};
use easyeda_pcb::{
    ArcOptions, Canvas, Document, HoleOptions, LayerId, LayerType, PcbError, Position, RectangleOptions,
    SequentialIdSource, TextOptions, TrackOptions, ViaOptions,
};
use rstest::rstest;

fn document(copper_layers: u32) -> Document {
    Document::with_sources(Canvas::default(), copper_layers, Box::new(SequentialIdSource::new()), 0)
}

#[test]
fn hole_at_origin_in_a_two_layer_document() {
    // given
    let mut document = Document::new(Canvas::default(), 2);

    // when
    document.add_hole(20.0, HoleOptions::default());

    // then
    assert_eq!(document.shapes().len(), 1);
    assert_eq!(without_id(&document.shapes()[0]), "HOLE~0~-0~1~<id>~0");
    assert_eq!(document.layers().len(), 12);
}

#[test]
fn track_on_the_top_layer() {
    // given
    let mut document = document(2);

    // when
    document
        .layer_mut(LayerId::TOP)
        .unwrap()
        .add_track(
            &[Position::new(0.0, 0.0), Position::new(1000.0, 1000.0)],
            TrackOptions {
                net: "GND".to_string(),
                width: Some(100.0),
                locked: false,
            },
        );

    // then
    assert_eq!(without_id(&document.shapes()[0]), "TRACK~10~1~GND~0 -0 100 -100~<id>~0");
}

#[test]
fn degenerate_tracks_are_encoded_as_given() {
    // given
    let mut document = document(2);
    let mut layer = document
        .layer_mut(LayerId::TOP)
        .unwrap();

    // when
    layer.add_track(&[], TrackOptions::default());
    layer.add_track(&[Position::new(100.0, 200.0)], TrackOptions::default());

    // then
    assert_eq!(document.shapes(), ["TRACK~1~1~~~gge1~0", "TRACK~1~1~~10 -20~gge2~0"]);
}

#[test]
fn separator_in_net_is_not_escaped() {
    // given
    let mut document = document(2);

    // when
    document
        .layer_mut(LayerId::TOP)
        .unwrap()
        .add_track(
            &[Position::new(0.0, 0.0), Position::new(10.0, 10.0)],
            TrackOptions {
                net: "A~B".to_string(),
                ..TrackOptions::default()
            },
        );

    // then
    let record = &document.shapes()[0];
    assert_eq!(record, "TRACK~1~1~A~B~0 -0 1 -1~gge1~0");
    // one field more than a well formed track
    assert_eq!(record_fields(record).len(), 8);
    assert!(document.to_json().is_ok());
}

#[rstest]
#[case(100.0, 50.0, Position::new(0.0, 0.0))]
#[case(30.0, 300.0, Position::new(-120.0, 45.5))]
#[case(1.0, 1.0, Position::new(1000.0, -1000.0))]
fn sharp_rectangle_is_one_closed_track(#[case] width: f64, #[case] height: f64, #[case] center: Position) {
    // given
    let mut document = document(2);

    // when
    document
        .layer_mut(LayerId::TOP_SILK)
        .unwrap()
        .add_rectangle(
            width,
            height,
            RectangleOptions {
                center,
                ..RectangleOptions::default()
            },
        );

    // then
    let shapes = document.shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(record_kind(&shapes[0]), "TRACK");

    let points = track_points(&shapes[0]);
    assert_eq!(points.len(), 5);
    assert_eq!(points.first(), points.last());
}

#[rstest]
#[case(0.1)]
#[case(5.0)]
#[case(25.0)]
fn rounded_rectangle_is_four_tracks_and_four_arcs(#[case] corner_radius: f64) {
    // given
    let mut document = document(2);

    // when
    let ids = document
        .layer_mut(LayerId::TOP)
        .unwrap()
        .add_rectangle(
            100.0,
            60.0,
            RectangleOptions {
                net: "GND".to_string(),
                corner_radius,
                ..RectangleOptions::default()
            },
        );

    // then
    let shapes = document.shapes();
    assert_eq!(ids.len(), 8);

    let tracks = shapes
        .iter()
        .filter(|record| record_kind(record) == "TRACK")
        .collect::<Vec<_>>();
    let arcs = shapes
        .iter()
        .filter(|record| record_kind(record) == "ARC")
        .collect::<Vec<_>>();

    assert_eq!(tracks.len(), 4);
    assert_eq!(arcs.len(), 4);
    for track in tracks {
        assert_eq!(track_points(track).len(), 2);
    }

    let expected_radius = (corner_radius / 10.0).to_string();
    for arc in arcs {
        let path = record_fields(arc)[4]
            .split(' ')
            .collect::<Vec<_>>();
        assert_eq!(path[3], "A");
        assert_eq!(path[4], expected_radius);
        assert_eq!(path[5], expected_radius);
    }
}

#[test]
fn arc_with_elliptical_radius() {
    // given
    let mut document = document(2);

    // when
    document
        .layer_mut(LayerId::BOTTOM)
        .unwrap()
        .add_arc(
            Position::new(-100.0, 0.0),
            Position::new(100.0, 0.0),
            (100.0, 200.0),
            ArcOptions {
                width: Some(8.0),
                locked: true,
                ..ArcOptions::default()
            },
        );

    // then
    assert_eq!(
        without_id(&document.shapes()[0]),
        "ARC~0.8~2~~M -10 -0 A 10 20 0 0 0 10 -0~<id>~1"
    );
}

#[rstest]
#[case(24.0, 12.0, "2.4", "0.6")]
#[case(10.0, 5.0, "1", "0.25")]
fn via_fields(#[case] diameter: f64, #[case] hole_diameter: f64, #[case] outer: &str, #[case] inner: &str) {
    // given
    let mut document = document(2);

    // when
    document.add_via(diameter, hole_diameter, ViaOptions::default());

    // then
    let fields = record_fields(&document.shapes()[0]);
    assert_eq!(fields[0], "VIA");
    assert_eq!(fields[3], outer);
    assert_eq!(fields[5], inner);
}

#[rstest]
#[case(LayerType::Signal, "Signal")]
#[case(LayerType::Plane, "Plane")]
fn inner_layer_type_is_encoded(#[case] layer_type: LayerType, #[case] expected: &str) {
    // given
    let mut document = document(4);

    // when
    document
        .inner_layer(2)
        .unwrap()
        .set_layer_type(layer_type)
        .unwrap();

    // then
    let record = document
        .layer(LayerId(22))
        .unwrap()
        .to_string();
    assert_eq!(record_fields(&record)[6], expected);
}

#[rstest]
#[case(LayerType::Other)]
#[case(LayerType::NonSignal)]
fn inner_layer_type_is_restricted(#[case] layer_type: LayerType) {
    let mut document = document(4);

    let result = document
        .inner_layer(1)
        .unwrap()
        .set_layer_type(layer_type);

    assert!(matches!(result, Err(PcbError::InvalidLayerType { .. })));
}

#[test]
fn json_envelope() {
    // given
    let _ = env_logger::builder()
        .is_test(true)
        .try_init();
    let mut document = document(3);
    document.add_hole(20.0, HoleOptions::default());
    document
        .layer_mut(LayerId::TOP_SILK)
        .unwrap()
        .add_text("J1", TextOptions::default());

    // when
    let json = document
        .to_json()
        .unwrap();

    // then
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value
        .as_object()
        .unwrap();
    assert_eq!(
        object
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        ["canvas", "head", "layers", "shape"]
    );

    assert_eq!(value["head"], "3~1.0.0");
    assert_eq!(
        value["canvas"],
        "CA~2400~2400~#000000~yes~#FFFFFF~10~1200~1200~line~1~mil~1~45~visible~0.5~0~0"
    );
    assert_eq!(value["shape"][0], "HOLE~0~-0~1~gge1~0");
    assert_eq!(value["shape"][1], "TEXT~L~0~-0~0.8~0~none~3~~8~J1~");

    let layers = value["layers"]
        .as_array()
        .unwrap();
    assert_eq!(layers.len(), 13);
    assert_eq!(layers[0], "1~TopLayer~#FF0000~true~true~true~");
    assert_eq!(layers[9], "10~BoardOutline~#FF00FF~true~false~true~");
    assert!(layers[12]
        .as_str()
        .unwrap()
        .starts_with("21~Inner1~#"));

    // and the envelope keys are written in order
    let head = json.find("\"head\"").unwrap();
    let canvas = json.find("\"canvas\"").unwrap();
    let shape = json.find("\"shape\"").unwrap();
    let layers = json.find("\"layers\"").unwrap();
    assert!(head < canvas && canvas < shape && shape < layers);
}

#[test]
fn display_matches_json() {
    let document = document(2);

    assert_eq!(document.to_string(), document.to_json().unwrap());
}

#[test]
fn every_shape_references_an_existing_layer() {
    // given
    let mut document = document(4);
    for id in [LayerId::TOP, LayerId::BOTTOM, LayerId::BOARD_OUTLINE, LayerId(21), LayerId(22)] {
        document
            .layer_mut(id)
            .unwrap()
            .add_rectangle(
                50.0,
                50.0,
                RectangleOptions {
                    corner_radius: 5.0,
                    ..RectangleOptions::default()
                },
            );
    }

    // then
    for record in document.shapes() {
        let layer: u32 = record_fields(record)[2]
            .parse()
            .unwrap();
        assert!(document.layer(LayerId(layer)).is_some(), "record: {}", record);
    }
}
