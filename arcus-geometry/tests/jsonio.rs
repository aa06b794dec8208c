use arcus_geometry::errors::Error;
use arcus_geometry::*;
use proptest::prelude::*;

#[test]
fn json_follows_the_wire_format() {
    let line = BSplineCurve::new(KnotVec::bezier_knot(1), vec![0.0, 0.0, 1.0, 2.0], 2);
    let value: serde_json::Value = serde_json::from_str(&line.to_json()).unwrap();
    assert_eq!(value["degree"].as_u64(), Some(1));
    assert_eq!(value["dimension"].as_u64(), Some(2));
    assert_eq!(value["control_points"].as_array().unwrap().len(), 4);
    assert_eq!(value["knots"].as_array().unwrap().len(), 4);
}

#[test]
fn parsing_surfaces_the_error_taxonomy() {
    assert!(matches!(
        BSplineCurve::from_json("not json"),
        Err(Error::ParseFailure(_)),
    ));
    let json = r#"{"degree": 1, "dimension": 0, "control_points": [], "knots": [0.0, 0.0, 1.0, 1.0]}"#;
    assert_eq!(BSplineCurve::from_json(json), Err(Error::ZeroDimension));

    let json = r#"{"degree": 1, "dimension": 2, "control_points": [0.0, 0.0, 1.0], "knots": [0.0, 0.0, 1.0, 1.0]}"#;
    assert_eq!(
        BSplineCurve::from_json(json),
        Err(Error::ControlPointsDimensionMismatch(3, 2)),
    );

    let json = r#"{"degree": 1, "dimension": 1, "control_points": [0.0, 1.0], "knots": [0.0, 1.0, 0.5, 1.0]}"#;
    assert_eq!(
        BSplineCurve::from_json(json),
        Err(Error::DecreasingKnotVector),
    );

    // a degree field that contradicts the buffer lengths is rejected
    let json = r#"{"degree": 1, "dimension": 1, "control_points": [0.0, 1.0], "knots": [0.0, 0.5, 1.0]}"#;
    assert_eq!(
        BSplineCurve::from_json(json),
        Err(Error::InvalidKnotCount(4, 3)),
    );

    let json = r#"{"degree": 1, "dimension": 1, "control_points": [0.0, 1.0, 2.0], "knots": [0.0, 0.0, 0.0, 1.0, 1.0]}"#;
    assert_eq!(
        BSplineCurve::from_json(json),
        Err(Error::TooLargeMultiplicity(3, 2)),
    );
}

#[test]
fn save_and_load_round_trip() {
    let curve = BSplineCurve::new(
        KnotVec::uniform_knot(2, 2),
        vec![0.0, 0.0, 1.0, 3.0, 2.0, -1.0, 3.0, 0.5],
        2,
    );
    let path = std::env::temp_dir().join("arcus-jsonio-roundtrip.json");
    curve.save(&path).unwrap();
    let loaded = BSplineCurve::load(&path).unwrap();
    assert_eq!(loaded, curve);
    std::fs::remove_file(&path).unwrap();

    let missing = std::env::temp_dir().join("arcus-jsonio-does-not-exist.json");
    assert!(matches!(BSplineCurve::load(&missing), Err(Error::Io(_))));
}

proptest! {
    #[test]
    fn json_round_trip_is_structural_identity(
        degree in 1usize..=4,
        division in 1usize..=4,
        coords in prop::collection::vec(-1.0e3..1.0e3, 24),
    ) {
        let dim = 3;
        let n = degree + division;
        let curve = BSplineCurve::new(
            KnotVec::uniform_knot(degree, division),
            coords[..n * dim].to_vec(),
            dim,
        );
        let parsed = BSplineCurve::from_json(&curve.to_json()).unwrap();
        prop_assert_eq!(parsed, curve);
    }
}
