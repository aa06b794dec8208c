use arcus_geometry::errors::Error;
use arcus_geometry::*;
use proptest::prelude::*;

#[test]
fn construction_validates_the_data_model() {
    assert_eq!(
        BSplineCurve::try_new(KnotVec::bezier_knot(1), vec![0.0, 1.0], 0),
        Err(Error::ZeroDimension),
    );
    assert_eq!(
        BSplineCurve::try_new(KnotVec::bezier_knot(1), vec![0.0, 1.0, 2.0], 2),
        Err(Error::ControlPointsDimensionMismatch(3, 2)),
    );
    assert_eq!(
        BSplineCurve::try_new(
            KnotVec::try_from(vec![0.0, 1.0]).unwrap(),
            vec![0.0, 1.0],
            1,
        ),
        Err(Error::InvalidKnotCount(3, 2)),
    );
    assert_eq!(
        BSplineCurve::try_new(
            KnotVec::try_from(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap(),
            vec![0.0, 1.0],
            1,
        ),
        Err(Error::TooLargeDegree(3, 2)),
    );
    assert_eq!(
        BSplineCurve::try_new(
            KnotVec::try_from(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0]).unwrap(),
            vec![0.0, 1.0, 2.0],
            1,
        ),
        Err(Error::TooLargeMultiplicity(4, 3)),
    );
}

#[test]
fn knot_and_control_point_mutators_revalidate() {
    let mut curve = BSplineCurve::new(
        KnotVec::uniform_knot(2, 2),
        vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
        2,
    );
    assert_eq!(curve.try_set_knot(7, 0.5), Err(Error::IndexOutOfRange(7, 7)));
    assert_eq!(curve.try_set_knot(3, 2.0), Err(Error::DecreasingKnotVector));
    assert_eq!(curve.knot(3), 0.5);
    assert_eq!(
        curve.try_set_knot(3, 1.0),
        Err(Error::TooLargeMultiplicity(4, 3)),
    );
    assert!(curve.try_set_knot(3, 0.25).is_ok());
    assert_eq!(curve.knot(3), 0.25);

    assert_eq!(
        curve.try_set_control_point(1, &[1.0]),
        Err(Error::ControlPointsDimensionMismatch(1, 2)),
    );
    assert_eq!(
        curve.try_set_control_point(4, &[1.0, 2.0]),
        Err(Error::IndexOutOfRange(4, 4)),
    );
    assert!(curve.try_set_control_point(1, &[2.0, 0.0]).is_ok());
    assert_eq!(curve.control_point(1), &[2.0, 0.0]);

    assert_eq!(
        curve.try_set_control_points(vec![0.0, 0.0]),
        Err(Error::InvalidPointCount(1)),
    );
    assert_eq!(
        curve.try_set_knots(KnotVec::bezier_knot(1)),
        Err(Error::InvalidKnotCount(7, 4)),
    );
    assert!(curve.try_set_knots(KnotVec::uniform_knot(2, 2)).is_ok());
}

#[test]
fn knot_styles() {
    let opened = BSplineCurve::try_with_style(4, 2, 1, KnotStyle::Opened).unwrap();
    assert_eq!(opened.num_knots(), 6);
    let (min, max) = opened.domain();
    assert!(min > 0.0 && max < 1.0);

    let clamped = BSplineCurve::try_with_style(4, 2, 1, KnotStyle::Clamped).unwrap();
    assert!(clamped.is_clamped());
    assert_eq!(clamped.domain(), (0.0, 1.0));

    let beziers = BSplineCurve::try_with_style(4, 2, 1, KnotStyle::Beziers).unwrap();
    assert_eq!(
        beziers.knot_vec().as_slice(),
        &[0.0, 0.0, 0.5, 0.5, 1.0, 1.0],
    );
    assert_eq!(
        BSplineCurve::try_with_style(5, 2, 1, KnotStyle::Beziers),
        Err(Error::InvalidPointCount(5)),
    );
    assert_eq!(
        BSplineCurve::try_with_style(3, 2, 3, KnotStyle::Clamped),
        Err(Error::TooLargeDegree(3, 3)),
    );
}

#[test]
fn the_degenerate_point_curve() {
    let point = BSplineCurve::point(&[3.0, 4.0, 5.0]);
    assert_eq!(point.degree(), 0);
    assert_eq!(point.dimension(), 3);
    assert_eq!(point.domain(), (0.0, 1.0));
    assert_eq!(point.eval(0.7).result(), &[3.0, 4.0, 5.0]);
    let derived = point.try_derive(1, POINT_EPSILON).unwrap();
    assert_eq!(derived.eval(0.3).result(), &[0.0, 0.0, 0.0]);
}

#[test]
fn closed_periodic_curves_are_detected() {
    // uniform unclamped quadratic whose last two control points repeat the
    // first two
    let knot_vec = KnotVec::try_from(vec![
        0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0,
    ])
    .unwrap();
    let ctrl = vec![
        0.0, 0.0, //
        2.0, 0.0, //
        2.0, 2.0, //
        0.0, 2.0, //
        0.0, 0.0, //
        2.0, 0.0,
    ];
    let curve = BSplineCurve::new(knot_vec.clone(), ctrl, 2);
    assert!(curve.try_is_closed(POINT_EPSILON).unwrap());

    let open_ctrl = vec![
        0.0, 0.0, //
        2.0, 0.0, //
        2.0, 2.0, //
        0.0, 2.0, //
        -1.0, 1.0, //
        0.5, 0.5,
    ];
    let curve = BSplineCurve::new(knot_vec, open_ctrl, 2);
    assert!(!curve.try_is_closed(POINT_EPSILON).unwrap());
}

proptest! {
    #[test]
    fn clamped_curves_interpolate_their_end_control_points(
        degree in 1usize..=4,
        division in 1usize..=4,
        coords in prop::collection::vec(-10.0..10.0, 24),
    ) {
        let dim = 3;
        let n = degree + division;
        let curve = BSplineCurve::new(
            KnotVec::uniform_knot(degree, division),
            coords[..n * dim].to_vec(),
            dim,
        );
        let front = curve.eval(0.0);
        let back = curve.eval(1.0);
        prop_assert_near!(front.result(), curve.control_point(0));
        prop_assert_near!(back.result(), curve.control_point(n - 1));
    }
}
