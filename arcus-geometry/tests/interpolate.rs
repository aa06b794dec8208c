use arcus_geometry::errors::Error;
use arcus_geometry::*;

#[test]
fn natural_cubic_passes_through_the_samples() {
    let pts = [0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 1.0];
    let curve = BSplineCurve::try_interpolate_cubic_natural(&pts, 2).unwrap();
    assert_eq!(curve.degree(), 3);
    assert_eq!(curve.num_control_points(), 12);
    for (i, p) in pts.chunks(2).enumerate() {
        let net = curve.eval(i as Real / 3.0);
        assert_near!(&net.result()[..2], p);
    }
}

#[test]
fn natural_cubic_has_vanishing_end_curvature() {
    let pts = [0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 1.0];
    let curve = BSplineCurve::try_interpolate_cubic_natural(&pts, 2).unwrap();
    let second = curve.try_derive(2, POINT_EPSILON).unwrap();
    let (min, max) = second.domain();
    let front = second.eval(min);
    assert_near!(front.result()[0], 0.0);
    assert_near!(front.result()[1], 0.0);
    let back = second.eval(max);
    assert_near!(back.result()[0], 0.0);
    assert_near!(back.result()[1], 0.0);
}

#[test]
fn natural_cubic_is_smooth_at_the_joints() {
    let pts = [0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 1.0];
    let curve = BSplineCurve::try_interpolate_cubic_natural(&pts, 2).unwrap();
    // the first derivative exists everywhere, so healing succeeds with a
    // tight tolerance and the joints carry no kinks
    let first = curve.try_derive(1, POINT_EPSILON).unwrap();
    for u in [1.0 / 3.0, 2.0 / 3.0] {
        let net = first.eval(u);
        if net.num_result() == 2 {
            assert_near!(&net.result()[..2], &net.result()[2..]);
        }
    }
}

#[test]
fn catmull_rom_endpoints_and_duplicates() {
    let pts = [0.0, 0.0, 1.0, 1.0, 2.0, 0.0];
    let curve =
        BSplineCurve::try_interpolate_catmull_rom(&pts, 2, 0.5, None, None, 1.0e-4).unwrap();
    assert_eq!(curve.degree(), 3);
    assert_eq!(curve.num_control_points(), 8);
    let (min, max) = curve.domain();
    assert_eq!(curve.eval(min).result(), &[0.0, 0.0]);
    assert_eq!(curve.eval(max).result(), &[2.0, 0.0]);
    // passes through the middle input point at the segment boundary
    let net = curve.eval(0.5);
    assert_near!(&net.result()[..2], &[1.0, 1.0][..]);

    // consecutive duplicates are filtered out
    let dup = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
    let curve =
        BSplineCurve::try_interpolate_catmull_rom(&dup, 2, 0.5, None, None, 1.0e-4).unwrap();
    assert_eq!(curve.num_control_points(), 4);

    // a single surviving point yields the degree-0 point curve
    let all = [1.0, 2.0, 1.0, 2.0];
    let point =
        BSplineCurve::try_interpolate_catmull_rom(&all, 2, 0.5, None, None, 1.0e-4).unwrap();
    assert_eq!(point.degree(), 0);
    assert_eq!(point.eval(0.5).result(), &[1.0, 2.0]);
}

#[test]
fn explicit_ghost_points_steer_the_end_tangents() {
    let pts = [0.0, 0.0, 1.0, 0.0];
    let with_ghosts = BSplineCurve::try_interpolate_catmull_rom(
        &pts,
        2,
        0.0,
        Some(&[-1.0, 1.0]),
        Some(&[2.0, 1.0]),
        1.0e-4,
    )
    .unwrap();
    let mirrored =
        BSplineCurve::try_interpolate_catmull_rom(&pts, 2, 0.0, None, None, 1.0e-4).unwrap();
    assert_ne!(with_ghosts, mirrored);
    // both still interpolate the input endpoints
    assert_eq!(with_ghosts.eval(0.0).result(), &[0.0, 0.0]);
    assert_eq!(with_ghosts.eval(1.0).result(), &[1.0, 0.0]);

    // a ghost within epsilon of its endpoint falls back to mirroring
    let degenerate = BSplineCurve::try_interpolate_catmull_rom(
        &pts,
        2,
        0.0,
        Some(&[0.0, 0.0]),
        None,
        1.0e-4,
    )
    .unwrap();
    assert_eq!(degenerate, mirrored);
}

#[test]
fn chordal_and_uniform_parameterizations_differ() {
    // wildly uneven spacing separates alpha = 0 from alpha = 1
    let pts = [0.0, 0.0, 0.1, 0.1, 5.0, 0.0, 5.1, 1.0];
    let uniform =
        BSplineCurve::try_interpolate_catmull_rom(&pts, 2, 0.0, None, None, 1.0e-4).unwrap();
    let chordal =
        BSplineCurve::try_interpolate_catmull_rom(&pts, 2, 1.0, None, None, 1.0e-4).unwrap();
    assert_ne!(uniform, chordal);
    // both interpolate every input point at the segment boundaries
    for curve in [&uniform, &chordal] {
        for (i, p) in pts.chunks(2).enumerate() {
            let net = curve.eval(i as Real / 3.0);
            assert_near!(&net.result()[..2], p);
        }
    }
}

#[test]
fn interpolation_input_validation() {
    assert_eq!(
        BSplineCurve::try_interpolate_cubic_natural(&[], 2),
        Err(Error::InvalidPointCount(0)),
    );
    assert_eq!(
        BSplineCurve::try_interpolate_cubic_natural(&[1.0], 0),
        Err(Error::ZeroDimension),
    );
    assert_eq!(
        BSplineCurve::try_interpolate_cubic_natural(&[1.0, 2.0, 3.0], 2),
        Err(Error::ControlPointsDimensionMismatch(3, 2)),
    );
    let point = BSplineCurve::try_interpolate_cubic_natural(&[4.0, 5.0], 2).unwrap();
    assert_eq!(point.degree(), 0);
    assert_eq!(point.num_control_points(), 1);
    assert_eq!(
        BSplineCurve::try_interpolate_catmull_rom(&[1.0, 2.0], 2, 0.5, Some(&[1.0]), None, 1.0e-4),
        Err(Error::ControlPointsDimensionMismatch(1, 2)),
    );
}
