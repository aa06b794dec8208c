use arcus_geometry::errors::Error;
use arcus_geometry::*;
use proptest::prelude::*;

fn parabola() -> BSplineCurve {
    BSplineCurve::new(
        KnotVec::bezier_knot(2),
        vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        2,
    )
}

#[test]
fn evaluation_walks_the_triangular_net() {
    let net = parabola().eval(0.5);
    assert_eq!(net.knot(), 0.5);
    assert_eq!(net.index(), 2);
    assert_eq!(net.multiplicity(), 0);
    assert_eq!(net.num_insertions(), 2);
    assert_eq!(net.dimension(), 2);
    assert_eq!(net.num_points(), 6);
    assert_eq!(net.num_result(), 1);
    assert_eq!(net.result(), &[0.0, 0.5]);
    // level 0 is the copied control polygon
    assert_eq!(&net.points()[..6], &[-1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    // level 1 holds the first blends, the apex is the result
    assert_eq!(&net.points()[6..10], &[-0.5, 0.5, 0.5, 0.5]);
    assert_eq!(&net.points()[10..], net.result());
}

#[test]
fn full_multiplicity_at_the_boundaries_returns_the_end_control_points() {
    let curve = parabola();
    let front = curve.eval(0.0);
    assert_eq!(front.num_result(), 1);
    assert_eq!(front.num_insertions(), 0);
    assert_eq!(front.result(), &[-1.0, 0.0]);
    let back = curve.eval(1.0);
    assert_eq!(back.result(), &[1.0, 0.0]);

    // values within the knot tolerance of a boundary are clamped onto it
    assert_eq!(curve.eval(1.0 + 0.5e-4).knot(), 1.0);
    assert_eq!(curve.eval(-0.5e-4).knot(), 0.0);
    assert_eq!(curve.try_eval(1.1), Err(Error::UndefinedKnot(1.1)));
    assert_eq!(curve.try_eval(-0.1), Err(Error::UndefinedKnot(-0.1)));
}

#[test]
fn discontinuities_expose_both_adjacent_control_points() {
    // a degree-0 step curve is discontinuous at its interior knot
    let step = BSplineCurve::new(
        KnotVec::try_from(vec![0.0, 0.5, 1.0]).unwrap(),
        vec![1.0, 2.0],
        1,
    );
    let net = step.eval(0.5);
    assert_eq!(net.num_result(), 2);
    assert_eq!(net.num_insertions(), 0);
    assert_eq!(net.result(), &[1.0, 2.0]);

    // a split curve carries an internal knot of full multiplicity; both
    // result points coincide because the curve is continuous there
    let mut split = parabola();
    split.try_split(0.5).unwrap();
    let net = split.eval(0.5);
    assert_eq!(net.num_result(), 2);
    assert_eq!(net.result()[..2], net.result()[2..]);
    assert_eq!(&net.result()[..2], &[0.0, 0.5]);
}

#[test]
fn eval_all_and_sample() {
    let curve = parabola();
    let us = [0.0, 0.25, 0.5, 1.0];
    let pts = curve.try_eval_all(&us).unwrap();
    assert_eq!(pts.len(), 8);
    for (i, &u) in us.iter().enumerate() {
        let net = curve.eval(u);
        assert_eq!(&pts[i * 2..(i + 1) * 2], &net.result()[..2]);
    }

    let samples = curve.try_sample(5).unwrap();
    assert_eq!(samples.len(), 10);
    assert_eq!(&samples[..2], &[-1.0, 0.0]);
    assert_eq!(&samples[8..], &[1.0, 0.0]);

    // the 0-fallback takes 30 samples per bezier span
    assert_eq!(curve.try_sample(0).unwrap().len(), 30 * 2);
    // a single sample sits at the lower domain bound
    assert_eq!(curve.try_sample(1).unwrap(), vec![-1.0, 0.0]);
}

#[test]
fn bisection_finds_monotone_components() {
    // the parabola's x component is 2t - 1, strictly ascending
    let curve = parabola();
    let net = curve.try_bisect(0.0, 1.0e-9, true, 0, true, 60).unwrap();
    assert_near!(net.knot(), 0.5);
    assert_near!(net.result()[1], 0.5);

    let net = curve.try_bisect(-0.5, 1.0e-9, true, 0, true, 60).unwrap();
    assert_near!(net.knot(), 0.25);

    assert_eq!(
        curve.try_bisect(0.0, 1.0e-9, true, 5, true, 30),
        Err(Error::IndexOutOfRange(5, 2)),
    );
    // unreachable value: persnickety fails, lenient returns the best net
    assert_eq!(
        curve.try_bisect(9.0, 1.0e-9, true, 0, true, 30),
        Err(Error::NoResult),
    );
    let best = curve.try_bisect(9.0, 1.0e-9, false, 0, true, 30).unwrap();
    assert!(best.result()[0] <= 1.0);
}

proptest! {
    #[test]
    fn de_boor_matches_the_basis_function_expansion(
        degree in 1usize..=4,
        division in 1usize..=4,
        // odd multiples of 1/128 stay clear of every interior knot
        t_idx in 0usize..64,
        coords in prop::collection::vec(-10.0..10.0, 16),
    ) {
        let t = (2 * t_idx + 1) as Real / 128.0;
        let dim = 2;
        let n = degree + division;
        let knot_vec = KnotVec::uniform_knot(degree, division);
        let curve = BSplineCurve::new(knot_vec.clone(), coords[..n * dim].to_vec(), dim);
        let basis = knot_vec.try_bspline_basis_functions(degree, t).unwrap();
        let mut expected = [0.0; 2];
        for (i, b) in basis.iter().enumerate() {
            for (c, acc) in expected.iter_mut().enumerate() {
                *acc += b * curve.control_point(i)[c];
            }
        }
        let net = curve.eval(t);
        prop_assert_near!(&net.result()[..dim], &expected[..]);
    }
}
