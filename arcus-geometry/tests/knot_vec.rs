use arcus_geometry::errors::Error;
use arcus_geometry::*;
use proptest::prelude::*;

#[test]
fn generation_styles_fit_their_invariants() {
    let opened = KnotVec::opened_knot(2, 4);
    assert_eq!(opened.len(), 7);
    assert!(opened.validate(2).is_ok());

    let clamped = KnotVec::uniform_knot(3, 4);
    assert!(clamped.is_clamped(3));
    assert!(clamped.validate(3).is_ok());

    let beziers = KnotVec::beziers_knot(2, 3);
    assert_eq!(beziers.len(), 12);
    assert_eq!(beziers.multiplicity(1.0 / 3.0), 3);
    assert!(beziers.validate(2).is_ok());
}

#[test]
fn fuzzy_queries() {
    let knot_vec = KnotVec::try_from(vec![0.0, 0.0, 0.5, 0.5 + 0.5e-4, 1.0, 1.0]).unwrap();
    // the two middle knots are indistinguishable on knot space
    assert_eq!(knot_vec.multiplicity(0.5), 2);
    assert_eq!(knot_vec.floor(0.5), Some(3));
    let (vals, mults) = knot_vec.to_single_multi();
    assert_eq!(vals.len(), 3);
    assert_eq!(mults, vec![2, 2, 2]);
}

#[test]
fn validation_rejects_broken_vectors() {
    assert_eq!(
        KnotVec::try_from(vec![1.0, 0.0]),
        Err(Error::DecreasingKnotVector),
    );
    let capped = KnotVec::try_from(vec![0.0, 0.0, 0.0, 1.0]).unwrap();
    assert_eq!(capped.validate(1), Err(Error::TooLargeMultiplicity(3, 2)));

    let too_many = KnotVec::from_single_multi(vec![0.0, 1.0], vec![5000, 5001]).unwrap();
    assert_eq!(too_many.validate(5001), Err(Error::TooManyKnots(10_001)));
}

#[test]
fn single_multi_round_trip() {
    let knot_vec = KnotVec::try_from(vec![0.0, 0.0, 0.25, 0.5, 0.5, 1.0, 1.0]).unwrap();
    let (vals, mults) = knot_vec.to_single_multi();
    assert_eq!(KnotVec::from_single_multi(vals, mults).unwrap(), knot_vec);
}

proptest! {
    #[test]
    fn basis_functions_are_a_partition_of_unity(
        degree in 1usize..=5,
        division in 1usize..=5,
        t in 0.0..=1.0,
    ) {
        let knot_vec = KnotVec::uniform_knot(degree, division);
        let basis = knot_vec.try_bspline_basis_functions(degree, t).unwrap();
        prop_assert_eq!(basis.len(), degree + division);
        let sum: Real = basis.iter().sum();
        prop_assert_near!(sum, 1.0);
    }
}
