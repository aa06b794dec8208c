use crate::errors::Error;
use crate::*;
use smallvec::SmallVec;

fn check_point_buffer(points: &[Real], dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(Error::ZeroDimension);
    }
    if points.is_empty() {
        return Err(Error::InvalidPointCount(0));
    }
    if points.len() % dimension != 0 {
        return Err(Error::ControlPointsDimensionMismatch(
            points.len(),
            dimension,
        ));
    }
    Ok(())
}

impl BSplineCurve {
    /// Interpolates the given points, interleaved by coordinate, with a
    /// natural cubic spline: the second derivative vanishes at both ends and
    /// is continuous everywhere in between.
    ///
    /// The tridiagonal system for the second derivatives at the samples is
    /// solved with the Thomas algorithm, and the solution is emitted as the
    /// equivalent chain of cubic Bezier segments: the result has
    /// `max(1, n - 1) * 4` control points and passes through the `i`th input
    /// point at the parameter `i / (n - 1)`.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let curve = BSplineCurve::try_interpolate_cubic_natural(
    ///     &[0.0, 0.0, 1.0, 1.0],
    ///     2,
    /// ).unwrap();
    /// assert_eq!(curve.degree(), 3);
    /// assert_eq!(curve.num_control_points(), 4);
    /// assert_eq!(curve.eval(0.0).result(), &[0.0, 0.0]);
    /// assert_eq!(curve.eval(1.0).result(), &[1.0, 1.0]);
    /// ```
    /// # Failures
    /// * If `dimension == 0`, returns [`Error::ZeroDimension`].
    /// * If `points` is empty, returns [`Error::InvalidPointCount`].
    /// * If the buffer length is not a multiple of `dimension`, returns
    ///   [`Error::ControlPointsDimensionMismatch`].
    pub fn try_interpolate_cubic_natural(points: &[Real], dimension: usize) -> Result<BSplineCurve> {
        check_point_buffer(points, dimension)?;
        let dim = dimension;
        let n = points.len() / dim;
        if n == 1 {
            return Ok(BSplineCurve::point(points));
        }

        // second derivatives at the samples: z[0] = z[n - 1] = 0 and
        // z[i - 1] + 4 z[i] + z[i + 1] = 6 (p[i - 1] - 2 p[i] + p[i + 1])
        let mut z = vec![0.0; n * dim];
        if n > 2 {
            let m = n - 2;
            let mut coef = vec![0.0; m];
            let mut rhs = vec![0.0; m * dim];
            for i in 0..m {
                for c in 0..dim {
                    rhs[i * dim + c] = 6.0
                        * (points[i * dim + c] - 2.0 * points[(i + 1) * dim + c]
                            + points[(i + 2) * dim + c]);
                }
            }
            coef[0] = 1.0 / 4.0;
            for c in 0..dim {
                rhs[c] /= 4.0;
            }
            for i in 1..m {
                let denom = 4.0 - coef[i - 1];
                coef[i] = 1.0 / denom;
                for c in 0..dim {
                    let prev = rhs[(i - 1) * dim + c];
                    rhs[i * dim + c] = (rhs[i * dim + c] - prev) / denom;
                }
            }
            for c in 0..dim {
                z[m * dim + c] = rhs[(m - 1) * dim + c];
            }
            for i in (0..m - 1).rev() {
                for c in 0..dim {
                    z[(i + 1) * dim + c] = rhs[i * dim + c] - coef[i] * z[(i + 2) * dim + c];
                }
            }
        }

        let segments = n - 1;
        let mut ctrl = Vec::with_capacity(segments * 4 * dim);
        for i in 0..segments {
            let p0 = &points[i * dim..(i + 1) * dim];
            let p1 = &points[(i + 1) * dim..(i + 2) * dim];
            ctrl.extend_from_slice(p0);
            for c in 0..dim {
                let delta = (p1[c] - p0[c]) / 3.0;
                ctrl.push(p0[c] + delta - z[i * dim + c] / 9.0 - z[(i + 1) * dim + c] / 18.0);
            }
            for c in 0..dim {
                let delta = (p1[c] - p0[c]) / 3.0;
                ctrl.push(p1[c] - delta - z[i * dim + c] / 18.0 - z[(i + 1) * dim + c] / 9.0);
            }
            ctrl.extend_from_slice(p1);
        }
        BSplineCurve::try_new(KnotVec::beziers_knot(3, segments), ctrl, dim)
    }

    /// Interpolates the given points with a natural cubic spline. See
    /// [`BSplineCurve::try_interpolate_cubic_natural`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_interpolate_cubic_natural` fails.
    #[inline(always)]
    pub fn interpolate_cubic_natural(points: &[Real], dimension: usize) -> BSplineCurve {
        BSplineCurve::try_interpolate_cubic_natural(points, dimension)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Interpolates the given points, interleaved by coordinate, with a
    /// catmull-rom spline emitted as a chain of cubic Bezier segments.
    ///
    /// Consecutive points within `|epsilon|` of each other are filtered out
    /// first; a single surviving point yields the degree-0 point curve. The
    /// two ghost endpoints are taken from `first` and `last` when given (and
    /// passing the same duplicate test), and are mirrored from the boundary
    /// segments otherwise. `alpha` is clamped to `[0, 1]` and controls the
    /// Barry-Goldman knot parameterization: 0 uniform, 0.5 centripetal, 1
    /// chordal.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let curve = BSplineCurve::try_interpolate_catmull_rom(
    ///     &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
    ///     2, 0.5, None, None, 1.0e-4,
    /// ).unwrap();
    /// assert_eq!(curve.degree(), 3);
    /// assert_eq!(curve.num_control_points(), 8);
    /// // the spline starts at the first and ends at the last input point
    /// assert_eq!(curve.eval(0.0).result(), &[0.0, 0.0]);
    /// assert_eq!(curve.eval(1.0).result(), &[2.0, 0.0]);
    /// ```
    pub fn try_interpolate_catmull_rom(
        points: &[Real],
        dimension: usize,
        alpha: Real,
        first: Option<&[Real]>,
        last: Option<&[Real]>,
        epsilon: Real,
    ) -> Result<BSplineCurve> {
        check_point_buffer(points, dimension)?;
        let dim = dimension;
        for ghost in [first, last].into_iter().flatten() {
            if ghost.len() != dim {
                return Err(Error::ControlPointsDimensionMismatch(ghost.len(), dim));
            }
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let epsilon = epsilon.abs();

        // filter consecutive duplicates
        let mut filtered: Vec<Real> = points[..dim].to_vec();
        for p in points.chunks(dim).skip(1) {
            let back = &filtered[filtered.len() - dim..];
            if distance(back, p) > epsilon {
                filtered.extend_from_slice(p);
            }
        }
        let n = filtered.len() / dim;
        if n == 1 {
            return Ok(BSplineCurve::point(&filtered));
        }

        // ghost endpoints: explicit ones undergo the same duplicate test,
        // mirroring the boundary segments is the fallback
        let head: SmallVec<[Real; 4]> = match first {
            Some(f) if distance(f, &filtered[..dim]) > epsilon => SmallVec::from_slice(f),
            _ => (0..dim)
                .map(|c| 2.0 * filtered[c] - filtered[dim + c])
                .collect(),
        };
        let tail: SmallVec<[Real; 4]> = match last {
            Some(l) if distance(l, &filtered[(n - 1) * dim..]) > epsilon => SmallVec::from_slice(l),
            _ => (0..dim)
                .map(|c| 2.0 * filtered[(n - 1) * dim + c] - filtered[(n - 2) * dim + c])
                .collect(),
        };

        let mut extended = Vec::with_capacity((n + 2) * dim);
        extended.extend_from_slice(&head);
        extended.append(&mut filtered);
        extended.extend_from_slice(&tail);

        let segments = n - 1;
        let mut ctrl = Vec::with_capacity(segments * 4 * dim);
        for i in 0..segments {
            let p0 = &extended[i * dim..(i + 1) * dim];
            let p1 = &extended[(i + 1) * dim..(i + 2) * dim];
            let p2 = &extended[(i + 2) * dim..(i + 3) * dim];
            let p3 = &extended[(i + 3) * dim..(i + 4) * dim];
            let t1 = distance(p0, p1).powf(alpha);
            let t2 = t1 + distance(p1, p2).powf(alpha);
            let t3 = t2 + distance(p2, p3).powf(alpha);
            // Barry-Goldman tangents at p1 and p2, scaled to the segment
            ctrl.extend_from_slice(p1);
            for c in 0..dim {
                let m1 = (t2 - t1)
                    * ((p1[c] - p0[c]) / t1 - (p2[c] - p0[c]) / t2
                        + (p2[c] - p1[c]) / (t2 - t1));
                ctrl.push(p1[c] + m1 / 3.0);
            }
            for c in 0..dim {
                let m2 = (t2 - t1)
                    * ((p2[c] - p1[c]) / (t2 - t1) - (p3[c] - p1[c]) / (t3 - t1)
                        + (p3[c] - p2[c]) / (t3 - t2));
                ctrl.push(p2[c] - m2 / 3.0);
            }
            ctrl.extend_from_slice(p2);
        }
        BSplineCurve::try_new(KnotVec::beziers_knot(3, segments), ctrl, dim)
    }

    /// Interpolates the given points with a catmull-rom spline. See
    /// [`BSplineCurve::try_interpolate_catmull_rom`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_interpolate_catmull_rom` fails.
    #[inline(always)]
    pub fn interpolate_catmull_rom(
        points: &[Real],
        dimension: usize,
        alpha: Real,
        first: Option<&[Real]>,
        last: Option<&[Real]>,
        epsilon: Real,
    ) -> BSplineCurve {
        BSplineCurve::try_interpolate_catmull_rom(points, dimension, alpha, first, last, epsilon)
            .unwrap_or_else(|e| panic!("{}", e))
    }
}
