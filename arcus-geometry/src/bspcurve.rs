use crate::errors::Error;
use crate::*;

impl BSplineCurve {
    /// constructor.
    /// # Arguments
    /// * `knot_vec` - the knot vector
    /// * `control_points` - the control polygon, interleaved by coordinate
    /// * `dimension` - the dimension of each control point
    /// # Panics
    /// Panic occurs if the arguments violate any invariant checked by
    /// [`BSplineCurve::try_new`].
    pub fn new(knot_vec: KnotVec, control_points: Vec<Real>, dimension: usize) -> BSplineCurve {
        BSplineCurve::try_new(knot_vec, control_points, dimension)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// constructor.
    /// # Arguments
    /// * `knot_vec` - the knot vector
    /// * `control_points` - the control polygon, interleaved by coordinate
    /// * `dimension` - the dimension of each control point
    /// # Failures
    /// * If `dimension == 0`, returns [`Error::ZeroDimension`].
    /// * If the buffer length is zero or not a multiple of `dimension`,
    ///   returns [`Error::ControlPointsDimensionMismatch`].
    /// * If there are fewer knots than control points + 1, returns
    ///   [`Error::InvalidKnotCount`].
    /// * If the derived degree reaches the number of control points, returns
    ///   [`Error::TooLargeDegree`].
    /// * Any failure of [`KnotVec::validate`] is passed through.
    pub fn try_new(
        knot_vec: KnotVec,
        control_points: Vec<Real>,
        dimension: usize,
    ) -> Result<BSplineCurve> {
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        if control_points.is_empty() || control_points.len() % dimension != 0 {
            return Err(Error::ControlPointsDimensionMismatch(
                control_points.len(),
                dimension,
            ));
        }
        let n = control_points.len() / dimension;
        if knot_vec.len() < n + 1 {
            return Err(Error::InvalidKnotCount(n + 1, knot_vec.len()));
        }
        let degree = knot_vec.len() - n - 1;
        if degree >= n {
            return Err(Error::TooLargeDegree(degree, n));
        }
        knot_vec.validate(degree)?;
        Ok(BSplineCurve::new_unchecked(knot_vec, control_points, dimension))
    }

    /// constructor.
    /// # Remarks
    /// This method does NOT check the invariants of B-spline curves. The
    /// caller must guarantee them before using this method.
    #[inline(always)]
    pub const fn new_unchecked(
        knot_vec: KnotVec,
        control_points: Vec<Real>,
        dimension: usize,
    ) -> BSplineCurve {
        BSplineCurve {
            knot_vec,
            control_points,
            dimension,
        }
    }

    /// constructor.
    /// # Remarks
    /// This method checks the invariants of B-spline curves in the debug
    /// mode. The caller must guarantee them before using this method.
    #[inline(always)]
    pub fn debug_new(
        knot_vec: KnotVec,
        control_points: Vec<Real>,
        dimension: usize,
    ) -> BSplineCurve {
        match cfg!(debug_assertions) {
            true => Self::new(knot_vec, control_points, dimension),
            false => Self::new_unchecked(knot_vec, control_points, dimension),
        }
    }

    /// Creates a curve with `num_control_points` zeroed control points and a
    /// generated knot vector of the requested style.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let curve = BSplineCurve::try_with_style(4, 2, 2, KnotStyle::Clamped).unwrap();
    /// assert_eq!(curve.degree(), 2);
    /// assert_eq!(curve.knot_vec().as_slice(), &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
    /// assert!(curve.control_points().iter().all(|x| *x == 0.0));
    /// ```
    /// # Failures
    /// * If `dimension == 0`, returns [`Error::ZeroDimension`].
    /// * If `degree >= num_control_points`, returns [`Error::TooLargeDegree`].
    /// * If the style is [`KnotStyle::Beziers`] and `num_control_points` is
    ///   not a multiple of the order, returns [`Error::InvalidPointCount`].
    pub fn try_with_style(
        num_control_points: usize,
        dimension: usize,
        degree: usize,
        style: KnotStyle,
    ) -> Result<BSplineCurve> {
        if dimension == 0 {
            return Err(Error::ZeroDimension);
        }
        if degree >= num_control_points {
            return Err(Error::TooLargeDegree(degree, num_control_points));
        }
        let order = degree + 1;
        let knot_vec = match style {
            KnotStyle::Opened => KnotVec::opened_knot(degree, num_control_points),
            KnotStyle::Clamped => KnotVec::uniform_knot(degree, num_control_points - degree),
            KnotStyle::Beziers => {
                if num_control_points % order != 0 {
                    return Err(Error::InvalidPointCount(num_control_points));
                }
                KnotVec::beziers_knot(degree, num_control_points / order)
            }
        };
        BSplineCurve::try_new(knot_vec, vec![0.0; num_control_points * dimension], dimension)
    }

    /// Creates the degenerate "point" curve: degree 0, one control point,
    /// knot vector `[0, 1]`.
    /// # Panics
    /// Panic occurs if `coords` is empty.
    pub fn point(coords: &[Real]) -> BSplineCurve {
        assert!(!coords.is_empty(), "{}", Error::ZeroDimension);
        BSplineCurve {
            knot_vec: KnotVec(vec![0.0, 1.0]),
            control_points: coords.to_vec(),
            dimension: coords.len(),
        }
    }

    /// Returns the reference of the knot vector
    #[inline(always)]
    pub fn knot_vec(&self) -> &KnotVec { &self.knot_vec }

    /// Returns the `idx`th knot
    #[inline(always)]
    pub fn knot(&self, idx: usize) -> Real { self.knot_vec[idx] }

    /// Returns the number of knots
    #[inline(always)]
    pub fn num_knots(&self) -> usize { self.knot_vec.len() }

    /// Returns the interleaved control-point buffer.
    #[inline(always)]
    pub fn control_points(&self) -> &[Real] { &self.control_points }

    /// Returns the control point corresponding to the index `idx`.
    /// # Panics
    /// Panic occurs if `idx` is out of range.
    #[inline(always)]
    pub fn control_point(&self, idx: usize) -> &[Real] {
        &self.control_points[idx * self.dimension..(idx + 1) * self.dimension]
    }

    /// Returns the dimension of each control point
    #[inline(always)]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Returns the number of control points
    #[inline(always)]
    pub fn num_control_points(&self) -> usize { self.control_points.len() / self.dimension }

    /// Returns the degree of the B-spline curve
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let ctrl_pts = vec![1.0, 2.0, 2.0, 3.0, 3.0, 4.0];
    /// let curve = BSplineCurve::new(knot_vec, ctrl_pts, 2);
    /// assert_eq!(curve.degree(), 2);
    /// ```
    #[inline(always)]
    pub fn degree(&self) -> usize { self.knot_vec.len() - self.num_control_points() - 1 }

    /// Returns the order, i.e. the degree + 1. No knot may occur more often
    /// than the order.
    #[inline(always)]
    pub fn order(&self) -> usize { self.degree() + 1 }

    /// Returns the closed domain `[knots[degree], knots[num_control_points]]`
    /// on which the curve is defined.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let curve = BSplineCurve::try_with_style(3, 1, 2, KnotStyle::Opened).unwrap();
    /// let (min, max) = curve.domain();
    /// assert_eq!((min, max), (0.4, 0.6));
    /// ```
    #[inline(always)]
    pub fn domain(&self) -> (Real, Real) {
        let degree = self.degree();
        (
            self.knot_vec[degree],
            self.knot_vec[self.knot_vec.len() - degree - 1],
        )
    }

    /// Returns whether the knot vector is clamped or not.
    #[inline(always)]
    pub fn is_clamped(&self) -> bool { self.knot_vec.is_clamped(self.degree()) }

    /// Overwrites the `idx`th knot, re-validating monotonicity and the
    /// multiplicity cap. On failure the curve is left unchanged.
    pub fn try_set_knot(&mut self, idx: usize, value: Real) -> Result<()> {
        if idx >= self.knot_vec.len() {
            return Err(Error::IndexOutOfRange(idx, self.knot_vec.len()));
        }
        let old = self.knot_vec.0[idx];
        self.knot_vec.0[idx] = value;
        if let Err(error) = self.knot_vec.validate(self.degree()) {
            self.knot_vec.0[idx] = old;
            return Err(error);
        }
        Ok(())
    }

    /// Replaces the whole knot vector, re-validating every invariant. The
    /// number of knots must not change. On failure the curve is left
    /// unchanged.
    pub fn try_set_knots(&mut self, knot_vec: KnotVec) -> Result<()> {
        if knot_vec.len() != self.knot_vec.len() {
            return Err(Error::InvalidKnotCount(self.knot_vec.len(), knot_vec.len()));
        }
        knot_vec.validate(self.degree())?;
        self.knot_vec = knot_vec;
        Ok(())
    }

    /// Overwrites the control point corresponding to the index `idx`.
    pub fn try_set_control_point(&mut self, idx: usize, point: &[Real]) -> Result<()> {
        if point.len() != self.dimension {
            return Err(Error::ControlPointsDimensionMismatch(
                point.len(),
                self.dimension,
            ));
        }
        let n = self.num_control_points();
        if idx >= n {
            return Err(Error::IndexOutOfRange(idx, n));
        }
        let dim = self.dimension;
        self.control_points[idx * dim..(idx + 1) * dim].copy_from_slice(point);
        Ok(())
    }

    /// Replaces the whole control-point buffer. The number of control points
    /// must not change.
    pub fn try_set_control_points(&mut self, control_points: Vec<Real>) -> Result<()> {
        if control_points.len() % self.dimension != 0 {
            return Err(Error::ControlPointsDimensionMismatch(
                control_points.len(),
                self.dimension,
            ));
        }
        if control_points.len() != self.control_points.len() {
            return Err(Error::InvalidPointCount(
                control_points.len() / self.dimension,
            ));
        }
        self.control_points = control_points;
        Ok(())
    }

    /// Applies the given transformation to all control points.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let mut curve = BSplineCurve::new(
    ///     KnotVec::bezier_knot(1),
    ///     vec![1.0, 2.0, 3.0, 4.0],
    ///     2,
    /// );
    /// curve.transform_control_points(|pt| pt[1] = -pt[1]);
    /// assert_eq!(curve.control_points(), &[1.0, -2.0, 3.0, -4.0]);
    /// ```
    #[inline(always)]
    pub fn transform_control_points<F: FnMut(&mut [Real])>(&mut self, f: F) {
        let dimension = self.dimension;
        self.control_points.chunks_mut(dimension).for_each(f)
    }

    /// Inserts the knot `u` into the knot vector `num` additional times
    /// without changing the curve, and returns the index of the last
    /// occurrence of `u` in the new knot vector.
    ///
    /// The control polygon is updated by the Boehm identity: the points
    /// `i = k - degree + 1 ..= k - s` are replaced by the affine blends with
    /// weight `(u - knots[i]) / (knots[i + degree] - knots[i])`.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let mut curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let k = curve.try_insert_knot(0.5, 1).unwrap();
    /// assert_eq!(k, 3);
    /// assert_eq!(
    ///     curve.knot_vec().as_slice(),
    ///     &[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0],
    /// );
    /// assert_eq!(
    ///     curve.control_points(),
    ///     &[-1.0, 0.0, -0.5, 0.5, 0.5, 0.5, 1.0, 0.0],
    /// );
    /// ```
    /// # Failures
    /// * If `u` lies outside the domain, returns [`Error::UndefinedKnot`].
    /// * If the resulting multiplicity would exceed the order, returns
    ///   [`Error::TooLargeMultiplicity`].
    /// * If the knot vector would outgrow [`MAX_NUM_KNOTS`], returns
    ///   [`Error::TooManyKnots`].
    pub fn try_insert_knot(&mut self, u: Real, num: usize) -> Result<usize> {
        let u = self.clamp_to_domain(u)?;
        let order = self.order();
        let s = self.knot_vec.multiplicity(u);
        if s + num > order {
            return Err(Error::TooLargeMultiplicity(s + num, order));
        }
        if self.knot_vec.len() + num > MAX_NUM_KNOTS {
            return Err(Error::TooManyKnots(self.knot_vec.len() + num));
        }
        for _ in 0..num {
            self.insert_knot_once(u);
        }
        Ok(self.knot_vec.floor(u).unwrap())
    }

    /// Inserts the knot `u` `num` additional times. See
    /// [`BSplineCurve::try_insert_knot`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_insert_knot` fails.
    #[inline(always)]
    pub fn insert_knot(&mut self, u: Real, num: usize) -> &mut Self {
        self.try_insert_knot(u, num)
            .unwrap_or_else(|e| panic!("{}", e));
        self
    }

    fn insert_knot_once(&mut self, u: Real) {
        let degree = self.degree();
        let dim = self.dimension;
        let k = self.knot_vec.floor(u).unwrap();
        let s = self.knot_vec.multiplicity(u);
        let n = self.num_control_points();

        let mut new_points = Vec::with_capacity((n + 1) * dim);
        new_points.extend_from_slice(&self.control_points[..(k - degree + 1) * dim]);
        for i in (k - degree + 1)..=(k - s) {
            let delta = self.knot_vec[i + degree] - self.knot_vec[i];
            let alpha = (u - self.knot_vec[i]) * inv_or_zero(delta);
            for c in 0..dim {
                let a = self.control_points[(i - 1) * dim + c];
                let b = self.control_points[i * dim + c];
                new_points.push((1.0 - alpha) * a + alpha * b);
            }
        }
        new_points.extend_from_slice(&self.control_points[(k - s) * dim..]);
        self.control_points = new_points;
        self.knot_vec.add_knot(u);
    }

    /// Raises the multiplicity of `u` to the order of the curve, and returns
    /// the index of the last occurrence of `u` in the new knot vector. At the
    /// domain endpoints this is a no-op returning the endpoint's index.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let mut curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let k = curve.try_split(0.5).unwrap();
    /// assert_eq!(k, 5);
    /// assert_eq!(
    ///     curve.knot_vec().as_slice(),
    ///     &[0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0],
    /// );
    /// assert_eq!(curve.num_control_points(), 6);
    /// ```
    pub fn try_split(&mut self, u: Real) -> Result<usize> {
        let u = self.clamp_to_domain(u)?;
        let (min, max) = self.domain();
        if knots_equal(u, min) || knots_equal(u, max) {
            return Ok(self.knot_vec.floor(u).unwrap());
        }
        let s = self.knot_vec.multiplicity(u);
        self.try_insert_knot(u, self.order() - s)
    }

    /// Raises the multiplicity of `u` to the order of the curve. See
    /// [`BSplineCurve::try_split`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_split` fails.
    #[inline(always)]
    pub fn split(&mut self, u: Real) -> usize {
        self.try_split(u).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Clamps `u` to the domain when it lies within [`KNOT_EPSILON`] of a
    /// boundary, and rejects it with [`Error::UndefinedKnot`] otherwise.
    pub(crate) fn clamp_to_domain(&self, u: Real) -> Result<Real> {
        let (min, max) = self.domain();
        if u < min {
            match knots_equal(u, min) {
                true => Ok(min),
                false => Err(Error::UndefinedKnot(u)),
            }
        } else if u > max {
            match knots_equal(u, max) {
                true => Ok(max),
                false => Err(Error::UndefinedKnot(u)),
            }
        } else {
            Ok(u)
        }
    }

    /// Makes the knot vector clamped on the domain: both domain endpoints are
    /// raised to full multiplicity and the knots and control points outside
    /// the domain are discarded. The curve is unchanged on its domain.
    fn clamp_domain(&mut self) -> Result<()> {
        let order = self.order();
        let dim = self.dimension;

        let (min, _) = self.domain();
        let s = self.knot_vec.multiplicity(min);
        if s < order {
            let k = self.try_insert_knot(min, order - s)?;
            let superfluous = k + 1 - order;
            if superfluous > 0 {
                self.knot_vec = self.knot_vec.sub_vec(superfluous..);
                self.control_points.drain(..superfluous * dim);
            }
        }

        let (_, max) = self.domain();
        let s = self.knot_vec.multiplicity(max);
        if s < order {
            let k = self.try_insert_knot(max, order - s)?;
            if k + 1 < self.knot_vec.len() {
                self.knot_vec = self.knot_vec.sub_vec(..=k);
                self.control_points.truncate((k + 1 - order) * dim);
            }
        }
        Ok(())
    }

    /// Decomposes the curve into a chain of Bezier segments: both domain
    /// endpoints and every distinct interior knot are raised to full
    /// multiplicity. The result has `order * segments` control points and
    /// coincides with `self` on the whole domain.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(
    ///     vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]
    /// ).unwrap();
    /// let ctrl_pts = vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 1.0, 4.0, 0.0];
    /// let curve = BSplineCurve::new(knot_vec, ctrl_pts, 2);
    /// let beziers = curve.try_to_beziers().unwrap();
    /// assert_eq!(beziers.num_control_points(), 8);
    /// assert_eq!(
    ///     beziers.knot_vec().as_slice(),
    ///     &[0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn try_to_beziers(&self) -> Result<BSplineCurve> {
        let mut bezier = self.clone();
        bezier.clamp_domain()?;
        let (knots, _) = bezier.knot_vec.to_single_multi();
        for u in &knots[1..knots.len() - 1] {
            bezier.try_split(*u)?;
        }
        Ok(bezier)
    }

    /// Decomposes the curve into a chain of Bezier segments. See
    /// [`BSplineCurve::try_to_beziers`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_to_beziers` fails.
    #[inline(always)]
    pub fn to_beziers(&self) -> BSplineCurve {
        self.try_to_beziers().unwrap_or_else(|e| panic!("{}", e))
    }

    /// Returns the `n`th derivative of the curve.
    ///
    /// Internal knots of full multiplicity are merged into a single point
    /// before each derivation when the flanking control points lie within
    /// `epsilon` of each other (this heals Bezier-decomposed curves). When
    /// they disagree by more than `epsilon` the curve is discontinuous there
    /// and [`Error::Underivable`] is returned. A negative `epsilon`
    /// suppresses the check and takes the left flanking point.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// // the clamped parabola through (-1, 0), (0, 1), (1, 0)
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let derived = curve.try_derive(1, POINT_EPSILON).unwrap();
    /// assert_eq!(derived.degree(), 1);
    /// assert_eq!(derived.knot_vec().as_slice(), &[0.0, 0.0, 1.0, 1.0]);
    /// assert_eq!(derived.control_points(), &[2.0, 2.0, 2.0, -2.0]);
    /// ```
    pub fn try_derive(&self, n: usize, epsilon: Real) -> Result<BSplineCurve> {
        let mut curve = self.clone();
        for _ in 0..n {
            curve = curve.derive_once(epsilon)?;
        }
        Ok(curve)
    }

    /// Returns the `n`th derivative of the curve. See
    /// [`BSplineCurve::try_derive`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_derive` fails.
    #[inline(always)]
    pub fn derive(&self, n: usize, epsilon: Real) -> BSplineCurve {
        self.try_derive(n, epsilon).unwrap_or_else(|e| panic!("{}", e))
    }

    fn derive_once(&self, epsilon: Real) -> Result<BSplineCurve> {
        let degree = self.degree();
        let dim = self.dimension;
        if degree == 0 {
            // the derivative of a point is the zero point of the same dimension
            let (min, max) = self.domain();
            return Ok(BSplineCurve {
                knot_vec: KnotVec(vec![min, max]),
                control_points: vec![0.0; dim],
                dimension: dim,
            });
        }

        let order = degree + 1;
        let mut curve = self.clone();
        let (min, max) = curve.domain();
        loop {
            let (vals, mults) = curve.knot_vec.to_single_multi();
            let full = vals
                .iter()
                .zip(mults)
                .find(|(v, m)| *m >= order && !knots_equal(**v, min) && !knots_equal(**v, max));
            let u = match full {
                Some((u, _)) => *u,
                None => break,
            };
            let k = curve.knot_vec.floor(u).unwrap();
            let left = k - order;
            let right = k - degree;
            if epsilon >= 0.0
                && distance(curve.control_point(left), curve.control_point(right)) > epsilon
            {
                return Err(Error::Underivable(u));
            }
            curve.control_points.drain(right * dim..(right + 1) * dim);
            curve.knot_vec.remove(k);
        }

        let n = curve.num_control_points();
        let knots = &curve.knot_vec;
        let mut new_points = Vec::with_capacity((n - 1) * dim);
        for i in 0..(n - 1) {
            let delta = knots[i + degree + 1] - knots[i + 1];
            let coef = degree as Real * inv_or_zero(delta);
            for c in 0..dim {
                let a = curve.control_points[i * dim + c];
                let b = curve.control_points[(i + 1) * dim + c];
                new_points.push((b - a) * coef);
            }
        }
        let knot_vec = curve.knot_vec.sub_vec(1..curve.knot_vec.len() - 1);
        Ok(BSplineCurve {
            knot_vec,
            control_points: new_points,
            dimension: dim,
        })
    }

    /// Straightens the curve: every control point is blended with the
    /// chord-line interpolant between the first and the last control point by
    /// the factor `1 - t`. `t == 1` is the identity; `t == 0` yields the
    /// chord line. `t` is clamped to `[0, 1]`.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let line = curve.tension(0.0);
    /// assert_eq!(line.control_points(), &[-1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    /// assert_eq!(curve.tension(1.0), curve);
    /// ```
    pub fn tension(&self, t: Real) -> BSplineCurve {
        let t = t.clamp(0.0, 1.0);
        let dim = self.dimension;
        let n = self.num_control_points();
        let first = self.control_point(0);
        let last = self.control_point(n - 1);
        let mut control_points = Vec::with_capacity(n * dim);
        for i in 0..n {
            let fraction = match n > 1 {
                true => i as Real / (n - 1) as Real,
                false => 0.0,
            };
            for c in 0..dim {
                let on_line = first[c] + fraction * (last[c] - first[c]);
                control_points.push(t * self.control_points[i * dim + c] + (1.0 - t) * on_line);
            }
        }
        BSplineCurve {
            knot_vec: self.knot_vec.clone(),
            control_points,
            dimension: dim,
        }
    }

    /// Elevates the degree of the curve by `amount` without changing its
    /// shape.
    ///
    /// Each elevation decomposes the curve into Bezier segments, elevates
    /// every segment by one degree, and merges adjacent segments whose shared
    /// endpoints lie within `epsilon`. Non-matching endpoints are preserved
    /// as true discontinuities, i.e. knots of full multiplicity.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// let curve = BSplineCurve::new(knot_vec, vec![0.0, 0.0, 1.0, 1.0], 2);
    /// let elevated = curve.try_elevate_degree(1, POINT_EPSILON).unwrap();
    /// assert_eq!(elevated.degree(), 2);
    /// assert_eq!(elevated.knot_vec(), &KnotVec::bezier_knot(2));
    /// assert_eq!(elevated.control_points(), &[0.0, 0.0, 0.5, 0.5, 1.0, 1.0]);
    /// ```
    pub fn try_elevate_degree(&self, amount: usize, epsilon: Real) -> Result<BSplineCurve> {
        let mut curve = self.clone();
        for _ in 0..amount {
            curve = curve.elevate_degree_once(epsilon)?;
        }
        Ok(curve)
    }

    /// Elevates the degree of the curve by `amount`. See
    /// [`BSplineCurve::try_elevate_degree`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_elevate_degree` fails.
    #[inline(always)]
    pub fn elevate_degree(&self, amount: usize, epsilon: Real) -> BSplineCurve {
        self.try_elevate_degree(amount, epsilon)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    fn elevate_degree_once(&self, epsilon: Real) -> Result<BSplineCurve> {
        let degree = self.degree();
        let order = degree + 1;
        let dim = self.dimension;
        let bezier = self.try_to_beziers()?;
        let segments = bezier.num_control_points() / order;
        let (vals, _) = bezier.knot_vec.to_single_multi();

        // per-segment elevation: Q_i = (i / (deg + 1)) P_{i-1} + (1 - i / (deg + 1)) P_i
        let mut elevated = Vec::with_capacity(segments);
        for seg in 0..segments {
            let p = &bezier.control_points[seg * order * dim..(seg + 1) * order * dim];
            let mut q = Vec::with_capacity((order + 1) * dim);
            q.extend_from_slice(&p[..dim]);
            for i in 1..=degree {
                let a = i as Real / order as Real;
                for c in 0..dim {
                    q.push(a * p[(i - 1) * dim + c] + (1.0 - a) * p[i * dim + c]);
                }
            }
            q.extend_from_slice(&p[(order - 1) * dim..]);
            elevated.push(q);
        }

        let new_order = order + 1;
        let mut mults = Vec::with_capacity(segments + 1);
        let mut control_points: Vec<Real> = Vec::new();
        mults.push(new_order);
        control_points.extend_from_slice(&elevated[0]);
        for seg in 1..segments {
            let q = &elevated[seg];
            let shared = &control_points[control_points.len() - dim..];
            if distance(shared, &q[..dim]) <= epsilon {
                mults.push(new_order - 1);
                control_points.extend_from_slice(&q[dim..]);
            } else {
                mults.push(new_order);
                control_points.extend_from_slice(q);
            }
        }
        mults.push(new_order);
        let knot_vec = KnotVec::from_single_multi(vals, mults)?;
        BSplineCurve::try_new(knot_vec, control_points, dim)
    }

    /// Equalizes the degrees and the knot vectors of two curves so that
    /// morphing becomes pointwise: the lower-degree curve is elevated
    /// (`epsilon` is the merging tolerance of the elevation), then every knot
    /// one curve misses relative to the other is inserted. Neither curve
    /// changes its shape.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let mut line = BSplineCurve::new(KnotVec::bezier_knot(1), vec![0.0, 0.0, 2.0, 2.0], 2);
    /// let mut arc = BSplineCurve::new(
    ///     KnotVec::bezier_knot(2),
    ///     vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0],
    ///     2,
    /// );
    /// line.try_align(&mut arc, POINT_EPSILON).unwrap();
    /// assert_eq!(line.degree(), arc.degree());
    /// assert_eq!(line.knot_vec(), arc.knot_vec());
    /// assert_eq!(line.num_control_points(), arc.num_control_points());
    /// ```
    pub fn try_align(&mut self, other: &mut BSplineCurve, epsilon: Real) -> Result<()> {
        if self.degree() < other.degree() {
            *self = self.try_elevate_degree(other.degree() - self.degree(), epsilon)?;
        } else if other.degree() < self.degree() {
            *other = other.try_elevate_degree(self.degree() - other.degree(), epsilon)?;
        }

        let (vals0, mults0) = self.knot_vec.to_single_multi();
        let (vals1, mults1) = other.knot_vec.to_single_multi();
        let (mut i, mut j) = (0, 0);
        while i < vals0.len() || j < vals1.len() {
            if j == vals1.len() {
                other.try_insert_knot(vals0[i], mults0[i])?;
                i += 1;
            } else if i == vals0.len() {
                self.try_insert_knot(vals1[j], mults1[j])?;
                j += 1;
            } else if knots_equal(vals0[i], vals1[j]) {
                if mults0[i] > mults1[j] {
                    other.try_insert_knot(vals1[j], mults0[i] - mults1[j])?;
                } else if mults1[j] > mults0[i] {
                    self.try_insert_knot(vals0[i], mults1[j] - mults0[i])?;
                }
                i += 1;
                j += 1;
            } else if vals0[i] < vals1[j] {
                other.try_insert_knot(vals0[i], mults0[i])?;
                i += 1;
            } else {
                self.try_insert_knot(vals1[j], mults1[j])?;
                j += 1;
            }
        }
        Ok(())
    }

    /// Interpolates between two curves: the result's control points and knots
    /// are the pointwise blends `(1 - t) * start + t * end`. `t` is clamped
    /// to `[0, 1]`. When the curves are not already aligned (same degree,
    /// same number of knots and control points), aligned clones are blended
    /// instead; `self` and `end` are never modified.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let line = curve.tension(0.0);
    /// let middle = curve.try_morph(&line, 0.5, POINT_EPSILON).unwrap();
    /// assert_eq!(middle.control_points(), &[-1.0, 0.0, 0.0, 0.5, 1.0, 0.0]);
    /// assert_eq!(curve.try_morph(&line, 0.0, POINT_EPSILON).unwrap(), curve);
    /// assert_eq!(curve.try_morph(&line, 1.0, POINT_EPSILON).unwrap(), line);
    /// ```
    pub fn try_morph(&self, end: &BSplineCurve, t: Real, epsilon: Real) -> Result<BSplineCurve> {
        if self.dimension != end.dimension {
            return Err(Error::ControlPointsDimensionMismatch(
                end.dimension,
                self.dimension,
            ));
        }
        let t = t.clamp(0.0, 1.0);
        let aligned;
        let needs_align = self.degree() != end.degree()
            || self.knot_vec.len() != end.knot_vec.len()
            || self.num_control_points() != end.num_control_points();
        let (start, end) = match needs_align {
            true => {
                let mut s = self.clone();
                let mut e = end.clone();
                s.try_align(&mut e, epsilon)?;
                aligned = (s, e);
                (&aligned.0, &aligned.1)
            }
            false => (self, end),
        };
        let knot_vec = KnotVec(
            start
                .knot_vec
                .iter()
                .zip(&end.knot_vec)
                .map(|(a, b)| (1.0 - t) * *a + t * *b)
                .collect(),
        );
        let control_points = start
            .control_points
            .iter()
            .zip(&end.control_points)
            .map(|(a, b)| (1.0 - t) * *a + t * *b)
            .collect();
        BSplineCurve::try_new(knot_vec, control_points, self.dimension)
    }

    /// Interpolates between two curves. See [`BSplineCurve::try_morph`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_morph` fails.
    #[inline(always)]
    pub fn morph(&self, end: &BSplineCurve, t: Real, epsilon: Real) -> BSplineCurve {
        self.try_morph(end, t, epsilon)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Returns whether the curve is closed: for each derivative order
    /// `0 ..= degree - 1`, the Euclidean distance between the derivative's
    /// endpoints (its values at the domain boundaries) is at most `epsilon`.
    /// A degree-0 curve is trivially closed.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::uniform_knot(1, 3);
    /// let loop_pts = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0];
    /// let curve = BSplineCurve::new(knot_vec.clone(), loop_pts, 2);
    /// assert!(curve.try_is_closed(POINT_EPSILON).unwrap());
    ///
    /// let open_pts = vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    /// let curve = BSplineCurve::new(knot_vec, open_pts, 2);
    /// assert!(!curve.try_is_closed(POINT_EPSILON).unwrap());
    /// ```
    pub fn try_is_closed(&self, epsilon: Real) -> Result<bool> {
        let dim = self.dimension;
        let mut curve = self.clone();
        for i in 0..self.degree() {
            let (min, max) = curve.domain();
            let front = curve.try_eval(min)?;
            let back = curve.try_eval(max)?;
            if distance(&front.result()[..dim], &back.result()[..dim]) > epsilon {
                return Ok(false);
            }
            if i + 1 < self.degree() {
                curve = curve.try_derive(1, epsilon)?;
            }
        }
        Ok(true)
    }
}
