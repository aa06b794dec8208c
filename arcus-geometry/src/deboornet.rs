use crate::errors::Error;
use crate::*;

impl DeBoorNet {
    /// Returns the knot at which the evaluation was requested, clamped to
    /// the domain when it lay within [`KNOT_EPSILON`] of a boundary.
    #[inline(always)]
    pub fn knot(&self) -> Real { self.knot }

    /// Returns the span index `k` with `knots[k] <= knot < knots[k + 1]`
    /// under the fuzzy knot equality (ties take the last equal index).
    #[inline(always)]
    pub fn index(&self) -> usize { self.index }

    /// Returns the multiplicity of the evaluated knot.
    #[inline(always)]
    pub fn multiplicity(&self) -> usize { self.multiplicity }

    /// Returns the number of insertion steps the evaluation performed, i.e.
    /// `degree - multiplicity` when positive, else 0.
    #[inline(always)]
    pub fn num_insertions(&self) -> usize { self.insertions }

    /// Returns the dimension of the points of the net.
    #[inline(always)]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Returns every point of the net, interleaved by coordinate: all levels
    /// of the triangular table, from the copied control points up to the
    /// apex.
    #[inline(always)]
    pub fn points(&self) -> &[Real] { &self.points }

    /// Returns the number of points of the net.
    #[inline(always)]
    pub fn num_points(&self) -> usize { self.points.len() / self.dimension.max(1) }

    /// Returns the result of the evaluation: one point, or two exactly when
    /// the curve is discontinuous at the evaluated knot (an internal knot of
    /// full multiplicity). The points are interleaved by coordinate.
    #[inline(always)]
    pub fn result(&self) -> &[Real] {
        let dim = self.dimension;
        &self.points[self.result_offset * dim..(self.result_offset + self.num_result) * dim]
    }

    /// Returns the number of result points: 1, or 2 at a discontinuity.
    #[inline(always)]
    pub fn num_result(&self) -> usize { self.num_result }
}

impl BSplineCurve {
    /// Evaluates the curve at the knot `u` by De Boor's recursion and
    /// returns the net of every intermediate point.
    ///
    /// `u` may lie anywhere in the closed domain returned by
    /// [`BSplineCurve::domain`]; values within [`KNOT_EPSILON`] of a boundary
    /// are clamped onto it.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// // the clamped parabola through (-1, 0), (0, 1), (1, 0)
    /// let knot_vec = KnotVec::bezier_knot(2);
    /// let curve = BSplineCurve::new(knot_vec, vec![-1.0, 0.0, 0.0, 1.0, 1.0, 0.0], 2);
    /// let net = curve.try_eval(0.5).unwrap();
    /// assert_eq!(net.num_result(), 1);
    /// assert_eq!(net.result(), &[0.0, 0.5]);
    /// // the net retains the whole triangular table
    /// assert_eq!(net.num_points(), 6);
    /// assert_eq!(net.num_insertions(), 2);
    /// ```
    /// # Failures
    /// Returns [`Error::UndefinedKnot`] if `u` lies outside the domain by
    /// more than [`KNOT_EPSILON`].
    pub fn try_eval(&self, u: Real) -> Result<DeBoorNet> {
        let mut net = DeBoorNet::default();
        self.eval_into(u, &mut net)?;
        Ok(net)
    }

    /// Evaluates the curve at the knot `u`. See [`BSplineCurve::try_eval`].
    /// # Panics
    /// Panic occurs if `BSplineCurve::try_eval` fails.
    #[inline(always)]
    pub fn eval(&self, u: Real) -> DeBoorNet {
        self.try_eval(u).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Evaluates the curve into an existing net, reusing its buffer. This is
    /// the scratch primitive behind [`BSplineCurve::try_eval_all`], which
    /// bounds the peak memory of batch evaluation by a single net.
    fn eval_into(&self, u: Real, net: &mut DeBoorNet) -> Result<()> {
        let degree = self.degree();
        let order = degree + 1;
        let dim = self.dimension;
        let n = self.num_control_points();
        let (min, max) = self.domain();
        let u = self.clamp_to_domain(u)?;

        let k = self.knot_vec.floor(u).unwrap();
        let s = self.knot_vec.multiplicity(u);
        net.knot = u;
        net.index = k;
        net.multiplicity = s;
        net.dimension = dim;
        net.points.clear();
        net.result_offset = 0;

        if s >= order {
            net.insertions = 0;
            if knots_equal(u, min) {
                // the curve starts exactly at its first control point
                net.points.extend_from_slice(self.control_point(0));
                net.num_result = 1;
            } else if knots_equal(u, max) {
                net.points.extend_from_slice(self.control_point(n - 1));
                net.num_result = 1;
            } else {
                // discontinuity at an internal knot: both adjacent control
                // points are results, no net iteration is performed
                net.points.extend_from_slice(self.control_point(k - order));
                net.points.extend_from_slice(self.control_point(k - degree));
                net.num_result = 2;
            }
            return Ok(());
        }

        let h = degree - s;
        net.insertions = h;
        net.points.reserve((h + 1) * (h + 2) / 2 * dim);
        net.points
            .extend_from_slice(&self.control_points[(k - degree) * dim..(k - s + 1) * dim]);
        let mut level_start = 0;
        let mut level_len = h + 1;
        for r in 1..=h {
            for (i, g) in ((k - degree + r)..=(k - s)).enumerate() {
                let delta = self.knot_vec[g + order - r] - self.knot_vec[g];
                let alpha = (u - self.knot_vec[g]) * inv_or_zero(delta);
                for c in 0..dim {
                    let a = net.points[(level_start + i) * dim + c];
                    let b = net.points[(level_start + i + 1) * dim + c];
                    net.points.push((1.0 - alpha) * a + alpha * b);
                }
            }
            level_start += level_len;
            level_len -= 1;
        }
        net.result_offset = net.points.len() / dim - 1;
        net.num_result = 1;
        Ok(())
    }

    /// Evaluates the curve at every knot of `us` and returns the first
    /// result point of each sample, interleaved by coordinate. One scratch
    /// net is reused across the whole batch.
    /// # Failures
    /// Returns [`Error::UndefinedKnot`] for the first knot outside the
    /// domain.
    pub fn try_eval_all(&self, us: &[Real]) -> Result<Vec<Real>> {
        let dim = self.dimension;
        let mut net = DeBoorNet::default();
        let mut points = Vec::with_capacity(us.len() * dim);
        for &u in us {
            self.eval_into(u, &mut net)?;
            points.extend_from_slice(&net.result()[..dim]);
        }
        Ok(points)
    }

    /// Evaluates `num` equally spaced samples across the domain and returns
    /// them interleaved by coordinate.
    ///
    /// With `num == 0` the sample count falls back to 30 per Bezier span,
    /// i.e. `(num_control_points - degree) * 30`. With `num == 1` the single
    /// sample is taken at the lower domain bound.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// let line = BSplineCurve::new(knot_vec, vec![0.0, 0.0, 1.0, 2.0], 2);
    /// let samples = line.try_sample(3).unwrap();
    /// assert_eq!(samples, vec![0.0, 0.0, 0.5, 1.0, 1.0, 2.0]);
    /// ```
    pub fn try_sample(&self, num: usize) -> Result<Vec<Real>> {
        let num = match num {
            0 => (self.num_control_points() - self.degree()) * 30,
            _ => num,
        };
        let (min, max) = self.domain();
        if num == 1 {
            return self.try_eval_all(&[min]);
        }
        let step = (max - min) / (num - 1) as Real;
        let us: Vec<_> = (0..num).map(|i| min + step * i as Real).collect();
        self.try_eval_all(&us)
    }

    /// Binary search on the domain for the knot whose evaluation point has
    /// its `component`th coordinate within `epsilon` of `value`, assuming the
    /// control points are sorted at that component (ascending or descending).
    ///
    /// The interval is halved at most `max_iter` times. Among the parameters
    /// satisfying the tolerance, the leftmost one encountered is returned.
    /// If no parameter satisfies the tolerance within the iteration budget,
    /// [`Error::NoResult`] is returned when `persnickety` is set; otherwise
    /// the closest net encountered is returned. `epsilon` is taken by its
    /// absolute value.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::bezier_knot(1);
    /// let line = BSplineCurve::new(knot_vec, vec![0.0, 0.0, 1.0, 4.0], 2);
    /// // search the point with y == 1: (0.25, 1.0)
    /// let net = line.try_bisect(1.0, 1.0e-9, true, 1, true, 50).unwrap();
    /// assert_near!(net.result()[0], 0.25);
    /// assert_near!(net.result()[1], 1.0);
    /// ```
    /// # Failures
    /// * If `component >= dimension`, returns [`Error::IndexOutOfRange`].
    /// * If `persnickety` is set and no parameter satisfies the tolerance,
    ///   returns [`Error::NoResult`].
    pub fn try_bisect(
        &self,
        value: Real,
        epsilon: Real,
        persnickety: bool,
        component: usize,
        ascending: bool,
        max_iter: usize,
    ) -> Result<DeBoorNet> {
        if component >= self.dimension {
            return Err(Error::IndexOutOfRange(component, self.dimension));
        }
        let epsilon = epsilon.abs();
        let (mut lo, mut hi) = self.domain();
        let mut found: Option<DeBoorNet> = None;
        let mut closest: Option<(Real, DeBoorNet)> = None;
        for _ in 0..max_iter {
            let mid = 0.5 * (lo + hi);
            let net = self.try_eval(mid)?;
            let dist = (net.result()[component] - value).abs();
            if closest.as_ref().map_or(true, |(d, _)| dist < *d) {
                closest = Some((dist, net.clone()));
            }
            if dist <= epsilon {
                // satisfied; keep tightening towards the leftmost admissible knot
                found = Some(net);
                hi = mid;
            } else if (net.result()[component] < value) == ascending {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        match (found, closest, persnickety) {
            (Some(net), _, _) => Ok(net),
            (None, _, true) => Err(Error::NoResult),
            (None, Some((_, net)), false) => Ok(net),
            (None, None, false) => Err(Error::NoResult),
        }
    }
}
