use crate::errors::Error;
use crate::*;
use std::slice::SliceIndex;

impl KnotVec {
    /// empty constructor
    pub const fn new() -> KnotVec { KnotVec(Vec::new()) }

    /// Returns the length of range.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(vec![0.0, 6.0]).unwrap();
    /// assert_eq!(knot_vec.range_length(), 6.0);
    /// ```
    #[inline(always)]
    pub fn range_length(&self) -> Real {
        match self.is_empty() {
            true => 0.0,
            false => self[self.len() - 1] - self[0],
        }
    }

    /// Removes one knot.
    #[inline(always)]
    pub fn remove(&mut self, idx: usize) -> Real { self.0.remove(idx) }

    /// Returns the maximum index `i` of `self[i] <= x` under the fuzzy knot
    /// equality, i.e. knots within [`KNOT_EPSILON`] of `x` count as `<= x`.
    /// Returns `None` if `x` lies below every knot or `self` is empty.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(vec![0.0, 0.0, 1.0, 2.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(knot_vec.floor(1.5), Some(3));
    /// assert_eq!(knot_vec.floor(2.0 - 1.0e-5), Some(3));
    /// assert_eq!(knot_vec.floor(-1.0), None);
    /// ```
    #[inline(always)]
    pub fn floor(&self, x: Real) -> Option<usize> {
        self.iter().rposition(|t| *t <= x || knots_equal(*t, x))
    }

    /// The multiplicity of the value `u` in the knot vector, counted under
    /// the fuzzy knot equality.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(vec![0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(knot_vec.multiplicity(2.0), 3);
    /// assert_eq!(knot_vec.multiplicity(1.5), 0);
    /// ```
    #[inline(always)]
    pub fn multiplicity(&self, u: Real) -> usize {
        self.iter().filter(|t| knots_equal(**t, u)).count()
    }

    /// Adds a knot preserving monotonicity and returns the index of the
    /// added knot.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let mut knot_vec = KnotVec::try_from(vec![0.0, 0.0, 1.0, 2.0, 3.0, 3.0]).unwrap();
    /// let idx0 = knot_vec.add_knot(1.5);
    /// assert_eq!(idx0, 3);
    /// let idx1 = knot_vec.add_knot(-1.0);
    /// assert_eq!(idx1, 0);
    /// let ansvec = KnotVec::try_from(vec![-1.0, 0.0, 0.0, 1.0, 1.5, 2.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(knot_vec, ansvec);
    /// ```
    #[inline(always)]
    pub fn add_knot(&mut self, knot: Real) -> usize {
        match self.floor(knot) {
            Some(idx) => {
                self.0.insert(idx + 1, knot);
                idx + 1
            }
            None => {
                self.0.insert(0, knot);
                0
            }
        }
    }

    /// Calculates the B-spline basis functions at `t` with degree `degree`.
    /// # Panics
    /// Panic occurs if the knot vector is too short or has zero range.
    /// # Remarks
    /// The basis functions are based on the characteristic functions of the
    /// right-open spans `[s, t)`; the value at the last knot is obtained as
    /// the limit from the left.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// const N: usize = 100; // sample size in tests
    ///
    /// // B-spline basis functions are a partition of unity in (t_k, t_{n - k}).
    /// let knot_vec = KnotVec::try_from(
    ///     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
    /// ).unwrap();
    /// let degree = 2;
    /// for i in 0..N {
    ///     let t = 2.0 + 4.0 / (N as Real) * (i as Real);
    ///     let res = knot_vec.bspline_basis_functions(degree, t);
    ///     let sum: Real = res.iter().sum();
    ///     assert_near!(sum, 1.0);
    /// }
    /// ```
    pub fn bspline_basis_functions(&self, degree: usize, t: Real) -> Vec<Real> {
        self.try_bspline_basis_functions(degree, t)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Calculates the B-spline basis functions at `t` with degree `degree`.
    ///
    /// At most `degree + 1` basis functions are nonzero at any parameter, so
    /// the recurrence runs over that window only; the returned vector scatters
    /// the window into its place among all `len - degree - 1` functions.
    /// # Failures
    /// - If the knot vector is shorter than `2 * (degree + 1)` (the minimum
    ///   for a curve of that degree), returns [`Error::InvalidKnotCount`].
    /// - If the range of the knot vector is zero, no evaluation parameter is
    ///   defined and [`Error::UndefinedKnot`] is returned.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// const N: usize = 100; // sample size in tests
    ///
    /// // In some cases, B-spline basis functions coincide with Bernstein polynomials.
    /// let knot_vec = KnotVec::try_from(
    ///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]
    /// ).unwrap();
    /// let degree = 3;
    /// for i in 0..=N {
    ///     let t = 1.0 / (N as Real) * (i as Real);
    ///     let res = knot_vec.try_bspline_basis_functions(degree, t).unwrap();
    ///     let ans = [
    ///         1.0 * (1.0 - t) * (1.0 - t) * (1.0 - t),
    ///         3.0 * t * (1.0 - t) * (1.0 - t),
    ///         3.0 * t * t * (1.0 - t),
    ///         1.0 * t * t * t,
    ///     ];
    ///     for i in 0..4 { assert_near!(res[i], ans[i]); }
    /// }
    /// ```
    pub fn try_bspline_basis_functions(&self, degree: usize, t: Real) -> Result<Vec<Real>> {
        if self.len() < 2 * (degree + 1) {
            return Err(Error::InvalidKnotCount(2 * (degree + 1), self.len()));
        }
        if knots_equal(self[0], self[self.len() - 1]) {
            return Err(Error::UndefinedKnot(t));
        }
        let num_basis = self.len() - degree - 1;
        let span = match self.floor(t) {
            Some(idx) => idx.clamp(degree, num_basis - 1),
            None => degree,
        };

        // Cox-de Boor restricted to the active window. After round p,
        // window[j] holds the degree-p basis function starting at knot
        // span - p + j, evaluated at t. Each round widens the window one
        // slot to the left; every entry's share flows through the common
        // denominator of its two parents, and the raising term is carried
        // forward to the next slot.
        let mut window = vec![0.0; degree + 1];
        window[0] = 1.0;
        for p in 1..=degree {
            let mut carry = 0.0;
            for j in 0..p {
                let i = span + 1 + j - p;
                let share = window[j] * inv_or_zero(self[i + p] - self[i]);
                window[j] = carry + (self[i + p] - t) * share;
                carry = (t - self[i]) * share;
            }
            window[p] = carry;
        }

        let mut values = vec![0.0; num_basis];
        values[span - degree..=span].copy_from_slice(&window);
        Ok(values)
    }

    /// Checks the knot-vector invariants for a curve of degree `degree`:
    /// monotonicity under the fuzzy knot equality, the multiplicity cap
    /// `degree + 1`, and the maximum knot count [`MAX_NUM_KNOTS`].
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// let knot_vec = KnotVec::try_from(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
    /// assert!(knot_vec.validate(2).is_ok());
    /// assert_eq!(knot_vec.validate(1), Err(Error::TooLargeMultiplicity(3, 2)));
    /// ```
    pub fn validate(&self, degree: usize) -> Result<()> {
        if self.len() > MAX_NUM_KNOTS {
            return Err(Error::TooManyKnots(self.len()));
        }
        for i in 1..self.len() {
            if self[i] < self[i - 1] && !knots_equal(self[i], self[i - 1]) {
                return Err(Error::DecreasingKnotVector);
            }
        }
        let order = degree + 1;
        let (_, mults) = self.to_single_multi();
        match mults.into_iter().find(|m| *m > order) {
            Some(m) => Err(Error::TooLargeMultiplicity(m, order)),
            None => Ok(()),
        }
    }

    /// determine the knot vector is clamped for the given degree.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(
    ///     vec![0.0, 0.0, 0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 1.0]
    /// ).unwrap();
    /// assert!(knot_vec.is_clamped(2));
    /// assert!(!knot_vec.is_clamped(3));
    /// ```
    #[inline(always)]
    pub fn is_clamped(&self, degree: usize) -> bool {
        self.multiplicity(self[0]) > degree && self.multiplicity(self[self.len() - 1]) > degree
    }

    /// Returns trimmed vector by the specified range.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let sub_vec = knot_vec.sub_vec(1..3);
    /// assert_eq!(sub_vec, KnotVec::try_from(vec![1.0, 2.0]).unwrap());
    /// ```
    #[inline(always)]
    pub fn sub_vec<I: SliceIndex<[Real], Output = [Real]>>(&self, range: I) -> KnotVec {
        KnotVec(Vec::from(&self.0[range]))
    }

    /// To single-multi description, i.e. decomposes the vector into the
    /// fuzzy-distinct knot values and their multiplicities.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::try_from(
    ///     vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0]
    /// ).unwrap();
    /// let (knots, mults) = knot_vec.to_single_multi();
    /// assert_eq!(knots, vec![0.0, 1.0, 2.0, 3.0]);
    /// assert_eq!(mults, vec![3, 1, 4, 2]);
    /// ```
    pub fn to_single_multi(&self) -> (Vec<Real>, Vec<usize>) {
        let mut knots = Vec::new();
        let mut mults = Vec::new();

        let mut iter = self.as_slice().iter().peekable();
        let mut mult = 1;
        while let Some(knot) = iter.next() {
            if let Some(next) = iter.peek() {
                if knots_equal(*knot, **next) {
                    mult += 1;
                } else {
                    knots.push(*knot);
                    mults.push(mult);
                    mult = 1;
                }
            } else {
                knots.push(*knot);
                mults.push(mult);
            }
        }
        (knots, mults)
    }

    /// construct from single-multi description.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let knots = vec![0.0, 1.0, 2.0, 3.0];
    /// let mults = vec![3, 1, 4, 2];
    /// let knot_vec = KnotVec::from_single_multi(knots, mults).unwrap();
    /// assert_eq!(knot_vec, KnotVec::try_from(
    ///     vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0]
    /// ).unwrap());
    /// ```
    pub fn from_single_multi(knots: Vec<Real>, mults: Vec<usize>) -> Result<KnotVec> {
        for i in 1..knots.len() {
            if knots[i] < knots[i - 1] && !knots_equal(knots[i], knots[i - 1]) {
                return Err(Error::DecreasingKnotVector);
            }
        }

        let mut vec = Vec::new();
        for (knot, mult) in knots.into_iter().zip(mults) {
            vec.extend(std::iter::repeat(knot).take(mult));
        }
        Ok(KnotVec(vec))
    }

    /// construct from `Vec<Real>`. do not sort, only check sorted.
    /// # Failures
    /// Returns [`Error::DecreasingKnotVector`] if the vector decreases by
    /// more than [`KNOT_EPSILON`] anywhere.
    pub fn try_from(vec: Vec<Real>) -> Result<KnotVec> {
        for i in 1..vec.len() {
            if vec[i] < vec[i - 1] && !knots_equal(vec[i], vec[i - 1]) {
                return Err(Error::DecreasingKnotVector);
            }
        }
        Ok(KnotVec(vec))
    }

    /// Constructs the knot vector for a single bezier segment.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// assert_eq!(
    ///     *KnotVec::bezier_knot(3),
    ///     vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn bezier_knot(degree: usize) -> KnotVec {
        let mut vec = vec![0.0; degree + 1];
        vec.extend(std::iter::repeat(1.0).take(degree + 1));
        KnotVec(vec)
    }

    /// Constructs the knot vector for a chain of `segments` bezier segments:
    /// every knot value has multiplicity `degree + 1`.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// assert_eq!(
    ///     *KnotVec::beziers_knot(2, 2),
    ///     vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn beziers_knot(degree: usize, segments: usize) -> KnotVec {
        let order = degree + 1;
        let mut vec = Vec::with_capacity((segments + 1) * order);
        for i in 0..=segments {
            let u = i as Real / segments as Real;
            vec.extend(std::iter::repeat(u).take(order));
        }
        KnotVec(vec)
    }

    /// Constructs the uniform knot vector with clamped ends.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// assert_eq!(
    ///     *KnotVec::uniform_knot(2, 5),
    ///     vec![0.0, 0.0, 0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.0, 1.0],
    /// );
    /// ```
    pub fn uniform_knot(degree: usize, division: usize) -> KnotVec {
        let mut vec = vec![0.0; degree + 1];
        vec.extend((1..division).map(|i| i as Real / division as Real));
        vec.extend(std::iter::repeat(1.0).take(degree + 1));
        KnotVec(vec)
    }

    /// Constructs the uniform knot vector without end-point clamping for a
    /// curve with `n` control points. The domain is a strict subset of
    /// `[0, 1]`.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// assert_eq!(
    ///     *KnotVec::opened_knot(2, 3),
    ///     vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0],
    /// );
    /// ```
    pub fn opened_knot(degree: usize, n: usize) -> KnotVec {
        let m = n + degree + 1;
        KnotVec((0..m).map(|i| i as Real / (m - 1) as Real).collect())
    }
}

impl From<Vec<Real>> for KnotVec {
    /// construct from `Vec<Real>`. The vector will be sorted.
    /// ```
    /// use arcus_geometry::*;
    /// let knot_vec = KnotVec::from(vec![1.0, 0.0, 3.0, 2.0]);
    /// let arr: Vec<_> = knot_vec.into();
    /// assert_eq!(arr, vec![0.0, 1.0, 2.0, 3.0]);
    /// ```
    fn from(mut vec: Vec<Real>) -> KnotVec {
        vec.sort_by(|a, b| a.partial_cmp(b).unwrap());
        KnotVec(vec)
    }
}

impl From<KnotVec> for Vec<Real> {
    #[inline(always)]
    fn from(knotvec: KnotVec) -> Vec<Real> { knotvec.0 }
}

impl FromIterator<Real> for KnotVec {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> KnotVec {
        KnotVec::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a KnotVec {
    type Item = &'a Real;
    type IntoIter = std::slice::Iter<'a, Real>;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl std::ops::Deref for KnotVec {
    type Target = Vec<Real>;
    #[inline(always)]
    fn deref(&self) -> &Vec<Real> { &self.0 }
}

impl AsRef<[Real]> for KnotVec {
    #[inline(always)]
    fn as_ref(&self) -> &[Real] { &self.0 }
}

impl Default for KnotVec {
    #[inline(always)]
    fn default() -> KnotVec { KnotVec::new() }
}
