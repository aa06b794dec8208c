use crate::errors::Error;
use crate::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The wire representation of a curve: the exact JSON object layout.
///
/// `BSplineCurve` (de)serializes through this record, so every invariant of
/// the data model is re-validated on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct CurveRecord {
    pub degree: usize,
    pub dimension: usize,
    pub control_points: Vec<Real>,
    pub knots: Vec<Real>,
}

impl From<BSplineCurve> for CurveRecord {
    fn from(curve: BSplineCurve) -> CurveRecord {
        CurveRecord {
            degree: curve.degree(),
            dimension: curve.dimension(),
            knots: curve.knot_vec().as_slice().to_vec(),
            control_points: {
                let BSplineCurve { control_points, .. } = curve;
                control_points
            },
        }
    }
}

impl TryFrom<CurveRecord> for BSplineCurve {
    type Error = Error;
    fn try_from(record: CurveRecord) -> Result<BSplineCurve> {
        let knot_vec = KnotVec::try_from(record.knots)?;
        let curve = BSplineCurve::try_new(knot_vec, record.control_points, record.dimension)?;
        if curve.degree() != record.degree {
            return Err(Error::InvalidKnotCount(
                curve.num_control_points() + record.degree + 1,
                curve.num_knots(),
            ));
        }
        Ok(curve)
    }
}

impl BSplineCurve {
    /// Serializes the curve to its JSON representation:
    /// an object with the fields `degree`, `dimension`, `control_points`,
    /// and `knots`. The round trip through [`BSplineCurve::from_json`] is
    /// lossless.
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// let line = BSplineCurve::new(KnotVec::bezier_knot(1), vec![0.0, 0.0, 1.0, 2.0], 2);
    /// let json = line.to_json();
    /// assert_eq!(BSplineCurve::from_json(&json).unwrap(), line);
    /// ```
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Parses a curve from its JSON representation, validating every
    /// invariant of the data model.
    /// # Failures
    /// * If the byte sequence is not well-formed JSON of the expected shape,
    ///   returns [`Error::ParseFailure`].
    /// * Any failure of [`KnotVec::try_from`] or [`BSplineCurve::try_new`]
    ///   is passed through, e.g. [`Error::ZeroDimension`],
    ///   [`Error::DecreasingKnotVector`], or
    ///   [`Error::ControlPointsDimensionMismatch`].
    /// # Examples
    /// ```
    /// use arcus_geometry::*;
    /// use arcus_geometry::errors::Error;
    /// let json = r#"{
    ///     "degree": 1,
    ///     "dimension": 2,
    ///     "control_points": [0.0, 0.0, 1.0, 2.0],
    ///     "knots": [0.0, 0.0, 1.0, 1.0]
    /// }"#;
    /// let line = BSplineCurve::from_json(json).unwrap();
    /// assert_eq!(line.degree(), 1);
    /// assert_eq!(line.control_points(), &[0.0, 0.0, 1.0, 2.0]);
    ///
    /// assert!(matches!(
    ///     BSplineCurve::from_json("{"),
    ///     Err(Error::ParseFailure(_)),
    /// ));
    /// ```
    pub fn from_json(json: &str) -> Result<BSplineCurve> {
        let record: CurveRecord =
            serde_json::from_str(json).map_err(|e| Error::ParseFailure(e.to_string()))?;
        record.try_into()
    }

    /// Writes the JSON representation of the curve to the file at `path`.
    /// # Failures
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json())?;
        Ok(())
    }

    /// Reads a curve back from the file at `path`.
    /// # Failures
    /// * Returns [`Error::Io`] if the file cannot be read, before any parse
    ///   is attempted.
    /// * Any failure of [`BSplineCurve::from_json`] is passed through.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BSplineCurve> {
        let json = std::fs::read_to_string(path)?;
        BSplineCurve::from_json(&json)
    }
}
