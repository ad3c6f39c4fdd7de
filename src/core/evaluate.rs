//! Batch evaluation of a simplex over many query points.
//!
//! This module is pure orchestration: it validates the method configuration,
//! then hands every point to one [`Evaluator`] and collects the results in input
//! order. All failures are raised before the first point is evaluated.
//!
//! # Examples
//!
//! ```rust
//! use simplex_interp::prelude::*;
//! use approx::assert_relative_eq;
//!
//! let triangle = Simplex::new(vec![
//!     vertex!([2.0, 2.0], 1.0),
//!     vertex!([4.0, 3.0], 2.0),
//!     vertex!([1.0, 4.0], 3.0),
//! ])
//! .unwrap();
//! let points = [Point::new([7.0 / 3.0, 3.0]), Point::new([0.0, 0.0])];
//!
//! let result = evaluate(&triangle, &points, Method::Barycentric, &EvaluationOptions::default()).unwrap();
//! let Evaluation::Barycentric { values, inside } = result else {
//!     unreachable!()
//! };
//! assert_relative_eq!(values[0], 2.0, epsilon = 1e-12);
//! assert_eq!(inside, vec![true, false]);
//!
//! let options = EvaluationOptionsBuilder::default().power(3.0).build().unwrap();
//! let idw = evaluate(&triangle, &points, "idw".parse().unwrap(), &options).unwrap();
//! assert_eq!(idw.values().len(), 2);
//! assert!(idw.inside().is_none());
//! ```

#![forbid(unsafe_code)]

use super::barycentric::Barycentric;
use super::idw::{InverseDistance, default_power};
use super::simplex::{Simplex, SimplexError};
use super::traits::evaluator::Evaluator;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while setting up an evaluation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvaluationError {
    /// Unknown method name or an unusable option value.
    #[error("Invalid evaluation configuration: {message}")]
    InvalidConfig {
        /// What was wrong.
        message: String,
    },
    /// A query point has the wrong number of coordinates.
    #[error("Query point {point_index} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending point in the input.
        point_index: usize,
        /// Dimension of the simplex.
        expected: usize,
        /// Length of the point.
        actual: usize,
    },
    /// Building the simplex failed.
    #[error(transparent)]
    Simplex(#[from] SimplexError),
}

// =============================================================================
// METHOD AND OPTIONS
// =============================================================================

/// Interpolation method selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Exact barycentric interpolation with an inside mask.
    #[default]
    #[serde(rename = "barycentric", alias = "linear")]
    Barycentric,
    /// Inverse-distance weighting.
    #[serde(rename = "idw")]
    InverseDistance,
}

impl Method {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Barycentric => "barycentric",
            Self::InverseDistance => "idw",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = EvaluationError;

    /// Parses `"barycentric"` (or `"linear"`) and `"idw"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "barycentric" | "linear" => Ok(Self::Barycentric),
            "idw" => Ok(Self::InverseDistance),
            other => Err(EvaluationError::InvalidConfig {
                message: format!(
                    "unknown interpolation method '{other}', expected 'barycentric' or 'idw'"
                ),
            }),
        }
    }
}

/// How a batch is scheduled.
///
/// Both modes produce identical output in input order. `Parallel` spreads
/// points over the rayon thread pool when the `parallel` feature is enabled and
/// runs sequentially otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One point after another on the calling thread.
    #[default]
    Sequential,
    /// Data-parallel over points.
    Parallel,
}

/// Options shared by all methods.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::evaluate::{EvaluationOptions, EvaluationOptionsBuilder, ExecutionMode};
///
/// let defaults = EvaluationOptions::<f64>::default();
/// assert_eq!(defaults.power, 2.0);
/// assert_eq!(defaults.mode, ExecutionMode::Sequential);
///
/// let options = EvaluationOptionsBuilder::<f32>::default()
///     .mode(ExecutionMode::Parallel)
///     .build()
///     .unwrap();
/// assert_eq!(options.power, 2.0);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct EvaluationOptions<T>
where
    T: CoordinateScalar,
{
    /// IDW exponent. Ignored by barycentric evaluation.
    #[builder(default = "default_power()")]
    pub power: T,
    /// Batch scheduling.
    #[builder(default)]
    pub mode: ExecutionMode,
}

impl<T> Default for EvaluationOptions<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            power: default_power(),
            mode: ExecutionMode::default(),
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Output of [`evaluate`], shaped by the method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "method",
    rename_all = "lowercase",
    bound(serialize = "T: CoordinateScalar", deserialize = "T: CoordinateScalar")
)]
pub enum Evaluation<T>
where
    T: CoordinateScalar,
{
    /// Values plus the strict-interior mask, both in input order.
    Barycentric {
        /// Interpolated or extrapolated values.
        values: Vec<T>,
        /// Whether each point lies strictly inside the simplex.
        inside: Vec<bool>,
    },
    /// Values in input order; IDW has no mask.
    #[serde(rename = "idw")]
    InverseDistance {
        /// Interpolated values.
        values: Vec<T>,
    },
}

impl<T> Evaluation<T>
where
    T: CoordinateScalar,
{
    /// The method that produced this result.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::Barycentric { .. } => Method::Barycentric,
            Self::InverseDistance { .. } => Method::InverseDistance,
        }
    }

    /// Values in input order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        match self {
            Self::Barycentric { values, .. } | Self::InverseDistance { values } => values,
        }
    }

    /// The inside mask, for barycentric results only.
    #[must_use]
    pub fn inside(&self) -> Option<&[bool]> {
        match self {
            Self::Barycentric { inside, .. } => Some(inside),
            Self::InverseDistance { .. } => None,
        }
    }

    /// Number of evaluated points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// True when no points were evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Consumes the result, keeping only the values.
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        match self {
            Self::Barycentric { values, .. } | Self::InverseDistance { values } => values,
        }
    }
}

// =============================================================================
// BATCH DRIVER
// =============================================================================

/// Evaluates `simplex` at every point with the selected method.
///
/// # Errors
///
/// [`EvaluationError::InvalidConfig`] if `method` is IDW and `options.power` is
/// not a finite positive number. Nothing is evaluated in that case.
pub fn evaluate<T, const D: usize>(
    simplex: &Simplex<T, D>,
    points: &[Point<T, D>],
    method: Method,
    options: &EvaluationOptions<T>,
) -> Result<Evaluation<T>, EvaluationError>
where
    T: CoordinateScalar,
{
    tracing::debug!(
        "evaluating {D}D simplex: method={method}, points={}, mode={:?}",
        points.len(),
        options.mode
    );

    match method {
        Method::Barycentric => {
            let (values, inside) = evaluate_with(&Barycentric, simplex, points, options.mode)
                .into_iter()
                .map(|sample| (sample.value, sample.inside))
                .unzip();
            Ok(Evaluation::Barycentric { values, inside })
        }
        Method::InverseDistance => {
            let idw = InverseDistance::new(options.power)?;
            Ok(Evaluation::InverseDistance {
                values: evaluate_with(&idw, simplex, points, options.mode),
            })
        }
    }
}

/// Runs any [`Evaluator`] over `points`, preserving input order.
///
/// Each output slot is produced by exactly one call to
/// [`Evaluator::evaluate`], so the parallel and sequential modes return
/// identical vectors.
pub fn evaluate_with<E, T, const D: usize>(
    evaluator: &E,
    simplex: &Simplex<T, D>,
    points: &[Point<T, D>],
    mode: ExecutionMode,
) -> Vec<E::Output>
where
    E: Evaluator<T, D>,
    T: CoordinateScalar,
{
    match mode {
        ExecutionMode::Sequential => points
            .iter()
            .map(|point| evaluator.evaluate(simplex, point))
            .collect(),
        ExecutionMode::Parallel => parallel_map(evaluator, simplex, points),
    }
}

#[cfg(feature = "parallel")]
fn parallel_map<E, T, const D: usize>(
    evaluator: &E,
    simplex: &Simplex<T, D>,
    points: &[Point<T, D>],
) -> Vec<E::Output>
where
    E: Evaluator<T, D>,
    T: CoordinateScalar,
{
    use rayon::prelude::*;

    points
        .par_iter()
        .map(|point| evaluator.evaluate(simplex, point))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn parallel_map<E, T, const D: usize>(
    evaluator: &E,
    simplex: &Simplex<T, D>,
    points: &[Point<T, D>],
) -> Vec<E::Output>
where
    E: Evaluator<T, D>,
    T: CoordinateScalar,
{
    evaluate_with(evaluator, simplex, points, ExecutionMode::Sequential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::traits::coordinate::Coordinate;
    use crate::vertex;
    use approx::assert_relative_eq;

    fn sample_triangle() -> Simplex<f64, 2> {
        Simplex::new(vec![
            vertex!([2.0, 2.0], 1.0),
            vertex!([4.0, 3.0], 2.0),
            vertex!([1.0, 4.0], 3.0),
        ])
        .unwrap()
    }

    fn grid(n: usize) -> Vec<Point<f64, 2>> {
        let step = 5.0 / n as f64;
        (0..n * n)
            .map(|k| Point::new([(k % n) as f64 * step, (k / n) as f64 * step]))
            .collect()
    }

    #[test]
    fn method_parsing() {
        assert_eq!("barycentric".parse::<Method>().unwrap(), Method::Barycentric);
        assert_eq!("linear".parse::<Method>().unwrap(), Method::Barycentric);
        assert_eq!("idw".parse::<Method>().unwrap(), Method::InverseDistance);
        for bad in ["nearest", "IDW", ""] {
            assert!(matches!(
                bad.parse::<Method>(),
                Err(EvaluationError::InvalidConfig { .. })
            ));
        }
        assert_eq!(Method::InverseDistance.to_string(), "idw");
    }

    #[test]
    fn method_serde_names() {
        assert_eq!(serde_json::to_string(&Method::Barycentric).unwrap(), r#""barycentric""#);
        assert_eq!(serde_json::to_string(&Method::InverseDistance).unwrap(), r#""idw""#);
        let parsed: Method = serde_json::from_str(r#""linear""#).unwrap();
        assert_eq!(parsed, Method::Barycentric);
        assert_eq!(
            serde_json::to_string(&ExecutionMode::Parallel).unwrap(),
            r#""parallel""#
        );
    }

    #[test]
    fn options_defaults_and_builder() {
        let options = EvaluationOptions::<f64>::default();
        assert_relative_eq!(options.power, 2.0);
        assert_eq!(options.mode, ExecutionMode::Sequential);

        let built = EvaluationOptionsBuilder::default()
            .power(4.0)
            .mode(ExecutionMode::Parallel)
            .build()
            .unwrap();
        assert_relative_eq!(built.power, 4.0);
        assert_eq!(built.mode, ExecutionMode::Parallel);

        let defaulted = EvaluationOptionsBuilder::<f64>::default().build().unwrap();
        assert_eq!(defaulted, options);
    }

    #[test]
    fn barycentric_batch_shapes() {
        let simplex = sample_triangle();
        let points = grid(8);
        let result = evaluate(&simplex, &points, Method::Barycentric, &EvaluationOptions::default())
            .unwrap();
        assert_eq!(result.method(), Method::Barycentric);
        assert_eq!(result.len(), points.len());
        assert_eq!(result.inside().map(<[bool]>::len), Some(points.len()));
        assert!(!result.is_empty());
    }

    #[test]
    fn empty_batch_is_fine() {
        let simplex = sample_triangle();
        let result = evaluate(&simplex, &[], Method::InverseDistance, &EvaluationOptions::default())
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn invalid_power_fails_before_evaluation() {
        let simplex = sample_triangle();
        let options = EvaluationOptionsBuilder::default().power(-1.0).build().unwrap();
        let err = evaluate(&simplex, &grid(4), Method::InverseDistance, &options).unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidConfig { .. }));

        // Barycentric ignores the power
        assert!(evaluate(&simplex, &grid(4), Method::Barycentric, &options).is_ok());
    }

    #[test]
    fn parallel_matches_sequential() {
        let simplex = sample_triangle();
        let points = grid(40);
        let sequential = EvaluationOptions::default();
        let parallel = EvaluationOptionsBuilder::default()
            .mode(ExecutionMode::Parallel)
            .build()
            .unwrap();
        for method in [Method::Barycentric, Method::InverseDistance] {
            let a = evaluate(&simplex, &points, method, &sequential).unwrap();
            let b = evaluate(&simplex, &points, method, &parallel).unwrap();
            assert_eq!(a, b, "{method} differs between modes");
        }
    }

    #[test]
    fn evaluate_with_custom_evaluator() {
        struct FirstValue;
        impl Evaluator<f64, 2> for FirstValue {
            type Output = f64;
            fn evaluate(&self, simplex: &Simplex<f64, 2>, _point: &Point<f64, 2>) -> f64 {
                simplex.vertices()[0].value()
            }
        }

        let simplex = sample_triangle();
        let values = evaluate_with(&FirstValue, &simplex, &grid(3), ExecutionMode::Parallel);
        assert_eq!(values, vec![1.0; 9]);
    }

    #[test]
    fn evaluation_serializes_with_method_tag() {
        let result: Evaluation<f64> = Evaluation::InverseDistance { values: vec![1.5] };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"method":"idw","values":[1.5]}"#);
        assert_eq!(result.clone().into_values(), vec![1.5]);
    }
}
