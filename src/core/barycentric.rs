//! Exact barycentric (volume-ratio) interpolation.
//!
//! For a query point `x`, the reference coordinates `ξ = J⁻¹ (x − v₀)` are the
//! volume ratios of the sub-simplices opposite vertices `1 … D`, measured against
//! the unit reference simplex. The weight of vertex 0 is whatever remains:
//!
//! ```text
//! w₀ = 1 − Σ ξᵢ,   wᵢ = ξᵢ₋₁  (i = 1 … D)
//! f(x) = Σ wᵢ fᵢ
//! ```
//!
//! A point is *inside* iff every weight lies strictly in `(0, 1)`. Points on a
//! face, edge, or vertex have a zero weight and are therefore classified as
//! outside; this convention is applied identically in 2D and 3D.
//!
//! Outside the simplex the same formula extrapolates linearly. The value is
//! still returned, but callers should consult the inside flag before treating
//! it as an interpolated result.

#![forbid(unsafe_code)]

use super::simplex::Simplex;
use super::traits::evaluator::Evaluator;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Barycentric weights of one query point, one per vertex, in vertex order.
///
/// Stored inline for triangles and tetrahedra, so computing weights does not
/// allocate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: CoordinateScalar",
    deserialize = "T: CoordinateScalar"
))]
pub struct BarycentricWeights<T>
where
    T: CoordinateScalar,
{
    weights: SmallVec<[T; 4]>,
}

impl<T> BarycentricWeights<T>
where
    T: CoordinateScalar,
{
    /// Builds the D+1 weights from the D reference coordinates of a point.
    #[must_use]
    pub fn from_reference<const D: usize>(reference: &[T; D]) -> Self {
        let tail = reference.iter().fold(T::zero(), |acc, &w| acc + w);
        let mut weights = SmallVec::with_capacity(D + 1);
        weights.push(T::one() - tail);
        weights.extend_from_slice(reference);
        Self { weights }
    }

    /// The weights in vertex order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.weights
    }

    /// Number of weights (D + 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false for weights produced by this crate.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the weights; one up to rounding.
    #[must_use]
    pub fn sum(&self) -> T {
        self.weights.iter().fold(T::zero(), |acc, &w| acc + w)
    }

    /// True iff every weight lies strictly inside `(0, 1)`.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.weights
            .iter()
            .all(|&w| w > T::zero() && w < T::one())
    }

    /// Index of the vertex with the largest weight.
    ///
    /// Ties resolve to the lowest index.
    #[must_use]
    pub fn dominant_vertex(&self) -> usize {
        let mut best = 0;
        for (i, &w) in self.weights.iter().enumerate().skip(1) {
            if w > self.weights[best] {
                best = i;
            }
        }
        best
    }

    /// `Σ wᵢ fᵢ` over the given values, in vertex order.
    #[must_use]
    pub fn interpolate<I>(&self, values: I) -> T
    where
        I: IntoIterator<Item = T>,
    {
        self.weights
            .iter()
            .zip(values)
            .fold(T::zero(), |acc, (&w, f)| acc + w * f)
    }
}

/// Result of a barycentric evaluation at one point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarycentricSample<T> {
    /// Interpolated (or, outside the simplex, extrapolated) value.
    pub value: T,
    /// Whether the point lies strictly inside the simplex.
    pub inside: bool,
}

/// The barycentric interpolation strategy.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::barycentric::Barycentric;
/// use simplex_interp::core::simplex::Simplex;
/// use simplex_interp::core::traits::Evaluator;
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::Coordinate;
/// use simplex_interp::vertex;
/// use approx::assert_relative_eq;
///
/// let triangle = Simplex::new(vec![
///     vertex!([2.0, 2.0], 1.0),
///     vertex!([4.0, 3.0], 2.0),
///     vertex!([1.0, 4.0], 3.0),
/// ])
/// .unwrap();
///
/// let centroid = Barycentric.evaluate(&triangle, &Point::new([7.0 / 3.0, 3.0]));
/// assert_relative_eq!(centroid.value, 2.0, epsilon = 1e-12);
/// assert!(centroid.inside);
///
/// let outside = Barycentric.evaluate(&triangle, &Point::new([0.0, 0.0]));
/// assert!(!outside.inside);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Barycentric;

impl Barycentric {
    /// Barycentric weights of `point` with respect to `simplex`.
    #[must_use]
    pub fn weights<T, const D: usize>(
        simplex: &Simplex<T, D>,
        point: &Point<T, D>,
    ) -> BarycentricWeights<T>
    where
        T: CoordinateScalar,
    {
        BarycentricWeights::from_reference(&simplex.geometry().to_local(point))
    }

    /// Evaluates every point in order, returning parallel value and inside vectors.
    ///
    /// Each entry is exactly what [`Evaluator::evaluate`] returns for that point.
    #[must_use]
    pub fn evaluate_batch<T, const D: usize>(
        &self,
        simplex: &Simplex<T, D>,
        points: &[Point<T, D>],
    ) -> (Vec<T>, Vec<bool>)
    where
        T: CoordinateScalar,
    {
        points
            .iter()
            .map(|p| {
                let sample = self.evaluate(simplex, p);
                (sample.value, sample.inside)
            })
            .unzip()
    }
}

impl<T, const D: usize> Evaluator<T, D> for Barycentric
where
    T: CoordinateScalar,
{
    type Output = BarycentricSample<T>;

    #[inline]
    fn evaluate(&self, simplex: &Simplex<T, D>, point: &Point<T, D>) -> BarycentricSample<T> {
        let weights = Self::weights(simplex, point);
        BarycentricSample {
            value: weights.interpolate(simplex.values()),
            inside: weights.is_inside(),
        }
    }
}
