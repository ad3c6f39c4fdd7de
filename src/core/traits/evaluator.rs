//! The evaluation-strategy seam.
//!
//! Each interpolation method is a type implementing [`Evaluator`]. The batch
//! driver is written once against this trait, so adding a method means adding
//! an impl, not touching the driver or the other methods.

use crate::core::simplex::Simplex;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// An interpolation method over a single simplex.
///
/// Implementations must be pure: the result for a point depends only on the
/// simplex and that point. The batch driver relies on this to evaluate points
/// in any order or on any thread and still return results in input order.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::simplex::Simplex;
/// use simplex_interp::core::traits::Evaluator;
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::{Coordinate, CoordinateScalar};
/// use simplex_interp::vertex;
///
/// /// Mean of the vertex values, ignoring the query point.
/// struct VertexMean;
///
/// impl<T: CoordinateScalar, const D: usize> Evaluator<T, D> for VertexMean {
///     type Output = T;
///
///     fn evaluate(&self, simplex: &Simplex<T, D>, _point: &Point<T, D>) -> T {
///         let n: T = num_traits::cast(simplex.number_of_vertices()).unwrap();
///         simplex.values().fold(T::zero(), |acc, v| acc + v) / n
///     }
/// }
///
/// let triangle = Simplex::new(vec![
///     vertex!([0.0, 0.0], 1.0),
///     vertex!([1.0, 0.0], 2.0),
///     vertex!([0.0, 1.0], 3.0),
/// ])
/// .unwrap();
/// assert_eq!(VertexMean.evaluate(&triangle, &Point::new([5.0, 5.0])), 2.0);
/// ```
pub trait Evaluator<T, const D: usize>: Sync
where
    T: CoordinateScalar,
{
    /// Per-point result.
    type Output: Send;

    /// Evaluates the interpolant at one point.
    fn evaluate(&self, simplex: &Simplex<T, D>, point: &Point<T, D>) -> Self::Output;
}
