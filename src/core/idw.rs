//! Inverse-distance weighting (Shepard interpolation) over the simplex vertices.
//!
//! ```text
//! wᵢ = 1 / dᵢᵖ,   f(x) = Σ wᵢ fᵢ / Σ wᵢ
//! ```
//!
//! The interpolant is defined everywhere, inside or outside the simplex, and
//! does not use the affine map at all. A query point that coincides with a
//! vertex returns that vertex's value exactly.
//!
//! Weights are evaluated as `(d_min / dᵢ)ᵖ`, which differs from `1 / dᵢᵖ` by the
//! common factor `d_minᵖ` and therefore gives the same quotient. Every ratio lies
//! in `(0, 1]` and at least one equals 1, so the denominator never underflows,
//! even for `p = 128` in single precision.

#![forbid(unsafe_code)]

use super::evaluate::EvaluationError;
use super::simplex::Simplex;
use super::traits::evaluator::Evaluator;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::distance;
use num_traits::Float;
use smallvec::SmallVec;

/// Default IDW exponent.
pub const DEFAULT_POWER: f64 = 2.0;

/// [`DEFAULT_POWER`] in the scalar type `T`.
pub(crate) fn default_power<T: CoordinateScalar>() -> T {
    num_traits::cast(DEFAULT_POWER).unwrap_or_else(|| T::one() + T::one())
}

/// The inverse-distance interpolation strategy with exponent `p`.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::idw::InverseDistance;
/// use simplex_interp::core::simplex::Simplex;
/// use simplex_interp::core::traits::Evaluator;
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::Coordinate;
/// use simplex_interp::vertex;
///
/// let triangle = Simplex::new(vec![
///     vertex!([2.0, 2.0], 1.0),
///     vertex!([4.0, 3.0], 2.0),
///     vertex!([1.0, 4.0], 3.0),
/// ])
/// .unwrap();
///
/// let idw = InverseDistance::new(2.0).unwrap();
/// assert_eq!(idw.evaluate(&triangle, &Point::new([4.0, 3.0])), 2.0);
///
/// assert!(InverseDistance::new(0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseDistance<T> {
    power: T,
}

impl<T> InverseDistance<T>
where
    T: CoordinateScalar,
{
    /// Creates an evaluator with exponent `power`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::InvalidConfig`] unless `power` is finite and strictly
    /// positive.
    pub fn new(power: T) -> Result<Self, EvaluationError> {
        if !power.is_finite_generic() || power <= T::zero() {
            return Err(EvaluationError::InvalidConfig {
                message: format!("IDW power must be a finite positive number, got {power:?}"),
            });
        }
        Ok(Self { power })
    }

    /// The exponent `p`.
    #[inline]
    #[must_use]
    pub const fn power(&self) -> T {
        self.power
    }
}

impl<T> Default for InverseDistance<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            power: default_power(),
        }
    }
}

impl<T, const D: usize> Evaluator<T, D> for InverseDistance<T>
where
    T: CoordinateScalar,
{
    type Output = T;

    fn evaluate(&self, simplex: &Simplex<T, D>, point: &Point<T, D>) -> T {
        let mut distances: SmallVec<[T; 4]> = SmallVec::with_capacity(D + 1);
        for vertex in simplex.vertices() {
            let d = distance(point, vertex.point());
            if d == T::zero() {
                return vertex.value();
            }
            distances.push(d);
        }

        let nearest = distances
            .iter()
            .fold(T::infinity(), |acc, &d| Float::min(acc, d));

        let (weighted, total) = distances.iter().zip(simplex.values()).fold(
            (T::zero(), T::zero()),
            |(weighted, total), (&d, value)| {
                let w = Float::powf(nearest / d, self.power);
                (weighted + w * value, total + w)
            },
        );
        weighted / total
    }
}
