//! Measure computations for simplices.
//!
//! Barycentric weights are volume ratios: the weight of vertex i is the measure
//! of the sub-simplex opposite vertex i divided by the measure of the whole
//! simplex. The helpers here expose those measures for the fixed-dimension
//! simplices this crate supports.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::CoordinateScalar;
use num_traits::Float;

/// `D!` as a scalar.
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::util::factorial;
///
/// assert_eq!(factorial::<f64>(2), 2.0);
/// assert_eq!(factorial::<f32>(3), 6.0);
/// assert_eq!(factorial::<f64>(0), 1.0);
/// ```
#[must_use]
pub fn factorial<T>(n: usize) -> T
where
    T: CoordinateScalar,
{
    let mut result = T::one();
    let mut k = T::one();
    for _ in 1..n {
        k = k + T::one();
        result = result * k;
    }
    result
}

/// Measure of the unit reference simplex in D dimensions, `1 / D!`.
///
/// The reference triangle `(0,0), (1,0), (0,1)` has area 1/2 and the reference
/// tetrahedron (trirectangular, unit legs) has volume 1/6.
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::util::reference_simplex_volume;
/// use approx::assert_relative_eq;
///
/// assert_relative_eq!(reference_simplex_volume::<f64>(2), 0.5);
/// assert_relative_eq!(reference_simplex_volume::<f64>(3), 1.0 / 6.0);
/// ```
#[must_use]
pub fn reference_simplex_volume<T>(dimension: usize) -> T
where
    T: CoordinateScalar,
{
    T::one() / factorial(dimension)
}

/// Measure of a simplex whose edge matrix has determinant `determinant`.
///
/// The affine map sends the reference simplex onto the simplex, scaling
/// measures by `|det J|`, so the simplex volume is `|det J| / D!`.
#[must_use]
pub fn simplex_volume_from_determinant<T>(determinant: T, dimension: usize) -> T
where
    T: CoordinateScalar,
{
    Float::abs(determinant) * reference_simplex_volume(dimension)
}
