//! Vector norm and distance computations.
//!
//! This module provides numerically stable functions for computing norms and
//! distances of d-dimensional vectors.

use num_traits::Float;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Compute the d-dimensional hypot (Euclidean norm) of a coordinate array.
///
/// All components are scaled by the largest magnitude before squaring, so the
/// result neither overflows for huge components nor underflows to zero for
/// tiny non-zero ones. In particular `hypot(v) == 0` iff every component is zero,
/// which the inverse-distance evaluator relies on to detect coincident points.
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::util::hypot;
///
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// assert_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0);
/// assert!(hypot(&[1e-200_f64, 0.0]) > 0.0);
/// ```
pub fn hypot<T, const D: usize>(coords: &[T; D]) -> T
where
    T: CoordinateScalar,
{
    match D {
        0 => T::zero(),
        1 => Float::abs(coords[0]),
        _ => {
            let max_abs = coords
                .iter()
                .map(|&x| Float::abs(x))
                .fold(T::zero(), |acc, x| if x > acc { x } else { acc });

            if max_abs == T::zero() {
                return T::zero();
            }

            let sum_of_scaled_squares = coords
                .iter()
                .map(|&x| {
                    let scaled = x / max_abs;
                    scaled * scaled
                })
                .fold(T::zero(), |acc, x| acc + x);

            max_abs * Float::sqrt(sum_of_scaled_squares)
        }
    }
}

/// Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::Coordinate;
/// use simplex_interp::geometry::util::distance;
///
/// let a = Point::new([1.0, 1.0]);
/// let b = Point::new([4.0, 5.0]);
/// assert_eq!(distance(&a, &b), 5.0);
/// ```
#[inline]
pub fn distance<T, const D: usize>(a: &Point<T, D>, b: &Point<T, D>) -> T
where
    T: CoordinateScalar,
{
    hypot(&a.vector_from(b))
}
