//! Data and operations on simplex vertices.
//!
//! A [`Vertex`] pairs a D-dimensional [`Point`] with the scalar field value
//! known at that point.
//!
//! # Examples
//!
//! ```rust
//! use simplex_interp::core::vertex::Vertex;
//! use simplex_interp::vertex;
//!
//! let v: Vertex<f64, 3> = vertex!([1.0, 2.0, 3.0], 0.5);
//! assert_eq!(v.value(), 0.5);
//! ```

#![forbid(unsafe_code)]

use crate::geometry::{
    point::Point,
    traits::coordinate::{
        Coordinate, CoordinateConversionError, CoordinateScalar, CoordinateValidationError,
    },
};
use serde::{Deserialize, Serialize};

// =============================================================================
// CONVENIENCE MACROS
// =============================================================================

/// Convenience macro for creating vertices with less boilerplate.
///
/// Takes a coordinate array and the field value at that location.
///
/// # Panics
///
/// Panics if the coordinates cannot be converted into a finite `Point` of the
/// target scalar type.
///
/// # Usage
///
/// ```rust
/// use simplex_interp::vertex;
/// use simplex_interp::core::vertex::Vertex;
///
/// let v1: Vertex<f64, 2> = vertex!([2.0, 2.0], 1.0);
/// let v2: Vertex<f32, 3> = vertex!([0.0, 1.0, 0.0], 4.0);
/// assert_eq!(v2.point().coords(), &[0.0_f32, 1.0, 0.0]);
/// ```
#[macro_export]
macro_rules! vertex {
    ($coords:expr, $value:expr) => {
        $crate::core::vertex::Vertex::new(
            $crate::geometry::point::Point::try_from($coords)
                .expect("Failed to convert coordinates to Point: invalid or out-of-range values"),
            $value,
        )
    };
}

// =============================================================================
// VERTEX STRUCT DEFINITION
// =============================================================================

/// A simplex vertex: a location and the field value sampled there.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: CoordinateScalar",
    deserialize = "T: CoordinateScalar"
))]
pub struct Vertex<T, const D: usize>
where
    T: CoordinateScalar,
{
    point: Point<T, D>,
    value: T,
}

impl<T, const D: usize> Vertex<T, D>
where
    T: CoordinateScalar,
{
    /// Creates a vertex from a point and its field value.
    #[inline]
    #[must_use]
    pub const fn new(point: Point<T, D>, value: T) -> Self {
        Self { point, value }
    }

    /// The vertex location.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> &Point<T, D> {
        &self.point
    }

    /// The field value at the vertex.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> T {
        self.value
    }

    /// Zips points with values into vertices.
    ///
    /// Extra points or values beyond the shorter of the two inputs are ignored;
    /// callers that need a length check use
    /// [`Simplex::from_points`](crate::core::simplex::Simplex::from_points).
    #[must_use]
    pub fn from_points(points: &[Point<T, D>], values: &[T]) -> Vec<Self> {
        points
            .iter()
            .zip(values.iter())
            .map(|(&point, &value)| Self::new(point, value))
            .collect()
    }

    /// Checks that both the coordinates and the value are finite.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateValidationError::InvalidCoordinate`. A non-finite
    /// value is reported with `coordinate_index == D`, one past the last
    /// spatial coordinate.
    pub fn is_valid(&self) -> Result<(), CoordinateValidationError> {
        self.point.validate()?;
        if !self.value.is_finite_generic() {
            return Err(CoordinateValidationError::InvalidCoordinate {
                coordinate_index: D,
                coordinate_value: format!("{:?}", self.value),
                dimension: D,
            });
        }
        Ok(())
    }

    /// Converts the vertex to another scalar type.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateConversionError` if the coordinates or the value do
    /// not fit the target type. A failing value is reported at index `D`.
    pub fn cast<U>(&self) -> Result<Vertex<U, D>, CoordinateConversionError>
    where
        U: CoordinateScalar,
    {
        let point = self.point.cast()?;
        let value: U = num_traits::cast(self.value)
            .filter(|v: &U| v.is_finite_generic())
            .ok_or_else(|| CoordinateConversionError::NonFiniteValue {
                coordinate_index: D,
                coordinate_value: format!("{:?}", self.value),
            })?;
        Ok(Vertex::new(point, value))
    }
}
