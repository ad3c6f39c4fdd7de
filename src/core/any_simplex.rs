//! Dimension-erased entry points.
//!
//! [`Simplex`] fixes its dimension at compile time. Callers that only learn the
//! dimension at run time (from a file, a network message, a scripting layer)
//! pass plain coordinate slices to [`make_simplex`] instead and get back an
//! [`AnySimplex`], which dispatches to the 2D or 3D implementation.
//!
//! # Examples
//!
//! ```rust
//! use simplex_interp::core::any_simplex::{make_simplex, AnySimplex};
//! use simplex_interp::core::evaluate::{EvaluationOptions, Method};
//! use simplex_interp::core::simplex::SimplexError;
//!
//! let vertices = vec![vec![2.0, 2.0], vec![4.0, 3.0], vec![1.0, 4.0]];
//! let simplex = make_simplex(&vertices, &[1.0, 2.0, 3.0]).unwrap();
//! assert!(matches!(simplex, AnySimplex::Triangle(_)));
//!
//! let result = simplex
//!     .evaluate(&[[7.0 / 3.0, 3.0]], Method::Barycentric, &EvaluationOptions::default())
//!     .unwrap();
//! assert_eq!(result.inside(), Some(&[true][..]));
//!
//! let coplanar = vec![
//!     vec![0.0, 0.0, 0.0],
//!     vec![1.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![1.0, 1.0, 0.0],
//! ];
//! assert!(matches!(
//!     make_simplex(&coplanar, &[0.0, 1.0, 2.0, 3.0]),
//!     Err(SimplexError::Degenerate { .. })
//! ));
//! ```

#![forbid(unsafe_code)]

use super::evaluate::{Evaluation, EvaluationError, EvaluationOptions, Method, evaluate};
use super::simplex::{Simplex, SimplexError};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{Coordinate, CoordinateScalar};
use serde::{Deserialize, Serialize};

/// A triangle or a tetrahedron, chosen at run time.
///
/// Serializes as the vertex list of the wrapped simplex; on deserialization the
/// coordinate length selects the variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    untagged,
    bound(serialize = "T: CoordinateScalar", deserialize = "T: CoordinateScalar")
)]
pub enum AnySimplex<T>
where
    T: CoordinateScalar,
{
    /// A 2D simplex.
    Triangle(Simplex<T, 2>),
    /// A 3D simplex.
    Tetrahedron(Simplex<T, 3>),
}

/// Builds a simplex whose dimension is inferred from the vertex count.
///
/// Three vertices make a triangle, four a tetrahedron. Every vertex must have
/// exactly `d` coordinates and `values` must have one entry per vertex.
///
/// # Errors
///
/// - [`SimplexError::DimensionMismatch`] for a vertex count other than 3 or 4
///   (context `"vertex count"`), a coordinate tuple of the wrong length
///   (`"vertex coordinates"`), or a value count that differs from the vertex
///   count (`"vertex values"`).
/// - [`SimplexError::InvalidVertex`] for NaN or infinite inputs.
/// - [`SimplexError::Degenerate`] for collinear or coplanar vertices.
pub fn make_simplex<T, V>(vertices: &[V], values: &[T]) -> Result<AnySimplex<T>, SimplexError>
where
    T: CoordinateScalar,
    V: AsRef<[T]>,
{
    let dimension = match vertices.len() {
        3 => 2,
        4 => 3,
        actual => {
            // Report against the dimension the first vertex suggests, if any
            let expected = vertices
                .first()
                .map(|v| v.as_ref().len())
                .filter(|d| (2..=3).contains(d))
                .map_or(4, |d| d + 1);
            return Err(SimplexError::DimensionMismatch {
                context: "vertex count",
                expected,
                actual,
            });
        }
    };

    for vertex in vertices {
        let actual = vertex.as_ref().len();
        if actual != dimension {
            return Err(SimplexError::DimensionMismatch {
                context: "vertex coordinates",
                expected: dimension,
                actual,
            });
        }
    }
    if values.len() != vertices.len() {
        return Err(SimplexError::DimensionMismatch {
            context: "vertex values",
            expected: vertices.len(),
            actual: values.len(),
        });
    }

    if dimension == 2 {
        build::<T, V, 2>(vertices, values).map(AnySimplex::Triangle)
    } else {
        build::<T, V, 3>(vertices, values).map(AnySimplex::Tetrahedron)
    }
}

fn build<T, V, const D: usize>(vertices: &[V], values: &[T]) -> Result<Simplex<T, D>, SimplexError>
where
    T: CoordinateScalar,
    V: AsRef<[T]>,
{
    let points = vertices
        .iter()
        .map(|v| {
            let coords = v.as_ref();
            <[T; D]>::try_from(coords)
                .map(|array| Point::new(array))
                .map_err(|_| SimplexError::DimensionMismatch {
                    context: "vertex coordinates",
                    expected: D,
                    actual: coords.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Simplex::from_points(&points, values)
}

fn to_points<T, P, const D: usize>(points: &[P]) -> Result<Vec<Point<T, D>>, EvaluationError>
where
    T: CoordinateScalar,
    P: AsRef<[T]>,
{
    points
        .iter()
        .enumerate()
        .map(|(point_index, p)| {
            let coords = p.as_ref();
            <[T; D]>::try_from(coords)
                .map(|array| Point::new(array))
                .map_err(|_| EvaluationError::DimensionMismatch {
                    point_index,
                    expected: D,
                    actual: coords.len(),
                })
        })
        .collect()
}

impl<T> AnySimplex<T>
where
    T: CoordinateScalar,
{
    /// Spatial dimension (2 or 3).
    #[must_use]
    pub const fn dim(&self) -> usize {
        match self {
            Self::Triangle(_) => 2,
            Self::Tetrahedron(_) => 3,
        }
    }

    /// Number of vertices (3 or 4).
    #[must_use]
    pub const fn number_of_vertices(&self) -> usize {
        self.dim() + 1
    }

    /// The field values in vertex order.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        match self {
            Self::Triangle(s) => s.values().collect(),
            Self::Tetrahedron(s) => s.values().collect(),
        }
    }

    /// Signed area or volume scale of the simplex, `det J`.
    #[must_use]
    pub fn determinant(&self) -> T {
        match self {
            Self::Triangle(s) => s.geometry().determinant(),
            Self::Tetrahedron(s) => s.geometry().determinant(),
        }
    }

    /// Evaluates the simplex at points given as coordinate slices.
    ///
    /// Every point's length is checked before anything is evaluated.
    ///
    /// # Errors
    ///
    /// - [`EvaluationError::DimensionMismatch`] naming the first point whose
    ///   length differs from [`AnySimplex::dim`].
    /// - [`EvaluationError::InvalidConfig`] for an invalid IDW power.
    pub fn evaluate<P>(
        &self,
        points: &[P],
        method: Method,
        options: &EvaluationOptions<T>,
    ) -> Result<Evaluation<T>, EvaluationError>
    where
        P: AsRef<[T]>,
    {
        match self {
            Self::Triangle(s) => evaluate(s, &to_points::<T, P, 2>(points)?, method, options),
            Self::Tetrahedron(s) => evaluate(s, &to_points::<T, P, 3>(points)?, method, options),
        }
    }
}

impl<T> From<Simplex<T, 2>> for AnySimplex<T>
where
    T: CoordinateScalar,
{
    fn from(simplex: Simplex<T, 2>) -> Self {
        Self::Triangle(simplex)
    }
}

impl<T> From<Simplex<T, 3>> for AnySimplex<T>
where
    T: CoordinateScalar,
{
    fn from(simplex: Simplex<T, 3>) -> Self {
        Self::Tetrahedron(simplex)
    }
}
