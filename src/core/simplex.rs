//! Triangles and tetrahedra carrying a sampled scalar field.
//!
//! A [`Simplex`] owns D+1 vertices and the inverted affine map computed from
//! them. All validation happens in the constructor: once a `Simplex` exists it
//! is guaranteed to be non-degenerate, finite, and of a supported dimension, so
//! the evaluators never fail.

#![forbid(unsafe_code)]

use super::vertex::Vertex;
use crate::geometry::{
    affine::{AffineMap, AffineMapError, GeometryConfig},
    point::Point,
    traits::coordinate::{CoordinateConversionError, CoordinateScalar, CoordinateValidationError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while constructing a [`Simplex`].
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::simplex::{Simplex, SimplexError};
/// use simplex_interp::vertex;
///
/// let flat = vec![
///     vertex!([0.0, 0.0, 0.0], 1.0),
///     vertex!([1.0, 0.0, 0.0], 2.0),
///     vertex!([0.0, 1.0, 0.0], 3.0),
///     vertex!([1.0, 1.0, 0.0], 4.0),
/// ];
/// let result = Simplex::<f64, 3>::new(flat);
/// assert!(matches!(result, Err(SimplexError::Degenerate { .. })));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimplexError {
    /// The vertices are affinely dependent (collinear in 2D, coplanar in 3D).
    #[error(
        "Degenerate simplex: normalized edge matrix determinant {determinant:e} is within tolerance {tolerance:e}"
    )]
    Degenerate {
        /// Determinant of the edge matrix divided by its infinity norm.
        determinant: f64,
        /// Threshold the normalized determinant was compared against.
        tolerance: f64,
    },
    /// The [`GeometryConfig`] tolerance is negative, NaN, or infinite.
    #[error("Invalid geometry config: singularity tolerance {tolerance} must be finite and non-negative")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },
    /// A count or coordinate length disagrees with the simplex dimension.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being checked.
        context: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Only triangles (D = 2) and tetrahedra (D = 3) are supported.
    #[error("Unsupported dimension {dimension}: only triangles (2D) and tetrahedra (3D) are supported")]
    UnsupportedDimension {
        /// The requested dimension.
        dimension: usize,
    },
    /// A vertex has a NaN or infinite coordinate or value.
    #[error("Invalid vertex {index}: {source}")]
    InvalidVertex {
        /// Index of the offending vertex.
        index: usize,
        /// The underlying validation error.
        source: CoordinateValidationError,
    },
    /// Converting the simplex to another scalar type failed.
    #[error("Failed to convert simplex to another precision: {source}")]
    Conversion {
        /// The underlying conversion error.
        #[from]
        source: CoordinateConversionError,
    },
}

impl From<AffineMapError> for SimplexError {
    fn from(err: AffineMapError) -> Self {
        match err {
            AffineMapError::Singular {
                determinant,
                tolerance,
            } => Self::Degenerate {
                determinant,
                tolerance,
            },
            AffineMapError::InvalidTolerance { tolerance } => Self::InvalidTolerance { tolerance },
            AffineMapError::UnsupportedDimension { dimension } => {
                Self::UnsupportedDimension { dimension }
            }
            AffineMapError::VertexCount {
                expected, actual, ..
            } => Self::DimensionMismatch {
                context: "vertex count",
                expected,
                actual,
            },
        }
    }
}

// =============================================================================
// SIMPLEX STRUCT DEFINITION
// =============================================================================

/// A non-degenerate triangle (`D = 2`) or tetrahedron (`D = 3`) with one field
/// value per vertex.
///
/// Immutable after construction. Serializes as its vertex list; deserializing
/// runs the same validation as [`Simplex::new`].
///
/// # Examples
///
/// ```rust
/// use simplex_interp::core::simplex::Simplex;
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
/// assert_eq!(triangle.dim(), 2);
/// assert_eq!(triangle.number_of_vertices(), 3);
/// assert_relative_eq!(triangle.geometry().volume(), 2.5, epsilon = 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "Vec<Vertex<T, D>>",
    try_from = "Vec<Vertex<T, D>>",
    bound(serialize = "T: CoordinateScalar", deserialize = "T: CoordinateScalar")
)]
pub struct Simplex<T, const D: usize>
where
    T: CoordinateScalar,
{
    vertices: Vec<Vertex<T, D>>,
    geometry: AffineMap<T, D>,
    config: GeometryConfig<T>,
}

impl<T, const D: usize> Simplex<T, D>
where
    T: CoordinateScalar,
{
    /// Builds a simplex with the default [`GeometryConfig`] for `T`.
    ///
    /// # Errors
    ///
    /// See [`Simplex::with_config`].
    pub fn new(vertices: Vec<Vertex<T, D>>) -> Result<Self, SimplexError> {
        Self::with_config(vertices, &GeometryConfig::default())
    }

    /// Builds a simplex, validating everything up front.
    ///
    /// Checks run in order: tolerance, dimension, vertex count, vertex
    /// finiteness, degeneracy.
    ///
    /// # Errors
    ///
    /// - [`SimplexError::InvalidTolerance`] if `config.singularity_tolerance` is
    ///   negative or not finite.
    /// - [`SimplexError::UnsupportedDimension`] if `D` is not 2 or 3.
    /// - [`SimplexError::DimensionMismatch`] if `vertices.len() != D + 1`.
    /// - [`SimplexError::InvalidVertex`] if a coordinate or value is NaN or infinite.
    /// - [`SimplexError::Degenerate`] if the vertices are affinely dependent.
    pub fn with_config(
        vertices: Vec<Vertex<T, D>>,
        config: &GeometryConfig<T>,
    ) -> Result<Self, SimplexError> {
        config.validate()?;
        if !(2..=3).contains(&D) {
            return Err(SimplexError::UnsupportedDimension { dimension: D });
        }
        if vertices.len() != D + 1 {
            return Err(SimplexError::DimensionMismatch {
                context: "vertex count",
                expected: D + 1,
                actual: vertices.len(),
            });
        }
        for (index, vertex) in vertices.iter().enumerate() {
            vertex
                .is_valid()
                .map_err(|source| SimplexError::InvalidVertex { index, source })?;
        }

        let points: Vec<Point<T, D>> = vertices.iter().map(|v| *v.point()).collect();
        let geometry = AffineMap::new(&points, config).map_err(|err| {
            tracing::warn!("rejecting {D}D simplex: {err}");
            SimplexError::from(err)
        })?;

        Ok(Self {
            vertices,
            geometry,
            config: *config,
        })
    }

    /// Builds a simplex from parallel slices of points and values.
    ///
    /// # Errors
    ///
    /// [`SimplexError::DimensionMismatch`] if the slices differ in length, plus
    /// everything [`Simplex::new`] reports.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use simplex_interp::core::simplex::Simplex;
    /// use simplex_interp::geometry::point::Point;
    /// use simplex_interp::geometry::traits::coordinate::Coordinate;
    ///
    /// let points = [
    ///     Point::new([0.0, 0.0, 0.0]),
    ///     Point::new([1.0, 0.0, 0.0]),
    ///     Point::new([0.0, 1.0, 0.0]),
    ///     Point::new([0.0, 0.0, 1.0]),
    /// ];
    /// let tet = Simplex::from_points(&points, &[0.0, 1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(tet.values().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0, 3.0]);
    ///
    /// assert!(Simplex::from_points(&points, &[0.0, 1.0]).is_err());
    /// ```
    pub fn from_points(points: &[Point<T, D>], values: &[T]) -> Result<Self, SimplexError> {
        if points.len() != values.len() {
            return Err(SimplexError::DimensionMismatch {
                context: "vertex values",
                expected: points.len(),
                actual: values.len(),
            });
        }
        Self::new(Vertex::from_points(points, values))
    }

    /// The vertices in construction order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex<T, D>] {
        &self.vertices
    }

    /// The field values in vertex order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.vertices.iter().map(Vertex::value)
    }

    /// The inverted affine map shared by all evaluations.
    #[inline]
    #[must_use]
    pub const fn geometry(&self) -> &AffineMap<T, D> {
        &self.geometry
    }

    /// The configuration the simplex was validated under.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeometryConfig<T> {
        &self.config
    }

    /// Spatial dimension (2 or 3).
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }

    /// Number of vertices, always `D + 1`.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Rebuilds the simplex in another precision.
    ///
    /// The geometry is recomputed from the converted vertices, so the result
    /// carries rounding appropriate to `U` rather than a rounded copy of the
    /// original inverse.
    ///
    /// A default configuration maps to the default for `U`; a custom tolerance
    /// is carried over to `U` unchanged.
    ///
    /// # Errors
    ///
    /// [`SimplexError::Conversion`] if a value does not fit `U`, or
    /// [`SimplexError::Degenerate`] if rounding collapses the simplex.
    pub fn cast<U>(&self) -> Result<Simplex<U, D>, SimplexError>
    where
        U: CoordinateScalar,
    {
        let vertices = self
            .vertices
            .iter()
            .map(Vertex::cast::<U>)
            .collect::<Result<Vec<_>, _>>()?;
        let config = if self.config == GeometryConfig::default() {
            GeometryConfig::default()
        } else {
            self.config
                .cast()
                .ok_or_else(|| CoordinateConversionError::ConversionFailed {
                    coordinate_index: 0,
                    coordinate_value: format!("{:?}", self.config.singularity_tolerance),
                    from_type: std::any::type_name::<T>(),
                    to_type: std::any::type_name::<U>(),
                })?
        };
        Simplex::with_config(vertices, &config)
    }
}

impl<T, const D: usize> From<Simplex<T, D>> for Vec<Vertex<T, D>>
where
    T: CoordinateScalar,
{
    fn from(simplex: Simplex<T, D>) -> Self {
        simplex.vertices
    }
}

impl<T, const D: usize> TryFrom<Vec<Vertex<T, D>>> for Simplex<T, D>
where
    T: CoordinateScalar,
{
    type Error = SimplexError;

    fn try_from(vertices: Vec<Vertex<T, D>>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::traits::coordinate::Coordinate;
    use crate::vertex;
    use approx::assert_relative_eq;

    fn sample_triangle() -> Vec<Vertex<f64, 2>> {
        vec![
            vertex!([2.0, 2.0], 1.0),
            vertex!([4.0, 3.0], 2.0),
            vertex!([1.0, 4.0], 3.0),
        ]
    }

    #[test]
    fn triangle_construction_succeeds() {
        let simplex = Simplex::new(sample_triangle()).unwrap();
        assert_eq!(simplex.dim(), 2);
        assert_eq!(simplex.number_of_vertices(), 3);
        assert_relative_eq!(simplex.geometry().determinant(), 5.0, epsilon = 1e-12);
        assert_eq!(simplex.values().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn wrong_vertex_count_is_dimension_mismatch() {
        let mut vertices = sample_triangle();
        vertices.push(vertex!([0.0, 0.0], 0.0));
        assert_eq!(
            Simplex::new(vertices).unwrap_err(),
            SimplexError::DimensionMismatch {
                context: "vertex count",
                expected: 3,
                actual: 4,
            }
        );
    }

    #[test]
    fn non_finite_value_is_invalid_vertex() {
        let mut vertices = sample_triangle();
        vertices[2] = Vertex::new(Point::new([1.0, 4.0]), f64::NAN);
        assert!(matches!(
            Simplex::new(vertices),
            Err(SimplexError::InvalidVertex { index: 2, .. })
        ));
    }

    #[test]
    fn non_finite_coordinate_is_invalid_vertex() {
        let mut vertices = sample_triangle();
        vertices[0] = Vertex::new(Point::new([f64::INFINITY, 4.0]), 1.0);
        assert!(matches!(
            Simplex::new(vertices),
            Err(SimplexError::InvalidVertex { index: 0, .. })
        ));
    }

    #[test]
    fn collinear_triangle_is_degenerate() {
        let vertices = vec![
            vertex!([0.0, 0.0], 1.0),
            vertex!([1.0, 2.0], 2.0),
            vertex!([2.0, 4.0], 3.0),
        ];
        assert!(matches!(
            Simplex::<f64, 2>::new(vertices),
            Err(SimplexError::Degenerate { .. })
        ));
    }

    #[test]
    fn unsupported_dimension_is_rejected_before_count() {
        let vertices: Vec<Vertex<f64, 1>> = vec![vertex!([0.0], 1.0), vertex!([1.0], 2.0)];
        assert_eq!(
            Simplex::new(vertices).unwrap_err(),
            SimplexError::UnsupportedDimension { dimension: 1 }
        );
    }

    #[test]
    fn affine_map_errors_convert() {
        let err: SimplexError = AffineMapError::Singular {
            determinant: 0.0,
            tolerance: 1e-12,
        }
        .into();
        assert!(matches!(err, SimplexError::Degenerate { .. }));

        let err: SimplexError = AffineMapError::VertexCount {
            expected: 4,
            actual: 3,
            dimension: 3,
        }
        .into();
        assert!(matches!(
            err,
            SimplexError::DimensionMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn cast_rebuilds_geometry_in_single_precision() {
        let simplex = Simplex::new(sample_triangle()).unwrap();
        let single: Simplex<f32, 2> = simplex.cast().unwrap();
        assert_relative_eq!(single.geometry().determinant(), 5.0_f32, epsilon = 1e-5);
        assert_eq!(single.values().collect::<Vec<_>>(), vec![1.0_f32, 2.0, 3.0]);
    }

    #[test]
    fn negative_tolerance_is_rejected_for_collinear_triangle() {
        let collinear = vec![
            vertex!([0.0, 0.0], 1.0),
            vertex!([1.0, 1.0], 2.0),
            vertex!([2.0, 2.0], 3.0),
        ];
        let config = GeometryConfig {
            singularity_tolerance: -1.0,
        };
        assert_eq!(
            Simplex::<f64, 2>::with_config(collinear.clone(), &config).unwrap_err(),
            SimplexError::InvalidTolerance { tolerance: -1.0 }
        );

        let nan = GeometryConfig {
            singularity_tolerance: f64::NAN,
        };
        assert!(matches!(
            Simplex::<f64, 2>::with_config(sample_triangle(), &nan),
            Err(SimplexError::InvalidTolerance { .. })
        ));
    }

    fn thin_triangle() -> Vec<Vertex<f64, 2>> {
        // Normalized determinant is about 4.4e-9
        vec![
            vertex!([0.0, 0.0], 1.0),
            vertex!([1.0, 0.0], 2.0),
            vertex!([0.5, 1e-8], 3.0),
        ]
    }

    #[test]
    fn cast_carries_custom_config() {
        let loose = GeometryConfig {
            singularity_tolerance: 1e-10,
        };
        let simplex = Simplex::with_config(thin_triangle(), &loose).unwrap();
        let single: Simplex<f32, 2> = simplex.cast().unwrap();
        assert_relative_eq!(single.config().singularity_tolerance, 1e-10_f32);
    }

    #[test]
    fn cast_maps_default_config_to_target_default() {
        let simplex = Simplex::new(sample_triangle()).unwrap();
        let single: Simplex<f32, 2> = simplex.cast().unwrap();
        assert_eq!(single.config(), &GeometryConfig::<f32>::default());

        // The f32 default tolerance is coarser than the thin triangle
        let thin = Simplex::new(thin_triangle()).unwrap();
        assert!(matches!(
            thin.cast::<f32>(),
            Err(SimplexError::Degenerate { .. })
        ));
    }

    #[test]
    fn serde_roundtrip_rebuilds_geometry() {
        let simplex = Simplex::new(sample_triangle()).unwrap();
        let json = serde_json::to_string(&simplex).unwrap();
        let back: Simplex<f64, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, simplex);
    }

    #[test]
    fn deserializing_degenerate_simplex_fails() {
        let json = r#"[
            {"point":[0.0,0.0],"value":1.0},
            {"point":[1.0,1.0],"value":2.0},
            {"point":[2.0,2.0],"value":3.0}
        ]"#;
        let err = serde_json::from_str::<Simplex<f64, 2>>(json).unwrap_err();
        assert!(err.to_string().contains("Degenerate simplex"));
    }

    #[test]
    fn simplex_is_send_and_sync() {
        assert!(crate::is_normal::<Simplex<f64, 3>>());
        assert!(crate::is_normal::<Simplex<f32, 2>>());
    }
}
