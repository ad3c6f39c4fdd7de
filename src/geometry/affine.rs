//! Affine map from ambient space to the reference simplex.
//!
//! A simplex with vertices `v₀ … v_D` is the image of the unit reference simplex
//! under `x = v₀ + J ξ`, where the columns of the edge matrix `J` are the edge
//! vectors `vᵢ − v₀`. [`AffineMap`] stores `J⁻¹` so that any query point can be
//! pulled back to reference coordinates `ξ = J⁻¹ (x − v₀)` with one small
//! matrix-vector product.
//!
//! The inverse is computed once, with the closed-form adjugate formula for the
//! fixed 2×2 or 3×3 case. Only triangles and tetrahedra are supported.

#![forbid(unsafe_code)]

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::{reference_simplex_volume, simplex_volume_from_determinant};
use num_traits::Float;
use thiserror::Error;

/// Errors raised while building an [`AffineMap`].
///
/// Scalar values are stored as `f64` regardless of the precision the map was
/// built in, so the error type does not carry the scalar parameter.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AffineMapError {
    /// The edge matrix is numerically singular: the vertices are affinely dependent.
    #[error(
        "Degenerate simplex: normalized edge matrix determinant {determinant:e} is within tolerance {tolerance:e}"
    )]
    Singular {
        /// Determinant of `J / ‖J‖∞`.
        determinant: f64,
        /// Threshold the normalized determinant was compared against.
        tolerance: f64,
    },
    /// The configured singularity tolerance is negative, NaN, or infinite.
    #[error("Invalid singularity tolerance {tolerance}: must be finite and non-negative")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },
    /// Closed-form inversion is only available for D = 2 and D = 3.
    #[error("Unsupported dimension {dimension}: only triangles (2D) and tetrahedra (3D) are supported")]
    UnsupportedDimension {
        /// The requested dimension.
        dimension: usize,
    },
    /// The wrong number of vertices was supplied.
    #[error("Expected {expected} vertices for a {dimension}D simplex, got {actual}")]
    VertexCount {
        /// Number of vertices required (D + 1).
        expected: usize,
        /// Number of vertices supplied.
        actual: usize,
        /// Simplex dimension.
        dimension: usize,
    },
}

/// Configuration for simplex geometry construction.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::geometry::affine::GeometryConfig;
///
/// let config = GeometryConfig::<f64>::default();
/// assert_eq!(config.singularity_tolerance, 1e-12);
///
/// let strict = GeometryConfig { singularity_tolerance: 1e-6_f64 };
/// assert!(strict.singularity_tolerance > config.singularity_tolerance);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryConfig<T> {
    /// Relative determinant threshold; must be finite and non-negative.
    ///
    /// The edge matrix is rejected when `|det(J / ‖J‖∞)| <= singularity_tolerance`,
    /// which makes the test independent of the simplex's absolute size.
    pub singularity_tolerance: T,
}

impl<T: CoordinateScalar> GeometryConfig<T> {
    /// Checks that the tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// [`AffineMapError::InvalidTolerance`] otherwise.
    pub fn validate(&self) -> Result<(), AffineMapError> {
        let tolerance = self.singularity_tolerance;
        if tolerance.is_finite_generic() && tolerance >= T::zero() {
            Ok(())
        } else {
            Err(AffineMapError::InvalidTolerance {
                tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
            })
        }
    }

    /// Converts the tolerance to another scalar type.
    ///
    /// Returns `None` if the value cannot be represented in `U`.
    #[must_use]
    pub fn cast<U: CoordinateScalar>(&self) -> Option<GeometryConfig<U>> {
        num_traits::cast(self.singularity_tolerance).map(|singularity_tolerance| GeometryConfig {
            singularity_tolerance,
        })
    }
}

impl<T: CoordinateScalar> Default for GeometryConfig<T> {
    fn default() -> Self {
        Self {
            singularity_tolerance: T::singularity_tolerance(),
        }
    }
}

/// The inverted affine map of a non-degenerate triangle or tetrahedron.
///
/// Immutable after construction; every query borrows it read-only, so a single
/// map can be shared by any number of concurrent evaluations.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::geometry::affine::{AffineMap, GeometryConfig};
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::Coordinate;
/// use approx::assert_relative_eq;
///
/// let vertices = [
///     Point::new([2.0, 2.0]),
///     Point::new([4.0, 3.0]),
///     Point::new([1.0, 4.0]),
/// ];
/// let map = AffineMap::new(&vertices, &GeometryConfig::default()).unwrap();
/// assert_relative_eq!(map.determinant(), 5.0, epsilon = 1e-12);
///
/// // Vertex 1 maps to the first reference axis
/// let local = map.to_local(&Point::new([4.0, 3.0]));
/// assert_relative_eq!(local[0], 1.0, epsilon = 1e-12);
/// assert_relative_eq!(local[1], 0.0, epsilon = 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// Vertex 0, the translation part of the map.
    origin: Point<T, D>,
    /// `J⁻¹`, row-major.
    inverse: [[T; D]; D],
    /// `det J`.
    determinant: T,
}

impl<T, const D: usize> AffineMap<T, D>
where
    T: CoordinateScalar,
{
    /// Builds and inverts the edge matrix of the simplex spanned by `vertices`.
    ///
    /// The edge matrix is divided by its infinity norm `s = ‖J‖∞` before the
    /// determinant and adjugate are formed, so neither overflows nor underflows
    /// for very large or very small simplices. The inverse is then
    /// `adj(J / s) / (det(J / s) · s)`.
    ///
    /// # Errors
    ///
    /// - [`AffineMapError::InvalidTolerance`] if the configured tolerance is
    ///   negative or not finite.
    /// - [`AffineMapError::UnsupportedDimension`] if `D` is not 2 or 3.
    /// - [`AffineMapError::VertexCount`] if `vertices.len() != D + 1`.
    /// - [`AffineMapError::Singular`] if the normalized determinant is within the
    ///   singularity tolerance, i.e. the vertices are affinely dependent.
    pub fn new(vertices: &[Point<T, D>], config: &GeometryConfig<T>) -> Result<Self, AffineMapError> {
        config.validate()?;
        if !(2..=3).contains(&D) {
            return Err(AffineMapError::UnsupportedDimension { dimension: D });
        }
        if vertices.len() != D + 1 {
            return Err(AffineMapError::VertexCount {
                expected: D + 1,
                actual: vertices.len(),
                dimension: D,
            });
        }

        let origin = vertices[0];
        let tolerance = config.singularity_tolerance;
        let singular = |determinant: T| AffineMapError::Singular {
            determinant: determinant.to_f64().unwrap_or(f64::NAN),
            tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
        };

        let mut jacobian = edge_matrix(&origin, &vertices[1..]);
        let scale = infinity_norm(&jacobian);
        // Coincident vertices, or edges too long to measure
        if !(scale > T::zero() && scale.is_finite_generic()) {
            return Err(singular(T::zero()));
        }
        for row in &mut jacobian {
            for entry in row.iter_mut() {
                *entry = *entry / scale;
            }
        }
        let (normalized, adjugate) = determinant_and_adjugate(&jacobian);

        // NaN determinants fail the comparison below and are rejected too
        if !(Float::abs(normalized) > tolerance) {
            return Err(singular(normalized));
        }

        let divisor = normalized * scale;
        let mut inverse = adjugate;
        for row in &mut inverse {
            for entry in row.iter_mut() {
                *entry = *entry / divisor;
            }
        }
        let determinant = (0..D).fold(normalized, |acc, _| acc * scale);

        tracing::debug!(
            "built {}D affine map: det={:?}, normalized det={:?}, scale={:?}",
            D,
            determinant,
            normalized,
            scale
        );

        Ok(Self {
            origin,
            inverse,
            determinant,
        })
    }

    /// Maps an ambient point to reference coordinates, `J⁻¹ (point − v₀)`.
    ///
    /// Component `i` is the barycentric weight of vertex `i + 1`.
    #[inline]
    #[must_use]
    pub fn to_local(&self, point: &Point<T, D>) -> [T; D] {
        let offset = point.vector_from(&self.origin);
        let mut local = [T::zero(); D];
        for (out, row) in local.iter_mut().zip(self.inverse.iter()) {
            *out = row
                .iter()
                .zip(offset.iter())
                .fold(T::zero(), |acc, (&a, &b)| acc + a * b);
        }
        local
    }

    /// Vertex 0 of the simplex.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> &Point<T, D> {
        &self.origin
    }

    /// The inverse edge matrix, row-major.
    #[inline]
    #[must_use]
    pub const fn inverse(&self) -> &[[T; D]; D] {
        &self.inverse
    }

    /// Determinant of the edge matrix. Its sign is the simplex orientation.
    ///
    /// Reconstructed as `det(J / s) · sᴰ`, so it may round to zero or infinity
    /// in single precision for extreme scales even though the map itself is
    /// well conditioned.
    #[inline]
    #[must_use]
    pub const fn determinant(&self) -> T {
        self.determinant
    }

    /// Area (2D) or volume (3D) of the simplex.
    #[must_use]
    pub fn volume(&self) -> T {
        simplex_volume_from_determinant(self.determinant, D)
    }

    /// Area or volume of the unit reference simplex, `1 / D!`.
    #[must_use]
    pub fn reference_volume(&self) -> T {
        reference_simplex_volume(D)
    }
}

/// Edge matrix with columns `vᵢ − v₀`.
fn edge_matrix<T, const D: usize>(origin: &Point<T, D>, rest: &[Point<T, D>]) -> [[T; D]; D]
where
    T: CoordinateScalar,
{
    let mut m = [[T::zero(); D]; D];
    for (col, vertex) in rest.iter().enumerate() {
        let edge = vertex.vector_from(origin);
        for (row, &component) in edge.iter().enumerate() {
            m[row][col] = component;
        }
    }
    m
}

/// Maximum absolute row sum.
fn infinity_norm<T, const D: usize>(m: &[[T; D]; D]) -> T
where
    T: CoordinateScalar,
{
    m.iter()
        .map(|row| row.iter().fold(T::zero(), |acc, &x| acc + Float::abs(x)))
        .fold(T::zero(), |acc, x| if x > acc { x } else { acc })
}

/// Closed-form determinant and adjugate for the 2×2 and 3×3 cases.
///
/// Callers guarantee `D ∈ {2, 3}`.
fn determinant_and_adjugate<T, const D: usize>(m: &[[T; D]; D]) -> (T, [[T; D]; D])
where
    T: CoordinateScalar,
{
    let mut adj = [[T::zero(); D]; D];
    let det = match D {
        2 => {
            let (a, b, c, d) = (m[0][0], m[0][1], m[1][0], m[1][1]);
            adj[0][0] = d;
            adj[0][1] = -b;
            adj[1][0] = -c;
            adj[1][1] = a;
            a * d - b * c
        }
        3 => {
            // Cofactor C_ij, transposed into the adjugate
            let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
                m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
            };
            let c00 = cof(1, 2, 1, 2);
            let c01 = -cof(1, 2, 0, 2);
            let c02 = cof(1, 2, 0, 1);
            let c10 = -cof(0, 2, 1, 2);
            let c11 = cof(0, 2, 0, 2);
            let c12 = -cof(0, 2, 0, 1);
            let c20 = cof(0, 1, 1, 2);
            let c21 = -cof(0, 1, 0, 2);
            let c22 = cof(0, 1, 0, 1);

            adj[0][0] = c00;
            adj[0][1] = c10;
            adj[0][2] = c20;
            adj[1][0] = c01;
            adj[1][1] = c11;
            adj[1][2] = c21;
            adj[2][0] = c02;
            adj[2][1] = c12;
            adj[2][2] = c22;

            m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02
        }
        _ => unreachable!("closed-form inversion is only defined for D = 2 or 3, got {D}"),
    };
    (det, adj)
}
