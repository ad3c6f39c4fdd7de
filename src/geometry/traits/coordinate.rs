//! Coordinate traits and implementations for interpolation geometry.
//!
//! This module provides the scalar abstraction that lets every algorithm in the
//! crate run unchanged in single or double precision, together with the
//! `Coordinate` trait implemented by [`Point`](crate::geometry::point::Point).
//!
//! # Overview
//!
//! - **`CoordinateScalar`**: Trait alias consolidating all scalar type requirements,
//!   plus the precision-dependent tolerances used by the evaluators
//! - **`FiniteCheck`**: Validation of coordinate values (no NaN or infinity)
//! - **`Coordinate<T, D>`**: Storage-independent access to a D-dimensional coordinate
//!
//! # Usage Examples
//!
//! ```rust
//! use simplex_interp::geometry::point::Point;
//! use simplex_interp::geometry::traits::coordinate::*;
//!
//! let coord: Point<f64, 3> = Coordinate::new([1.0, 2.0, 3.0]);
//! assert_eq!(coord.to_array(), [1.0, 2.0, 3.0]);
//! assert!(coord.validate().is_ok());
//!
//! let nan_coord: Point<f64, 2> = Coordinate::new([f64::NAN, 1.0]);
//! assert!(nan_coord.validate().is_err());
//! ```

use num_traits::Float;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Errors that can occur while converting coordinates between scalar types.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateConversionError {
    /// The value cannot be represented in the target type.
    #[error(
        "Failed to convert coordinate at index {coordinate_index} from {from_type} to {to_type}: {coordinate_value}"
    )]
    ConversionFailed {
        /// Index of the coordinate that failed to convert
        coordinate_index: usize,
        /// String representation of the problematic coordinate value
        coordinate_value: String,
        /// Source type name
        from_type: &'static str,
        /// Target type name
        to_type: &'static str,
    },
    /// The converted value is NaN or infinite.
    #[error(
        "Non-finite value (NaN or infinity) at coordinate index {coordinate_index}: {coordinate_value}"
    )]
    NonFiniteValue {
        /// Index of the coordinate that contains the non-finite value
        coordinate_index: usize,
        /// String representation of the non-finite coordinate value
        coordinate_value: String,
    },
}

/// Errors that can occur during coordinate validation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// A coordinate value is invalid (NaN or infinite).
    #[error(
        "Invalid coordinate at index {coordinate_index} in dimension {dimension}: {coordinate_value}"
    )]
    InvalidCoordinate {
        /// Index of the invalid coordinate.
        coordinate_index: usize,
        /// Value of the invalid coordinate, as a string.
        coordinate_value: String,
        /// The dimensionality of the coordinate system.
        dimension: usize,
    },
}

/// Relative determinant threshold below which an f32 edge matrix is singular.
///
/// Single precision carries roughly seven significant digits, so a determinant
/// smaller than `1e-6 · ‖J‖∞^D` is indistinguishable from rounding noise.
pub const SINGULARITY_TOLERANCE_F32: f32 = 1e-6;

/// Relative determinant threshold below which an f64 edge matrix is singular.
pub const SINGULARITY_TOLERANCE_F64: f64 = 1e-12;

/// Tolerance on `|Σ wᵢ − 1|` for f32 barycentric weights.
pub const WEIGHT_SUM_TOLERANCE_F32: f32 = 1e-4;

/// Tolerance on `|Σ wᵢ − 1|` for f64 barycentric weights.
pub const WEIGHT_SUM_TOLERANCE_F64: f64 = 1e-9;

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Helper trait for checking finiteness of coordinates.
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(3.14f64.is_finite_generic());
/// assert!(!f64::NAN.is_finite_generic());
/// assert!(!f32::INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns true if the value is finite (not NaN or infinite).
    fn is_finite_generic(&self) -> bool;
}

// Unified macro for implementing FiniteCheck for floating-point types
macro_rules! impl_finite_check {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(float: f32, f64);

/// Trait alias for the scalar type requirements of the interpolation code.
///
/// Precision is a property of the scalar type: every algorithm in the crate is
/// written once against this trait and instantiated for `f32` or `f64`.
///
/// # Required Traits
///
/// - `Float`: Floating-point arithmetic operations
/// - `FiniteCheck`: Validation of coordinate values
/// - `Default`, `Debug`: Construction and formatting
/// - `Send`, `Sync`: Sharing a constructed simplex across worker threads
/// - `Serialize`, `DeserializeOwned`: Serialization support
///
/// # Usage
///
/// ```rust
/// use simplex_interp::geometry::traits::coordinate::CoordinateScalar;
///
/// fn close<T: CoordinateScalar>(a: T, b: T) -> bool {
///     (a - b).abs() <= T::weight_sum_tolerance()
/// }
///
/// assert!(close(1.0_f32, 1.00001_f32));
/// assert!(!close(1.0_f64, 1.00001_f64));
/// ```
pub trait CoordinateScalar:
    Float
    + FiniteCheck
    + Default
    + Debug
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Returns the relative determinant threshold used to reject degenerate simplices.
    ///
    /// - `f32`: `1e-6`
    /// - `f64`: `1e-12`
    fn singularity_tolerance() -> Self;

    /// Returns the tolerance within which barycentric weights must sum to one.
    ///
    /// - `f32`: `1e-4`
    /// - `f64`: `1e-9`
    fn weight_sum_tolerance() -> Self;
}

impl CoordinateScalar for f32 {
    fn singularity_tolerance() -> Self {
        SINGULARITY_TOLERANCE_F32
    }

    fn weight_sum_tolerance() -> Self {
        WEIGHT_SUM_TOLERANCE_F32
    }
}

impl CoordinateScalar for f64 {
    fn singularity_tolerance() -> Self {
        SINGULARITY_TOLERANCE_F64
    }

    fn weight_sum_tolerance() -> Self {
        WEIGHT_SUM_TOLERANCE_F64
    }
}

/// Storage-independent access to a D-dimensional coordinate.
///
/// # Type Parameters
///
/// * `T` - The scalar type for coordinates (`f32` or `f64`)
/// * `const D: usize` - The dimension of the coordinate system
///
/// # Examples
///
/// ```
/// use simplex_interp::geometry::{point::Point, traits::coordinate::Coordinate};
///
/// let coord: Point<f64, 3> = Coordinate::new([1.0, 2.0, 3.0]);
/// assert_eq!(coord.to_array(), [1.0, 2.0, 3.0]);
/// assert!(coord.validate().is_ok());
/// ```
pub trait Coordinate<T, const D: usize>
where
    T: CoordinateScalar,
    Self: Copy + Clone + Default + Debug + PartialEq + Serialize + DeserializeOwned + Sized,
{
    /// Create a new coordinate from an array of scalar values.
    fn new(coords: [T; D]) -> Self;

    /// Convert the coordinate to an array of scalar values.
    #[must_use]
    fn to_array(&self) -> [T; D];

    /// Validate that all coordinate values are finite.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateValidationError::InvalidCoordinate` naming the first
    /// coordinate that is NaN or infinite.
    fn validate(&self) -> Result<(), CoordinateValidationError>;
}
