//! Data and operations on d-dimensional points.
//!
//! Points are immutable coordinate arrays. They are used both for simplex
//! vertices and for query points, and convert between scalar types with
//! [`Point::cast`] so the same geometry can be evaluated in single or double
//! precision.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::{
    Coordinate, CoordinateConversionError, CoordinateScalar, CoordinateValidationError,
};
use num_traits::cast;
use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::any;
use std::fmt;
use std::marker::PhantomData;

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
/// The [Point] struct represents a point in a D-dimensional space, where the
/// coordinates are of generic type `T`.
///
/// Points are intended to be immutable once created, so the `coords` field is
/// private to prevent modification after instantiation.
///
/// # Examples
///
/// ```rust
/// use simplex_interp::geometry::point::Point;
/// use simplex_interp::geometry::traits::coordinate::Coordinate;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// ```
pub struct Point<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// The coordinates of the point.
    coords: [T; D],
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<T, const D: usize> Point<T, D>
where
    T: CoordinateScalar,
{
    /// Returns a reference to the point's coordinates as an array.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simplex_interp::geometry::point::Point;
    /// use simplex_interp::geometry::traits::coordinate::Coordinate;
    ///
    /// let point = Point::new([1.0, 2.0, 3.0]);
    /// assert_eq!(point.coords(), &[1.0, 2.0, 3.0]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// The displacement vector `self − origin`.
    #[inline]
    #[must_use]
    pub fn vector_from(&self, origin: &Self) -> [T; D] {
        let mut out = [T::zero(); D];
        for (o, (&a, &b)) in out.iter_mut().zip(self.coords.iter().zip(origin.coords.iter())) {
            *o = a - b;
        }
        out
    }

    /// Converts the point to another scalar type.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateConversionError` if a coordinate cannot be represented
    /// in `U` or becomes non-finite after the cast (e.g. `f64::MAX` into `f32`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use simplex_interp::geometry::point::Point;
    /// use simplex_interp::geometry::traits::coordinate::Coordinate;
    ///
    /// let p64: Point<f64, 2> = Point::new([0.5, 4.0]);
    /// let p32: Point<f32, 2> = p64.cast().unwrap();
    /// assert_eq!(p32.coords(), &[0.5_f32, 4.0_f32]);
    ///
    /// let huge: Point<f64, 2> = Point::new([f64::MAX, 0.0]);
    /// assert!(huge.cast::<f32>().is_err());
    /// ```
    pub fn cast<U>(&self) -> Result<Point<U, D>, CoordinateConversionError>
    where
        U: CoordinateScalar,
    {
        Point::try_from(self.coords)
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T, const D: usize> Coordinate<T, D> for Point<T, D>
where
    T: CoordinateScalar,
{
    #[inline]
    fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    #[inline]
    fn to_array(&self) -> [T; D] {
        self.coords
    }

    fn validate(&self) -> Result<(), CoordinateValidationError> {
        for (index, &coord) in self.coords.iter().enumerate() {
            if !coord.is_finite_generic() {
                return Err(CoordinateValidationError::InvalidCoordinate {
                    coordinate_index: index,
                    coordinate_value: format!("{coord:?}"),
                    dimension: D,
                });
            }
        }
        Ok(())
    }
}

// Manual implementations for traits that can't be derived due to [T; D] limitations

impl<T, const D: usize> Default for Point<T, D>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            coords: [T::default(); D],
        }
    }
}

impl<T, const D: usize> Serialize for Point<T, D>
where
    T: CoordinateScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(D)?;
        for coord in &self.coords {
            tuple.serialize_element(coord)?;
        }
        tuple.end()
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn deserialize<DE>(deserializer: DE) -> Result<Self, DE::Error>
    where
        DE: serde::Deserializer<'de>,
    {
        struct ArrayVisitor<T, const D: usize>(PhantomData<T>);

        impl<'de, T, const D: usize> Visitor<'de> for ArrayVisitor<T, D>
        where
            T: CoordinateScalar,
        {
            type Value = Point<T, D>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_fmt(format_args!("an array of {D} finite coordinates"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut coords = [T::zero(); D];
                for (i, slot) in coords.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<T>()?.is_some() {
                    return Err(Error::invalid_length(D + 1, &self));
                }
                Ok(Point::new(coords))
            }
        }

        deserializer.deserialize_tuple(D, ArrayVisitor(PhantomData))
    }
}

// =============================================================================
// TYPE CONVERSION IMPLEMENTATIONS
// =============================================================================

/// Fallible conversions for Point from arrays with potentially different scalar types.
///
/// Conversions return an error if any coordinate cannot be cast into the target
/// type, or if a non-finite value is encountered post-cast.
impl<T, U, const D: usize> TryFrom<[T; D]> for Point<U, D>
where
    T: cast::NumCast + fmt::Debug,
    U: CoordinateScalar,
{
    type Error = CoordinateConversionError;

    #[inline]
    fn try_from(coords: [T; D]) -> Result<Self, Self::Error> {
        let mut out: [U; D] = [U::zero(); D];
        for (i, c) in coords.into_iter().enumerate() {
            let c_debug = format!("{c:?}");
            let v: U =
                cast::cast(c).ok_or_else(|| CoordinateConversionError::ConversionFailed {
                    coordinate_index: i,
                    coordinate_value: c_debug,
                    from_type: any::type_name::<T>(),
                    to_type: any::type_name::<U>(),
                })?;
            if !v.is_finite_generic() {
                return Err(CoordinateConversionError::NonFiniteValue {
                    coordinate_index: i,
                    coordinate_value: format!("{v:?}"),
                });
            }
            out[i] = v;
        }
        Ok(Self::new(out))
    }
}

impl<T, const D: usize> From<Point<T, D>> for [T; D]
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(point: Point<T, D>) -> [T; D] {
        point.to_array()
    }
}
