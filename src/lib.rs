//! # simplex-interp
//!
//! Interpolation of a scalar field known only at the vertices of a single
//! simplex: a triangle in 2D or a tetrahedron in 3D.
//!
//! # Features
//!
//! - Exact barycentric (volume-ratio) interpolation with strict inside/outside
//!   classification
//! - Inverse-distance weighting (IDW) with a configurable exponent
//! - One algorithm for `f32` and `f64` (any type implementing
//!   [`CoordinateScalar`](geometry::traits::coordinate::CoordinateScalar))
//! - Closed-form 2×2 / 3×3 inversion of the simplex's affine map, computed once
//!   per simplex
//! - Optional data-parallel batch evaluation with [rayon](https://docs.rs/rayon)
//!   (the `parallel` feature, enabled by default)
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use simplex_interp::prelude::*;
//! use approx::assert_relative_eq;
//!
//! let triangle = Simplex::new(vec![
//!     vertex!([2.0, 2.0], 1.0),
//!     vertex!([4.0, 3.0], 2.0),
//!     vertex!([1.0, 4.0], 3.0),
//! ])
//! .unwrap();
//!
//! let points = vec![Point::new([7.0 / 3.0, 3.0]), Point::new([0.0, 0.0])];
//! let result = evaluate(&triangle, &points, Method::Barycentric, &EvaluationOptions::default())
//!     .unwrap();
//!
//! assert_relative_eq!(result.values()[0], 2.0, epsilon = 1e-12);
//! assert_eq!(result.inside(), Some(&[true, false][..]));
//! ```
//!
//! The second point lies outside the triangle. Its value is still computed (by
//! linear extrapolation) but the inside mask marks it as not interpolated.
//!
//! # Run-time dimension
//!
//! When the dimension is only known at run time, [`make_simplex`](core::any_simplex::make_simplex)
//! infers it from the vertex count:
//!
//! ```rust
//! use simplex_interp::prelude::*;
//!
//! let vertices = vec![
//!     vec![0.0, 0.0, 0.0],
//!     vec![1.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![0.0, 0.0, 1.0],
//! ];
//! let tet = make_simplex(&vertices, &[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(tet.dim(), 3);
//!
//! let options = EvaluationOptionsBuilder::default().power(3.0).build().unwrap();
//! let values = tet
//!     .evaluate(&[[0.0, 0.0, 0.0], [0.2, 0.2, 0.2]], Method::InverseDistance, &options)
//!     .unwrap()
//!     .into_values();
//! assert_eq!(values[0], 1.0);
//! ```
//!
//! # Conventions
//!
//! - A point is *inside* only if every barycentric weight lies strictly in
//!   `(0, 1)`. Points on a vertex, edge, or face are reported as outside, in both
//!   2D and 3D.
//! - Degeneracy is judged relative to the simplex's size: the edge matrix is
//!   singular when `|det J| <= tol · ‖J‖∞^D`, with `tol` defaulting to `1e-12`
//!   for `f64` and `1e-6` for `f32`.
//! - All validation happens when a simplex is built or an evaluation is
//!   configured. Evaluating points never fails.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Simplices, vertices, and the interpolation methods that evaluate them.
pub mod core {
    pub mod any_simplex;
    /// Exact barycentric interpolation
    pub mod barycentric;
    /// Batch evaluation and method selection
    pub mod evaluate;
    /// Inverse-distance weighting
    pub mod idw;
    pub mod simplex;
    pub mod vertex;
    /// Traits shared by the interpolation methods.
    pub mod traits {
        pub mod evaluator;
        pub use evaluator::*;
    }
    // Re-export the `core` modules.
    pub use any_simplex::*;
    pub use barycentric::*;
    pub use evaluate::*;
    pub use idw::*;
    pub use simplex::*;
    pub use traits::*;
    pub use vertex::*;
}

/// Geometric types: points, the coordinate abstraction, and the affine map of a
/// simplex.
pub mod geometry {
    /// Affine map between ambient and reference coordinates
    pub mod affine;
    pub mod point;
    /// Norms, distances, and simplex measures
    pub mod util;
    /// Coordinate abstractions and scalar requirements.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use affine::*;
    pub use point::*;
    pub use traits::*;
    pub use util::*;
}

/// A prelude module that re-exports commonly used types and macros.
pub mod prelude {
    pub use crate::core::{
        any_simplex::*, barycentric::*, evaluate::*, idw::*, simplex::*, traits::evaluator::*,
        vertex::*,
    };

    pub use crate::geometry::{affine::*, point::*, traits::coordinate::*, util::*};

    // Convenience macros
    pub use crate::vertex;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            any_simplex::AnySimplex,
            barycentric::{Barycentric, BarycentricWeights},
            evaluate::{Evaluation, EvaluationOptions},
            idw::InverseDistance,
            simplex::Simplex,
            vertex::Vertex,
        },
        geometry::{AffineMap, Point},
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point<f64, 3>>());
        assert!(is_normal::<Point<f32, 2>>());
        assert!(is_normal::<Vertex<f64, 3>>());
        assert!(is_normal::<AffineMap<f64, 3>>());
        assert!(is_normal::<Simplex<f32, 3>>());
        assert!(is_normal::<AnySimplex<f64>>());
        assert!(is_normal::<Barycentric>());
        assert!(is_normal::<BarycentricWeights<f64>>());
        assert!(is_normal::<InverseDistance<f32>>());
        assert!(is_normal::<EvaluationOptions<f64>>());
        assert!(is_normal::<Evaluation<f64>>());
    }

    #[test]
    fn prelude_exports() {
        use crate::prelude::*;

        let simplex: Simplex<f64, 2> = Simplex::new(vec![
            vertex!([0.0, 0.0], 0.0),
            vertex!([1.0, 0.0], 1.0),
            vertex!([0.0, 1.0], 2.0),
        ])
        .unwrap();
        let sample = Barycentric.evaluate(&simplex, &Point::new([0.25, 0.25]));
        assert!(sample.inside);
        assert_eq!(distance(&Point::new([0.0, 0.0]), &Point::new([3.0, 4.0])), 5.0);
        assert_eq!(GeometryConfig::<f64>::default().singularity_tolerance, 1e-12);
    }
}
