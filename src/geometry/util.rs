//! Geometric utility functions for d-dimensional interpolation geometry.
//!
//! This module contains norm and distance helpers used by the inverse-distance
//! evaluator and measure helpers used by the affine map.

pub mod measures;
pub mod norms;

pub use measures::*;
pub use norms::*;
