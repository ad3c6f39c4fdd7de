//! Property-based tests for inverse-distance weighting.
//!
//! This module uses proptest to verify:
//! - IDW values are convex combinations of the vertex values
//! - Vertices reproduce their own values exactly, for any power
//! - The result does not depend on vertex order
//! - Large powers converge to the nearest vertex's value
//! - Non-positive powers are rejected before evaluation

use proptest::prelude::*;
use simplex_interp::core::evaluate::{
    EvaluationError, EvaluationOptionsBuilder, ExecutionMode, Method, evaluate,
};
use simplex_interp::core::idw::InverseDistance;
use simplex_interp::core::simplex::Simplex;
use simplex_interp::core::traits::Evaluator;
use simplex_interp::geometry::point::Point;
use simplex_interp::geometry::traits::coordinate::Coordinate;
use simplex_interp::geometry::util::distance;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for vertex coordinates
fn coordinate() -> impl Strategy<Value = f64> {
    -100.0..100.0
}

/// Strategy for query coordinates
fn query_coordinate() -> impl Strategy<Value = f64> {
    -1000.0..1000.0
}

/// Strategy for vertex field values
fn field_value() -> impl Strategy<Value = f64> {
    -50.0..50.0
}

/// Strategy for valid IDW exponents
fn power() -> impl Strategy<Value = f64> {
    0.1..20.0
}

fn build<const D: usize>(coords: &[[f64; D]], values: &[f64]) -> Option<Simplex<f64, D>> {
    let points: Vec<Point<f64, D>> = coords.iter().copied().map(Point::new).collect();
    Simplex::from_points(&points, values).ok()
}

fn min_pairwise_distance<const D: usize>(simplex: &Simplex<f64, D>) -> f64 {
    let vertices = simplex.vertices();
    let mut best = f64::INFINITY;
    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            best = best.min(distance(a.point(), b.point()));
        }
    }
    best
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

macro_rules! test_idw_properties {
    ($dim:literal, $n:literal) => {
        pastey::paste! {
            proptest! {
                /// Property: IDW never leaves the range of the vertex values.
                #[test]
                fn [<prop_idw_within_value_range_ $dim d>](
                    coords in prop::array::[<uniform $n>](prop::array::[<uniform $dim>](coordinate())),
                    values in prop::array::[<uniform $n>](field_value()),
                    query in prop::array::[<uniform $dim>](query_coordinate()),
                    p in power(),
                ) {
                    let simplex = build(&coords, &values);
                    prop_assume!(simplex.is_some());
                    let simplex = simplex.unwrap();

                    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
                    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    let value = InverseDistance::new(p).unwrap().evaluate(&simplex, &Point::new(query));
                    prop_assert!(value.is_finite());
                    prop_assert!(
                        value >= lo - 1e-9 && value <= hi + 1e-9,
                        "value {} outside [{}, {}]",
                        value,
                        lo,
                        hi
                    );
                }

                /// Property: evaluating at a vertex returns exactly its value.
                #[test]
                fn [<prop_idw_exact_at_vertices_ $dim d>](
                    coords in prop::array::[<uniform $n>](prop::array::[<uniform $dim>](coordinate())),
                    values in prop::array::[<uniform $n>](field_value()),
                    p in power(),
                ) {
                    let simplex = build(&coords, &values);
                    prop_assume!(simplex.is_some());
                    let simplex = simplex.unwrap();

                    let idw = InverseDistance::new(p).unwrap();
                    for (i, vertex) in simplex.vertices().iter().enumerate() {
                        prop_assert_eq!(idw.evaluate(&simplex, vertex.point()), values[i]);
                    }
                }

                /// Property: swapping two vertices leaves IDW unchanged.
                #[test]
                fn [<prop_idw_independent_of_vertex_order_ $dim d>](
                    coords in prop::array::[<uniform $n>](prop::array::[<uniform $dim>](coordinate())),
                    values in prop::array::[<uniform $n>](field_value()),
                    query in prop::array::[<uniform $dim>](query_coordinate()),
                    p in power(),
                ) {
                    let simplex = build(&coords, &values);
                    prop_assume!(simplex.is_some());
                    let simplex = simplex.unwrap();

                    let mut swapped_coords = coords;
                    swapped_coords.swap(0, 1);
                    let mut swapped_values = values;
                    swapped_values.swap(0, 1);
                    let swapped = build(&swapped_coords, &swapped_values);
                    prop_assume!(swapped.is_some());
                    let swapped = swapped.unwrap();

                    let idw = InverseDistance::new(p).unwrap();
                    let point = Point::new(query);
                    let a = idw.evaluate(&simplex, &point);
                    let b = idw.evaluate(&swapped, &point);
                    prop_assert!((a - b).abs() <= 1e-9 * (1.0 + a.abs()), "{} vs {}", a, b);
                }

                /// Property: with p = 128 a point very close to a vertex takes
                /// that vertex's value.
                #[test]
                fn [<prop_idw_large_power_picks_nearest_vertex_ $dim d>](
                    coords in prop::array::[<uniform $n>](prop::array::[<uniform $dim>](coordinate())),
                    values in prop::array::[<uniform $n>](field_value()),
                    vertex_index in 0..=($dim as usize),
                    direction in prop::array::[<uniform $dim>](-1.0..1.0_f64),
                ) {
                    let simplex = build(&coords, &values);
                    prop_assume!(simplex.is_some());
                    let simplex = simplex.unwrap();

                    // Stay within 1% of the shortest edge of the chosen vertex
                    let reach = 0.01 * min_pairwise_distance(&simplex) / f64::from($dim);
                    let mut query = coords[vertex_index];
                    for (q, d) in query.iter_mut().zip(direction) {
                        *q += reach * d;
                    }

                    let idw = InverseDistance::new(128.0).unwrap();
                    let value = idw.evaluate(&simplex, &Point::new(query));
                    prop_assert!(
                        (value - values[vertex_index]).abs() < 1e-6,
                        "value {} vs nearest vertex value {}",
                        value,
                        values[vertex_index]
                    );
                }

                /// Property: non-positive powers fail before any point is evaluated.
                #[test]
                fn [<prop_idw_rejects_non_positive_power_ $dim d>](
                    coords in prop::array::[<uniform $n>](prop::array::[<uniform $dim>](coordinate())),
                    values in prop::array::[<uniform $n>](field_value()),
                    p in -100.0..=0.0_f64,
                ) {
                    let simplex = build(&coords, &values);
                    prop_assume!(simplex.is_some());
                    let simplex = simplex.unwrap();

                    let options = EvaluationOptionsBuilder::default()
                        .power(p)
                        .mode(ExecutionMode::Parallel)
                        .build()
                        .unwrap();
                    let points = vec![Point::new(coords[0]); 4];
                    let result = evaluate(&simplex, &points, Method::InverseDistance, &options);
                    let is_invalid_config = matches!(result, Err(EvaluationError::InvalidConfig { .. }));
                    prop_assert!(is_invalid_config);
                }
            }
        }
    };
}

test_idw_properties!(2, 3);
test_idw_properties!(3, 4);
