use super::rand::{draw_event_cloud, CloudCfg, ReplayToken};
use super::*;
use crate::error::GateError;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn square() -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![0.0, 2.0],
        vector![2.0, 2.0],
        vector![2.0, 0.0],
    ]
}

#[test]
fn hull_drops_interior_and_collinear_points() {
    let points = vec![
        vector![2.0, 2.0],
        vector![1.0, 1.0],
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![0.0, 2.0],
        vector![0.5, 1.5],
        vector![0.0, 2.0],
    ];
    let hull = convex_hull(&points).unwrap();
    assert_eq!(
        hull,
        vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0]
        ]
    );
    assert!(polygon_area(&hull) > 0.0, "hull is counter-clockwise");
}

#[test]
fn hull_rejects_degenerate_sets() {
    assert_eq!(
        convex_hull(&[]),
        Err(GateError::DegenerateHull { points: 0 })
    );
    let twice = vec![vector![1.0, 1.0], vector![1.0, 1.0], vector![3.0, 1.0]];
    assert_eq!(
        convex_hull(&twice),
        Err(GateError::DegenerateHull { points: 2 })
    );
    let line: Vec<_> = (0..10).map(|i| vector![i as f64, 2.0 * i as f64]).collect();
    assert_eq!(
        convex_hull(&line),
        Err(GateError::DegenerateHull { points: 10 })
    );
}

#[test]
fn hull_ignores_non_finite_points() {
    let points = vec![
        vector![0.0, 0.0],
        vector![f64::NAN, 1.0],
        vector![1.0, 0.0],
        vector![0.0, f64::INFINITY],
        vector![0.0, 1.0],
    ];
    let hull = convex_hull(&points).unwrap();
    assert_eq!(hull.len(), 3);
}

#[test]
fn resample_same_count_is_identity() {
    let sq = square();
    assert_eq!(resample(&sq, 4).unwrap(), sq);
}

#[test]
fn densify_square_splits_first_longest_edge() {
    let out = resample(&square(), 5).unwrap();
    assert_eq!(
        out,
        vec![
            vector![0.0, 0.0],
            vector![0.0, 1.0],
            vector![0.0, 2.0],
            vector![2.0, 2.0],
            vector![2.0, 0.0]
        ]
    );
}

#[test]
fn decimate_square_removes_first_vertex_on_tie() {
    let out = resample(&square(), 3).unwrap();
    assert_eq!(
        out,
        vec![vector![0.0, 2.0], vector![2.0, 2.0], vector![2.0, 0.0]]
    );
}

#[test]
fn decimate_prefers_flattest_vertex() {
    // (1, -0.01) barely bulges out of the bottom edge
    let ring = vec![
        vector![0.0, 0.0],
        vector![1.0, -0.01],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
    ];
    let out = resample(&ring, 4).unwrap();
    assert_eq!(out.len(), 4);
    assert!(!out.contains(&vector![1.0, -0.01]));
}

#[test]
fn decimate_then_densify_is_lossy() {
    let sq = square();
    let down = resample(&sq, 3).unwrap();
    let back = resample(&down, 4).unwrap();
    assert_eq!(back.len(), 4);
    assert_ne!(back, sq);
    // the new vertex is the hypotenuse midpoint, appended after (2, 0)
    assert_eq!(back[3], vector![1.0, 1.0]);
}

#[test]
fn resample_rejects_small_budget_and_tiny_rings() {
    assert_eq!(
        resample(&square(), 2),
        Err(GateError::InvalidBudget { budget: 2 })
    );
    assert_eq!(
        resample(&square()[..2], 5),
        Err(GateError::DegenerateHull { points: 2 })
    );
}

#[test]
fn densify_handles_zero_length_edges() {
    let mut ring = vec![
        vector![0.0, 0.0],
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
    ];
    densify(&mut ring, 6);
    assert_eq!(ring.len(), 6);
}

#[test]
fn triangle_area_and_containment() {
    let a = vector![0.0, 0.0];
    let b = vector![4.0, 0.0];
    let c = vector![0.0, 3.0];
    assert!((triangle_area(a, b, c) - 6.0).abs() < 1e-12);
    assert!((triangle_area(a, c, b) - 6.0).abs() < 1e-12);
    let sq = square();
    assert!(contains_point(&sq, vector![1.0, 1.0], 0.0));
    assert!(contains_point(&sq, vector![2.0, 1.0], 1e-12));
    assert!(!contains_point(&sq, vector![2.5, 1.0], 1e-9));
}

fn arb_points() -> impl Strategy<Value = Vec<Vector2<f64>>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..64)
        .prop_map(|v| v.into_iter().map(|(x, y)| Vector2::new(x, y)).collect())
}

proptest! {
    #[test]
    fn hull_encloses_every_input_point(points in arb_points()) {
        if let Ok(hull) = convex_hull(&points) {
            prop_assert!(hull.len() >= 3);
            prop_assert!(polygon_area(&hull) > 0.0);
            for p in &points {
                prop_assert!(contains_point(&hull, *p, 1e-7));
            }
        }
    }

    #[test]
    fn resample_hits_exact_count(points in arb_points(), target in 3usize..48) {
        if let Ok(hull) = convex_hull(&points) {
            let out = resample(&hull, target).unwrap();
            prop_assert_eq!(out.len(), target);
        }
    }
}

#[test]
fn cloud_hull_resamples_to_every_budget() {
    let pts = draw_event_cloud(CloudCfg::default(), ReplayToken { seed: 11, index: 0 });
    let hull = convex_hull(&pts).unwrap();
    for target in [3usize, 8, 20, 64] {
        assert_eq!(resample(&hull, target).unwrap().len(), target);
    }
}
