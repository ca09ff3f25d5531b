use crate::point::Point;
use crate::tesselation::Tesselation;

/// One repulsion pass over the point set, in place.
///
/// Update order is part of the contract: point i is renormalized from its
/// accumulated delta immediately after its own inner loop, before i + 1 is
/// visited. Pairs (i, j) with j > i therefore see j's pre-pass position
/// while i's update already includes every pair it participates in.
/// Reordering this loop changes the output point set.
pub fn adjust_points(points: &mut [Point], step_size: f64) {
    let amount = points.len();
    if amount == 0 {
        return;
    }
    let optimal = optimal_distance(amount);
    let mut adjustments = vec![Point::zero(); amount];

    for i in 0..amount {
        let mut delta = adjustments[i].clone();

        for j in (i + 1)..amount {
            let adjustment = get_adjustment(&points[i], &points[j], optimal);
            delta = &delta - &adjustment;
            let accumulated = &adjustments[j] + &adjustment;
            adjustments[j] = accumulated;
        }
        let updated = (&points[i] + &(&delta * step_size)).normalized();
        points[i] = updated;
    }
}

pub fn adjust_points_iterative(points: &mut [Point], iterations: u32, step_size: f64) {
    for _ in 0..iterations {
        adjust_points(points, step_size);
    }
}

/// Target nearest-neighbor angular spacing for `count` evenly distributed
/// points on the unit sphere.
pub fn optimal_distance(count: usize) -> f64 {
    2.0 * (std::f64::consts::PI / count as f64).sqrt()
}

/// The same relaxation applied to tesselation vertices, positions only;
/// topology is untouched.
pub fn adjust_sample_points(tesselation: &mut Tesselation, step_size: f64) {
    let mut positions: Vec<Point> = tesselation
        .points
        .iter()
        .map(|sp| sp.position.clone())
        .collect();
    adjust_points(&mut positions, step_size);
    for (sample_point, position) in tesselation.points.iter_mut().zip(positions) {
        sample_point.position = position;
    }
}

pub fn adjust_sample_points_iterative(
    tesselation: &mut Tesselation,
    iterations: u32,
    step_size: f64,
) {
    for _ in 0..iterations {
        adjust_sample_points(tesselation, step_size);
    }
}

/// Iterative relaxation entry point for callers holding an owned point set.
pub fn relax(mut points: Vec<Point>, iterations: u32, step_size: f64) -> Vec<Point> {
    adjust_points_iterative(&mut points, iterations, step_size);
    points
}

fn get_adjustment(p1: &Point, p2: &Point, optimal: f64) -> Point {
    let r_squared = Point::fast_distance(p1, p2);
    &(p2 - p1).normalized() * get_offset(r_squared, optimal)
}

fn get_offset(r_squared: f64, optimal: f64) -> f64 {
    (-r_squared / (optimal * optimal)).exp() * optimal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_generator::generate_points;

    #[test]
    fn test_optimal_distance_formula() {
        let d = optimal_distance(1000);
        assert!(
            (d - 0.1989).abs() < 1e-4,
            "optimal distance for 1000 points should be ~0.1989, got {}",
            d
        );
    }

    #[test]
    fn test_zero_step_leaves_points_unchanged() {
        let original = generate_points(30, 42);
        let mut points = original.clone();
        adjust_points(&mut points, 0.0);

        for (before, after) in original.iter().zip(points.iter()) {
            assert!(
                Point::distance(before, after) < 1e-12,
                "step size 0 must be a no-op"
            );
        }
    }

    #[test]
    fn test_points_stay_on_unit_sphere() {
        let mut points = generate_points(40, 7);
        adjust_points_iterative(&mut points, 10, 0.1);

        for p in &points {
            assert!((p.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pass_is_deterministic() {
        let mut a = generate_points(25, 9);
        let mut b = generate_points(25, 9);
        adjust_points_iterative(&mut a, 5, 0.1);
        adjust_points_iterative(&mut b, 5, 0.1);
        assert_eq!(a, b, "relaxation must be reproducible for equal inputs");
    }

    #[test]
    fn test_repulsion_spreads_close_pair() {
        // Two near-coincident points among a sparse set drift apart.
        let mut points = vec![
            Point::new3(1.0, 0.0, 0.0),
            Point::new3(1.0, 0.01, 0.0).normalized(),
            Point::new3(-1.0, 0.0, 0.0),
            Point::new3(0.0, 1.0, 0.0),
            Point::new3(0.0, -1.0, 0.0),
            Point::new3(0.0, 0.0, 1.0),
        ];
        let before = Point::distance(&points[0], &points[1]);
        adjust_points_iterative(&mut points, 20, 0.05);
        let after = Point::distance(&points[0], &points[1]);

        assert!(
            after > before,
            "close pair should spread: {} -> {}",
            before,
            after
        );
    }
}
