use crate::point::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random points on the unit sphere, deterministic per seed.
/// Three independent standard-normal draws per point, normalized; the
/// gaussian-per-axis construction has no directional bias.
pub fn generate_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        let x = normal_distribution(rng.random(), rng.random());
        let y = normal_distribution(rng.random(), rng.random());
        let z = normal_distribution(rng.random(), rng.random());
        points.push(Point::new3(x, y, z).normalized());
    }
    points
}

/// Box–Muller: maps two uniform draws in [0, 1) to one standard-normal value.
pub fn normal_distribution(a: f64, b: f64) -> f64 {
    let theta = std::f64::consts::PI * 2.0 * a;
    let rho = (-2.0 * b.ln()).sqrt();
    rho * theta.cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_lie_on_unit_sphere() {
        let points = generate_points(200, 7);
        assert_eq!(points.len(), 200);
        for p in &points {
            assert!(
                (p.magnitude() - 1.0).abs() < 1e-12,
                "point {:?} is off the unit sphere",
                p
            );
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = generate_points(50, 42);
        let b = generate_points(50, 42);
        assert_eq!(a, b, "same seed should reproduce the same point set");
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_points(50, 1);
        let b = generate_points(50, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate_points(0, 42).is_empty());
    }
}
