use crate::constants::EARTH;
use crate::planet_gen::{PlanetGen, PlanetGenProps};
use crate::point::Point;
use crate::point_adjuster::relax;
use crate::point_generator::generate_points;
use crate::tesselation_generator::build_tesselation;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_twelve_point_planet_end_to_end() {
        let points = relax(generate_points(12, 42), 50, 0.1);
        let tesselation = build_tesselation(&points).expect("tesselation failed");

        assert!(
            tesselation.point_count() >= 12,
            "expected at least the 12 seed points, got {}",
            tesselation.point_count()
        );

        let mut seen = HashSet::new();
        for tensor in &tesselation.tensors {
            assert!(
                tensor.a < tesselation.point_count() && tensor.b < tesselation.point_count(),
                "tensor {:?} references an unknown sample point",
                tensor
            );
            assert!(
                seen.insert((tensor.b, tensor.a)),
                "duplicate undirected tensor {:?}",
                tensor
            );
        }

        println!(
            "✅ 12-seed planet: {} sample points, {} tensors",
            tesselation.point_count(),
            tesselation.tensor_count()
        );
    }

    #[test]
    fn test_full_generation_pass() {
        let props = PlanetGenProps::new(EARTH.clone())
            .with_point_count(24)
            .with_seed(42)
            .with_relaxation(40, 0.1);
        let mut r#gen = PlanetGen::new(props);
        r#gen.generate().expect("generation failed");

        let tesselation = r#gen.tesselation.as_ref().expect("tesselation missing");
        let sea_level = r#gen.sea_level_m.expect("sea level missing");

        assert_eq!(r#gen.points.len(), 24);
        for p in &r#gen.points {
            assert!((p.magnitude() - 1.0).abs() < 1e-12, "seed point left the sphere");
        }

        assert!(r#gen.noise_field.is_calibrated());
        for sample_point in &tesselation.points {
            let value = r#gen.noise_field.value_at(&sample_point.position);
            assert!((-1.0..=1.0).contains(&value));

            let column = &sample_point.data.column;
            assert!(column.upper_crust.thickness > 0, "crust was not assigned");
            if column.hydrosphere.thickness > 0 {
                assert_eq!(
                    column.surface_level(),
                    sea_level,
                    "flooded column fills exactly to sea level"
                );
            } else {
                assert!(
                    column.surface_level() >= sea_level,
                    "dry column sits below sea level"
                );
            }
        }

        println!(
            "✅ Full pass: {} sample points, sea level {} m, land fraction {:.2}",
            tesselation.point_count(),
            sea_level,
            r#gen.land_fraction().unwrap()
        );
    }

    #[test]
    fn test_generation_is_reproducible() {
        let run = || {
            let props = PlanetGenProps::new(EARTH.clone())
                .with_point_count(16)
                .with_seed(1234)
                .with_relaxation(30, 0.1);
            let mut r#gen = PlanetGen::new(props);
            r#gen.generate().expect("generation failed");
            r#gen
        };

        let a = run();
        let b = run();

        assert_eq!(a.points, b.points, "seed points must reproduce");
        assert_eq!(a.sea_level_m, b.sea_level_m, "sea level must reproduce");

        let (ta, tb) = (a.tesselation.unwrap(), b.tesselation.unwrap());
        assert_eq!(ta.tensors, tb.tensors);
        let positions_a: Vec<&Point> = ta.points.iter().map(|sp| &sp.position).collect();
        let positions_b: Vec<&Point> = tb.points.iter().map(|sp| &sp.position).collect();
        assert_eq!(positions_a, positions_b, "vertex positions must reproduce");

        println!("✅ Two identical runs produced identical planets");
    }
}
