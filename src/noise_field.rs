use crate::helpers::lerp;
use crate::noise_settings::NoiseLayerSettings;
use crate::point::Point;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Layered, seed-free fractal value-noise field over directions on the
/// sphere. The gradient lattice is a pure function of integer cell
/// coordinates, so a direction always yields the same value regardless of
/// how the surrounding point set was generated.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NoiseField {
    pub layers: Vec<NoiseLayerSettings>,
    total_priority: i64,
    /// Observed raw minimum (<= 0) after calibration; 1.0 means uncalibrated.
    pub min_val: f64,
    /// Observed raw maximum (>= 0) after calibration; -1.0 means uncalibrated.
    pub max_val: f64,
}

impl NoiseField {
    pub fn new(layers: Vec<NoiseLayerSettings>) -> Self {
        let total_priority = layers.iter().map(|l| l.priority as i64).sum();
        NoiseField {
            layers,
            total_priority,
            min_val: 1.0,
            max_val: -1.0,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.min_val <= 0.0 && self.max_val >= 0.0
    }

    /// Samples the raw blended value over the reference point set and
    /// records the observed range. Required before `value_at`; without it
    /// the rescale divides by the degenerate defaults.
    pub fn calibrate(&mut self, sample_points: &[Point]) {
        let (min_v, max_v) = sample_points
            .par_iter()
            .map(|p| {
                let value = self.raw_value_at(&p.normalized());
                (value.min(0.0), value.max(0.0))
            })
            .reduce(|| (0.0, 0.0), |a, b| (a.0.min(b.0), a.1.max(b.1)));

        self.min_val = min_v;
        self.max_val = max_v;
    }

    /// Calibrated noise value in [-1, 1] for a unit direction.
    pub fn value_at(&self, direction: &Point) -> f64 {
        let mut value = self.raw_value_at(direction);

        // Map the observed extremes to -1 and +1, each side independently.
        if value < 0.0 {
            value /= -self.min_val;
        } else if value > 0.0 {
            value /= self.max_val;
        }

        let contrasted = value.abs().sqrt() * value.signum();
        contrasted.clamp(-1.0, 1.0)
    }

    /// Priority-weighted blend of the per-layer fractal sums, before any
    /// range normalization or contrast shaping.
    fn raw_value_at(&self, p: &Point) -> f64 {
        let mut final_value = 0.0;

        for layer in &self.layers {
            let mut amplitude = 1.0;
            let mut frequency = 1.0;
            let mut layer_value = 0.0;
            let mut max_amplitude = 0.0;

            for _ in 0..layer.octaves {
                layer_value += lattice_noise(&(p * frequency), layer) * amplitude;
                max_amplitude += amplitude;
                amplitude *= layer.persistence;
                frequency *= layer.lacunarity;
            }

            let weight = layer.priority as f64 / self.total_priority as f64;
            if max_amplitude != 0.0 {
                final_value += (layer_value / max_amplitude) * weight;
            }
        }
        final_value
    }
}

/// Single-octave value noise at a scaled/offset lattice position: hash the
/// 8 corner gradients of the containing cell, dot each with the
/// corner-to-point offset, interpolate x then y then z with the quintic
/// fade.
fn lattice_noise(p: &Point, settings: &NoiseLayerSettings) -> f64 {
    let p = &(p * settings.scale) + &settings.offset;
    let cell = p.rounded();
    let local = &(&p - &cell) + 0.5;

    let dots_z0 = corner_dots(&local, &cell, 0);
    let dots_z1 = corner_dots(&local, &cell, 1);
    let fade_pos = Point::new3(fade(local.x()), fade(local.y()), fade(local.z()));

    let nx00 = lerp(dots_z0.x(), dots_z0.y(), fade_pos.x());
    let nx10 = lerp(dots_z0.z(), dots_z0.w(), fade_pos.x());
    let nx01 = lerp(dots_z1.x(), dots_z1.y(), fade_pos.x());
    let nx11 = lerp(dots_z1.z(), dots_z1.w(), fade_pos.x());

    let ny0 = lerp(nx00, nx10, fade_pos.y());
    let ny1 = lerp(nx01, nx11, fade_pos.y());

    lerp(ny0, ny1, fade_pos.z())
}

/// Gradient dots for the four corners of one z slice of the cell, packed
/// as a 4-dimensional point in corner order (0,0), (1,0), (0,1), (1,1).
fn corner_dots(local: &Point, cell: &Point, z_offset: i32) -> Point {
    let z = z_offset as f64;
    let corners = [
        Point::new3(0.0, 0.0, z),
        Point::new3(1.0, 0.0, z),
        Point::new3(0.0, 1.0, z),
        Point::new3(1.0, 1.0, z),
    ];

    let mut dots = [0.0; 4];
    for (i, corner) in corners.iter().enumerate() {
        let gradient = gradient_direction(&(cell + corner));
        let distance = local - corner;
        dots[i] = Point::dot(&gradient, &distance);
    }
    Point::new4(dots[0], dots[1], dots[2], dots[3])
}

/// Unit gradient for an integer lattice corner. Stateless: the hash state
/// is derived from the corner coordinates alone, so identical corners give
/// bit-identical gradients across runs and platforms.
fn gradient_direction(corner: &Point) -> Point {
    let x = corner.x().round() as i64 as u32;
    let y = corner.y().round() as i64 as u32;
    let z = corner.z().round() as i64 as u32;

    let mut state = x.wrapping_add(23523).wrapping_mul(23523);
    let gx = random_normal(&mut state);
    state = state.wrapping_mul(y.wrapping_add(3634));
    let gy = random_normal(&mut state);
    state = state.wrapping_mul(z.wrapping_add(36234));
    let gz = random_normal(&mut state);

    Point::new3(gx, gy, gz).normalized()
}

fn next_random(state: &mut u32) -> u32 {
    *state = state.wrapping_mul(747796405).wrapping_add(2891336453);
    let result = ((*state >> ((*state >> 28) + 4)) ^ *state).wrapping_mul(277803737);
    (result >> 22) ^ result
}

fn random_value(state: &mut u32) -> f64 {
    next_random(state) as f64 / 4294967295.0
}

/// Box–Muller draw from the hash stream. The truncated pi literal is part
/// of the hash contract; changing it changes every gradient.
fn random_normal(state: &mut u32) -> f64 {
    let theta = 2.0 * 3.1415926 * random_value(state);
    let rho = (-2.0 * random_value(state).ln()).sqrt();
    rho * theta.cos()
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_generator::generate_points;

    fn test_layers() -> Vec<NoiseLayerSettings> {
        vec![
            NoiseLayerSettings::new(2.0, 4, 0.5, 2.0, Point::zero(), 0.0, 2),
            NoiseLayerSettings::new(5.0, 3, 0.6, 2.1, Point::new3(13.0, 7.0, 3.0), 0.0, 1),
        ]
    }

    fn calibrated_field() -> NoiseField {
        let mut field = NoiseField::new(test_layers());
        field.calibrate(&generate_points(500, 42));
        field
    }

    #[test]
    fn test_gradient_is_reproducible_and_unit() {
        let corner = Point::new3(3.0, -2.0, 17.0);
        let a = gradient_direction(&corner);
        let b = gradient_direction(&corner);

        assert_eq!(a, b, "same corner must give bit-identical gradients");
        assert!((a.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_neighboring_corners_get_distinct_gradients() {
        let a = gradient_direction(&Point::new3(0.0, 0.0, 0.0));
        let b = gradient_direction(&Point::new3(1.0, 0.0, 0.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_uncalibrated_defaults() {
        let field = NoiseField::new(test_layers());
        assert!(!field.is_calibrated());
        assert_eq!(field.min_val, 1.0);
        assert_eq!(field.max_val, -1.0);
    }

    #[test]
    fn test_calibration_brackets_zero() {
        let field = calibrated_field();
        assert!(field.is_calibrated());
        assert!(field.min_val <= 0.0);
        assert!(field.max_val >= 0.0);
    }

    #[test]
    fn test_value_at_stays_in_range() {
        let field = calibrated_field();
        for direction in generate_points(300, 99) {
            let value = field.value_at(&direction);
            assert!(
                (-1.0..=1.0).contains(&value),
                "value {} at {:?} outside [-1, 1]",
                value,
                direction
            );
        }
    }

    #[test]
    fn test_value_at_is_deterministic() {
        let field = calibrated_field();
        let direction = Point::new3(0.3, -0.5, 0.8).normalized();
        assert_eq!(field.value_at(&direction), field.value_at(&direction));
    }

    #[test]
    fn test_total_priority_weighting() {
        // A single layer with any priority blends to weight 1, so two fields
        // differing only in that layer's priority agree everywhere.
        let layer = test_layers().remove(0);
        let mut a_layer = layer.clone();
        a_layer.priority = 1;
        let mut b_layer = layer;
        b_layer.priority = 5;

        let points = generate_points(200, 5);
        let mut a = NoiseField::new(vec![a_layer]);
        let mut b = NoiseField::new(vec![b_layer]);
        a.calibrate(&points);
        b.calibrate(&points);

        let direction = Point::new3(0.6, 0.1, -0.79).normalized();
        assert!((a.value_at(&direction) - b.value_at(&direction)).abs() < 1e-12);
    }
}
