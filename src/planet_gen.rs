use crate::constants::{
    DEFAULT_NOISE_LAYERS, DEFAULT_POINT_COUNT, DEFAULT_RELAX_ITERATIONS, DEFAULT_RELAX_STEP_SIZE,
};
use crate::isostasy::{IsostasyError, apply_isostasy};
use crate::noise_field::NoiseField;
use crate::noise_settings::NoiseLayerSettings;
use crate::planet::Planet;
use crate::point::Point;
use crate::point_adjuster::adjust_points_iterative;
use crate::point_generator::generate_points;
use crate::tesselation::Tesselation;
use crate::tesselation_generator::{TesselationError, build_tesselation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanetGenError {
    #[error(transparent)]
    Tesselation(#[from] TesselationError),
    #[error(transparent)]
    Isostasy(#[from] IsostasyError),
}

/// Configuration properties for a full generation pass
pub struct PlanetGenProps {
    pub planet: Planet,
    pub point_count: usize,
    pub seed: u64,
    pub relax_iterations: u32,
    pub step_size: f64,
    pub noise_layers: Vec<NoiseLayerSettings>,
    pub debug: bool,
}

impl PlanetGenProps {
    /// Create default props for a planet
    pub fn new(planet: Planet) -> Self {
        Self {
            planet,
            point_count: DEFAULT_POINT_COUNT,
            seed: 42,
            relax_iterations: DEFAULT_RELAX_ITERATIONS,
            step_size: DEFAULT_RELAX_STEP_SIZE,
            noise_layers: DEFAULT_NOISE_LAYERS.clone(),
            debug: false,
        }
    }

    /// Builder pattern methods for customization
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_relaxation(mut self, iterations: u32, step_size: f64) -> Self {
        self.relax_iterations = iterations;
        self.step_size = step_size;
        self
    }

    pub fn with_noise_layers(mut self, noise_layers: Vec<NoiseLayerSettings>) -> Self {
        self.noise_layers = noise_layers;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// One initial-condition solve: seed points, relaxation, tesselation,
/// noise calibration, isostatic columns, sea level. Collaborators read the
/// results as plain data.
pub struct PlanetGen {
    pub planet: Planet,
    pub point_count: usize,
    pub seed: u64,
    pub relax_iterations: u32,
    pub step_size: f64,
    pub debug: bool,

    pub points: Vec<Point>,
    pub noise_field: NoiseField,
    pub tesselation: Option<Tesselation>,
    pub sea_level_m: Option<i32>,
    pub generation_time_s: f64,
}

impl PlanetGen {
    pub fn new(props: PlanetGenProps) -> Self {
        Self {
            planet: props.planet,
            point_count: props.point_count,
            seed: props.seed,
            relax_iterations: props.relax_iterations,
            step_size: props.step_size,
            debug: props.debug,
            points: Vec::new(),
            noise_field: NoiseField::new(props.noise_layers),
            tesselation: None,
            sea_level_m: None,
            generation_time_s: 0.0,
        }
    }

    /// Helper method for debug printing
    fn debug_print(&self, message: &str) {
        if self.debug {
            println!("{}", message);
        }
    }

    /// Runs the whole pass. Data flows strictly forward; the noise field is
    /// calibrated against the relaxed seed points before the solver reads it.
    pub fn generate(&mut self) -> Result<(), PlanetGenError> {
        let start_time = std::time::Instant::now();

        self.debug_print(&format!(
            "🌍 Generating {} seed points (seed {})",
            self.point_count, self.seed
        ));
        let mut points = generate_points(self.point_count, self.seed);

        self.debug_print(&format!(
            "🧲 Relaxing {} iterations at step size {}",
            self.relax_iterations, self.step_size
        ));
        adjust_points_iterative(&mut points, self.relax_iterations, self.step_size);

        self.debug_print("🕸️ Building tesselation...");
        let mut tesselation = build_tesselation(&points)?;
        self.debug_print(&format!(
            "🕸️ Tesselation: {} sample points ({} derived), {} tensors",
            tesselation.point_count(),
            tesselation.point_count() - tesselation.seed_count,
            tesselation.tensor_count()
        ));

        self.noise_field.calibrate(&points);
        self.debug_print(&format!(
            "🌫️ Noise calibrated to raw range [{:.4}, {:.4}]",
            self.noise_field.min_val, self.noise_field.max_val
        ));

        let sea_level = apply_isostasy(&mut tesselation, &self.noise_field)?;
        self.debug_print(&format!("🌊 Sea level: {} m", sea_level));

        self.points = points;
        self.tesselation = Some(tesselation);
        self.sea_level_m = Some(sea_level);
        self.generation_time_s = start_time.elapsed().as_secs_f64();

        self.debug_print(&format!(
            "🚀 Planet generated in {:.3}s",
            self.generation_time_s
        ));
        Ok(())
    }

    /// Fraction of sample points left dry by the flooding pass.
    pub fn land_fraction(&self) -> Option<f64> {
        let tesselation = self.tesselation.as_ref()?;
        self.sea_level_m?;
        if tesselation.points.is_empty() {
            return None;
        }

        let land = tesselation
            .points
            .iter()
            .filter(|sp| sp.data.column.hydrosphere.thickness == 0)
            .count();
        Some(land as f64 / tesselation.point_count() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EARTH;

    #[test]
    fn test_props_builder() {
        let props = PlanetGenProps::new(EARTH.clone())
            .with_point_count(64)
            .with_seed(7)
            .with_relaxation(10, 0.05)
            .with_debug(true);

        assert_eq!(props.point_count, 64);
        assert_eq!(props.seed, 7);
        assert_eq!(props.relax_iterations, 10);
        assert_eq!(props.step_size, 0.05);
        assert!(props.debug);
    }

    #[test]
    fn test_new_is_inert_until_generate() {
        let r#gen = PlanetGen::new(PlanetGenProps::new(EARTH.clone()));
        assert!(r#gen.points.is_empty());
        assert!(r#gen.tesselation.is_none());
        assert!(r#gen.sea_level_m.is_none());
        assert!(!r#gen.noise_field.is_calibrated());
    }
}
