use crate::noise_settings::NoiseLayerSettings;
use crate::planet::Planet;
use crate::point::Point;
use once_cell::sync::Lazy;
use uuid::Uuid;

pub const EARTH_ID: Uuid = Uuid::from_u128(0x1234567890abcdef1234567890abcdef);

/// Mean planet radius in meters.
pub const PLANET_RADIUS_M: i32 = 6_371_007;

pub static EARTH: Planet = Planet {
    id: EARTH_ID,
    radius_m: PLANET_RADIUS_M,
};

// === Crust thickness (m) ===
pub const MIN_OCEANIC_CRUST_THICKNESS_M: i32 = 6_000; // magma supply variability floor
pub const MAX_OCEANIC_CRUST_THICKNESS_M: i32 = 10_000;
pub const MIN_CONTINENTAL_CRUST_THICKNESS_M: i32 = 30_000;
pub const MAX_CONTINENTAL_CRUST_THICKNESS_M: i32 = 70_000;

// === Isostasy (m) ===
pub const OCEANIC_BASE_REFERENCE_DEPTH_M: i32 = 90_000;
pub const CONTINENTAL_BASE_REFERENCE_DEPTH_M: i32 = 150_000;

/// Total ocean volume / surface area.
pub const AVG_SEA_DEPTH_M: i32 = 2_800;

// === Tesselation ===
pub const NEAREST_NEIGHBOR_CANDIDATES: usize = 10;
pub const PLANE_DEGENERACY_EPSILON: f64 = 1e-15;

// === Generation defaults ===
pub const DEFAULT_POINT_COUNT: usize = 1_000;
pub const DEFAULT_RELAX_ITERATIONS: u32 = 50;
pub const DEFAULT_RELAX_STEP_SIZE: f64 = 0.1;

/// Two-layer crust field: broad continent masses plus a lower-priority
/// detail layer breaking up the coastlines.
pub static DEFAULT_NOISE_LAYERS: Lazy<Vec<NoiseLayerSettings>> = Lazy::new(|| {
    vec![
        NoiseLayerSettings::new(1.5, 4, 0.5, 2.0, Point::zero(), 0.0, 3),
        NoiseLayerSettings::new(6.0, 5, 0.55, 2.1, Point::new3(31.0, 17.0, 9.0), 0.0, 1),
    ]
});
