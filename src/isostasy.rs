use crate::column::CrustKind;
use crate::constants::{
    AVG_SEA_DEPTH_M, MAX_CONTINENTAL_CRUST_THICKNESS_M, MAX_OCEANIC_CRUST_THICKNESS_M,
    MIN_CONTINENTAL_CRUST_THICKNESS_M, MIN_OCEANIC_CRUST_THICKNESS_M,
};
use crate::helpers::lerp;
use crate::noise_field::NoiseField;
use crate::tesselation::Tesselation;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsostasyError {
    #[error("noise value {0} outside [-1, 1] cannot map to a crust thickness")]
    NoiseValueOutOfRange(f64),
}

/// Assigns every sample point its initial layered column from the noise
/// field, then floods everything below the derived global sea level.
/// Returns the sea level in meters.
pub fn apply_isostasy(
    tesselation: &mut Tesselation,
    noise: &NoiseField,
) -> Result<i32, IsostasyError> {
    apply_initial_lithosphere_values(tesselation, noise)?;
    Ok(apply_initial_sea_level(tesselation))
}

/// Per-vertex crust assignment. Independent across vertices, so the pass
/// runs in parallel; the noise field is a pure function of position.
pub fn apply_initial_lithosphere_values(
    tesselation: &mut Tesselation,
    noise: &NoiseField,
) -> Result<(), IsostasyError> {
    tesselation.points.par_iter_mut().try_for_each(|sample_point| {
        let value = noise.value_at(&sample_point.position);
        let crust = crust_kind_for(value);
        let thickness = noise_to_crust_thickness(value)?;
        sample_point
            .data
            .column
            .apply_initial_thickness(crust, thickness);
        Ok(())
    })
}

/// Floods every column whose surface sits below the global sea level.
/// The sea-level reduction is a barrier: it must see every surface level
/// before any hydrosphere is assigned.
pub fn apply_initial_sea_level(tesselation: &mut Tesselation) -> i32 {
    let level = sea_level(tesselation);

    tesselation.points.par_iter_mut().for_each(|sample_point| {
        let sea_depth = level - sample_point.data.column.surface_level();
        if sea_depth > 0 {
            sample_point
                .data
                .column
                .apply_initial_hydrosphere_thickness(sea_depth);
        }
    });
    level
}

/// Global sea level: the truncating integer mean of all surface levels
/// plus the average ocean depth.
pub fn sea_level(tesselation: &Tesselation) -> i32 {
    if tesselation.points.is_empty() {
        return AVG_SEA_DEPTH_M;
    }

    let total_elevation: i64 = tesselation
        .points
        .iter()
        .map(|sp| sp.data.column.surface_level() as i64)
        .sum();

    let avg_elevation = total_elevation / tesselation.points.len() as i64;
    avg_elevation as i32 + AVG_SEA_DEPTH_M
}

/// Crust classification from a calibrated noise value. Ties round to even
/// so that exactly 0 stays oceanic, consistent with the oceanic thickness
/// range covering [-1, 0].
pub fn crust_kind_for(value: f64) -> CrustKind {
    if ((value + 1.0) * 0.5).round_ties_even() as i32 == 1 {
        CrustKind::Continental
    } else {
        CrustKind::Oceanic
    }
}

/// Linear thickness interpolation over the crust-type range the value
/// falls in: [-1, 0] oceanic, (0, 1] continental.
pub fn noise_to_crust_thickness(value: f64) -> Result<i32, IsostasyError> {
    if (-1.0..=0.0).contains(&value) {
        let thickness = lerp(
            MIN_OCEANIC_CRUST_THICKNESS_M as f64,
            MAX_OCEANIC_CRUST_THICKNESS_M as f64,
            value + 1.0,
        );
        return Ok(thickness.round() as i32);
    }

    if value > 0.0 && value <= 1.0 {
        let thickness = lerp(
            MIN_CONTINENTAL_CRUST_THICKNESS_M as f64,
            MAX_CONTINENTAL_CRUST_THICKNESS_M as f64,
            value,
        );
        return Ok(thickness.round() as i32);
    }

    Err(IsostasyError::NoiseValueOutOfRange(value))
}
