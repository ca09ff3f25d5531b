use crate::point::Point;
use serde::{Deserialize, Serialize};

/// Parameters of one noise layer. Layers are blended by `priority` share.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NoiseLayerSettings {
    pub scale: f64,
    pub octaves: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Offset applied to lattice coordinates.
    pub offset: Point,
    pub rotation: f64,
    /// Blend weight, always >= 1.
    pub priority: i32,
}

impl NoiseLayerSettings {
    pub fn new(
        scale: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        offset: Point,
        rotation: f64,
        priority: i32,
    ) -> Self {
        NoiseLayerSettings {
            scale,
            octaves,
            persistence,
            lacunarity,
            offset,
            rotation,
            priority: if priority == 0 { 1 } else { priority },
        }
    }

    /// Structural comparison; collaborators use this to invalidate caches
    /// (regenerated textures, resampled fields) when settings move.
    pub fn has_changed(a: &NoiseLayerSettings, b: &NoiseLayerSettings) -> bool {
        a != b
    }

    pub fn any_changed(a: &[NoiseLayerSettings], b: &[NoiseLayerSettings]) -> bool {
        if a.len() != b.len() {
            return true;
        }
        a.iter()
            .zip(b.iter())
            .any(|(x, y)| NoiseLayerSettings::has_changed(x, y))
    }
}

impl Default for NoiseLayerSettings {
    fn default() -> Self {
        NoiseLayerSettings {
            scale: 2.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: Point::zero(),
            rotation: 0.0,
            priority: 1,
        }
    }
}
