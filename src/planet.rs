use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Planet {
    pub id: Uuid,
    pub radius_m: i32,
}

pub struct PlanetParams {
    pub radius_m: i32,
}

impl Planet {
    pub fn new(params: PlanetParams) -> Self {
        if params.radius_m <= 0 {
            panic!("planet must have a positive radius");
        }

        Planet {
            id: Uuid::new_v4(),
            radius_m: params.radius_m,
        }
    }

    /// Returns the surface area of the planet in square meters.
    pub fn surface_area_m2(&self) -> f64 {
        4.0 * std::f64::consts::PI * (self.radius_m as f64).powi(2)
    }
}
