use crate::constants::{CONTINENTAL_BASE_REFERENCE_DEPTH_M, OCEANIC_BASE_REFERENCE_DEPTH_M};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Hydrosphere,
    Cryosphere,
    Sediment,
    UpperCrust,
    LowerCrust,
    LithosphericMantle,
}

pub const LAYER_KINDS: [LayerKind; 6] = [
    LayerKind::Hydrosphere,
    LayerKind::Cryosphere,
    LayerKind::Sediment,
    LayerKind::UpperCrust,
    LayerKind::LowerCrust,
    LayerKind::LithosphericMantle,
];

/// Binary crust classification; selects the base-value row and the
/// thickness/reference-depth ranges.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrustKind {
    Oceanic,
    Continental,
}

/// Fixed physical properties of a layer, looked up, never computed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LayerBaseValues {
    /// kg/m^3
    pub density: i32,
    /// W/(m*K)
    pub thermal_conductivity: f64,
    /// J/(kg*K)
    pub heat_capacity: i32,
    /// GPa
    pub elastic_modulus: i32,
    /// MPa
    pub yield_strength: i32,
    /// log10 Pa*s
    pub viscosity: i32,
}

impl LayerBaseValues {
    const fn new(
        density: i32,
        thermal_conductivity: f64,
        heat_capacity: i32,
        elastic_modulus: i32,
        yield_strength: i32,
        viscosity: i32,
    ) -> Self {
        LayerBaseValues {
            density,
            thermal_conductivity,
            heat_capacity,
            elastic_modulus,
            yield_strength,
            viscosity,
        }
    }
}

static BASE_VALUES: Lazy<HashMap<(LayerKind, CrustKind), LayerBaseValues>> = Lazy::new(|| {
    use CrustKind::*;
    use LayerKind::*;

    HashMap::from([
        ((Hydrosphere, Oceanic), LayerBaseValues::new(1000, 0.6, 4200, 0, 0, -3)),
        ((Cryosphere, Oceanic), LayerBaseValues::new(917, 2.1, 2050, 9, 2, 14)),
        ((Sediment, Oceanic), LayerBaseValues::new(2500, 1.5, 800, 10, 20, 16)),
        ((UpperCrust, Oceanic), LayerBaseValues::new(2700, 2.5, 900, 30, 100, 24)),
        ((LowerCrust, Oceanic), LayerBaseValues::new(2900, 2.9, 1000, 50, 150, 22)),
        ((LithosphericMantle, Oceanic), LayerBaseValues::new(3300, 3.2, 1200, 70, 200, 21)),
        ((Hydrosphere, Continental), LayerBaseValues::new(1000, 0.6, 4200, 0, 0, -3)),
        ((Cryosphere, Continental), LayerBaseValues::new(917, 2.1, 2050, 9, 2, 14)),
        ((Sediment, Continental), LayerBaseValues::new(2500, 1.5, 800, 10, 30, 17)),
        ((UpperCrust, Continental), LayerBaseValues::new(2700, 2.5, 900, 40, 200, 25)),
        ((LowerCrust, Continental), LayerBaseValues::new(2900, 2.9, 1000, 60, 200, 23)),
        ((LithosphericMantle, Continental), LayerBaseValues::new(3300, 3.2, 1200, 70, 300, 21)),
    ])
});

pub fn base_values(kind: LayerKind, crust: CrustKind) -> LayerBaseValues {
    BASE_VALUES[&(kind, crust)]
}

/// Depth/temperature at the bottom of a layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct LayerBoundary {
    pub depth: i32,
    pub temperature: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub boundary: LayerBoundary,
    /// Meters; signed so deficit states survive arithmetic.
    pub thickness: i32,
    pub base_values: LayerBaseValues,
}

impl Layer {
    pub fn new(kind: LayerKind, crust: CrustKind) -> Self {
        Layer {
            kind,
            boundary: LayerBoundary::default(),
            thickness: 0,
            base_values: base_values(kind, crust),
        }
    }
}

/// A vertical rock/water column in isostatic equilibrium: six layers over a
/// reference depth at which pressure is assumed equal planet-wide.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Column {
    pub hydrosphere: Layer,
    pub cryosphere: Layer,
    pub sediment: Layer,
    pub upper_crust: Layer,
    pub lower_crust: Layer,
    pub lithospheric_mantle: Layer,
    /// Meters below the equilibrium surface.
    pub reference_depth: i32,
}

impl Column {
    pub fn new(crust: CrustKind) -> Self {
        Column {
            hydrosphere: Layer::new(LayerKind::Hydrosphere, crust),
            cryosphere: Layer::new(LayerKind::Cryosphere, crust),
            sediment: Layer::new(LayerKind::Sediment, crust),
            upper_crust: Layer::new(LayerKind::UpperCrust, crust),
            lower_crust: Layer::new(LayerKind::LowerCrust, crust),
            lithospheric_mantle: Layer::new(LayerKind::LithosphericMantle, crust),
            reference_depth: 0,
        }
    }

    pub fn layers(&self) -> [&Layer; 6] {
        [
            &self.hydrosphere,
            &self.cryosphere,
            &self.sediment,
            &self.upper_crust,
            &self.lower_crust,
            &self.lithospheric_mantle,
        ]
    }

    /// Height of the column top relative to the equilibrium surface.
    pub fn surface_level(&self) -> i32 {
        let total: i32 = self.layers().iter().map(|l| l.thickness).sum();
        total - self.reference_depth
    }

    /// Installs the crust split, estimates the reference depth, and solves
    /// the Airy mantle root. Base values are re-keyed to the classified
    /// crust kind for all six layers.
    pub fn apply_initial_thickness(&mut self, crust: CrustKind, crust_thickness: i32) {
        self.hydrosphere = Layer::new(LayerKind::Hydrosphere, crust);
        self.cryosphere = Layer::new(LayerKind::Cryosphere, crust);
        self.sediment = Layer::new(LayerKind::Sediment, crust);
        self.upper_crust = Layer::new(LayerKind::UpperCrust, crust);
        self.lower_crust = Layer::new(LayerKind::LowerCrust, crust);
        self.lithospheric_mantle = Layer::new(LayerKind::LithosphericMantle, crust);

        self.upper_crust.thickness = crust_thickness / 2;
        self.lower_crust.thickness = crust_thickness / 2;
        self.reference_depth = self.estimate_reference_depth(crust, crust_thickness);
        self.solve_mantle_thickness();
    }

    pub fn apply_initial_hydrosphere_thickness(&mut self, thickness: i32) {
        self.hydrosphere.thickness = thickness;
    }

    fn estimate_reference_depth(&self, crust: CrustKind, crust_thickness: i32) -> i32 {
        let rho_crust = (self.upper_crust.base_values.density as f64
            + self.lower_crust.base_values.density as f64)
            / 2.0;
        let rho_mantle = self.lithospheric_mantle.base_values.density as f64;

        let base = match crust {
            CrustKind::Oceanic => OCEANIC_BASE_REFERENCE_DEPTH_M,
            CrustKind::Continental => CONTINENTAL_BASE_REFERENCE_DEPTH_M,
        };

        // Thicker crust pushes the compensation depth down.
        let adjustment = (rho_crust / rho_mantle) * crust_thickness as f64 * 0.1;
        (base as f64 + adjustment) as i32
    }

    /// Airy isostasy: the mantle root balances the crust load so that
    /// pressure at the reference depth matches a pure-mantle column.
    fn solve_mantle_thickness(&mut self) {
        let rho_upper = self.upper_crust.base_values.density as f64;
        let rho_lower = self.lower_crust.base_values.density as f64;
        let rho_mantle = self.lithospheric_mantle.base_values.density as f64;

        let t_upper = self.upper_crust.thickness as f64;
        let t_lower = self.lower_crust.thickness as f64;

        let mantle_thickness =
            self.reference_depth as f64 - (rho_upper * t_upper + rho_lower * t_lower) / rho_mantle;

        self.lithospheric_mantle.thickness = mantle_thickness.round() as i32;
    }
}
