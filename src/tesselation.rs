use crate::column::{Column, CrustKind};
use crate::point::Point;
use serde::{Deserialize, Serialize};

/// Geophysical payload carried by every sample point. Columns start flat
/// and oceanic; the isostasy solver overwrites them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SamplePointData {
    pub relative_velocity: Point,
    pub column: Column,
}

impl Default for SamplePointData {
    fn default() -> Self {
        SamplePointData {
            relative_velocity: Point::zero(),
            column: Column::new(CrustKind::Oceanic),
        }
    }
}

/// Vertex of the tesselation graph. Ids below the seed count are the
/// original seed points; ids at or above it are derived intersection
/// vertices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SamplePoint {
    pub id: usize,
    pub position: Point,
    pub neighbors: Vec<usize>,
    pub data: SamplePointData,
}

impl SamplePoint {
    pub fn new(id: usize, position: Point) -> Self {
        SamplePoint {
            id,
            position,
            neighbors: Vec::new(),
            data: SamplePointData::default(),
        }
    }

    pub fn add_neighbor(&mut self, id: usize) {
        if !self.neighbors.contains(&id) {
            self.neighbors.push(id);
        }
    }
}

/// Undirected edge of the tesselation graph, by sample-point id.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tensor {
    pub a: usize,
    pub b: usize,
}

impl Tensor {
    /// Create a new tensor with consistent ordering: higher id first.
    pub fn new(a: usize, b: usize) -> Self {
        if a > b {
            Tensor { a, b }
        } else {
            Tensor { a: b, b: a }
        }
    }

    /// Get the other sample point of the pair.
    pub fn other_point(&self, id: usize) -> Option<usize> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn contains(&self, id: usize) -> bool {
        self.a == id || self.b == id
    }
}

/// The dual graph over the relaxed seed points: owns every vertex and
/// edge. Vertices are never removed; edges are append-only during
/// construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tesselation {
    pub points: Vec<SamplePoint>,
    pub tensors: Vec<Tensor>,
    /// Number of original seed points; everything above is derived.
    pub seed_count: usize,
}

impl Tesselation {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn tensor_count(&self) -> usize {
        self.tensors.len()
    }

    pub fn derived_points(&self) -> &[SamplePoint] {
        &self.points[self.seed_count..]
    }

    /// Readable dump for downstream collaborators.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
