use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// N-dimensional coordinate vector; in practice 3 (positions) or 4
/// (packed corner dot products in the noise lattice).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    pub coordinates: Vec<f64>,
}

impl Point {
    pub fn new(coordinates: Vec<f64>) -> Self {
        if coordinates.is_empty() {
            panic!("a point must have at least one coordinate");
        }
        Point { coordinates }
    }

    pub fn new3(x: f64, y: f64, z: f64) -> Self {
        Point {
            coordinates: vec![x, y, z],
        }
    }

    pub fn new4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Point {
            coordinates: vec![x, y, z, w],
        }
    }

    pub fn zero() -> Self {
        Point::new3(0.0, 0.0, 0.0)
    }

    pub fn zeroes(dimension: usize) -> Self {
        if dimension == 0 {
            panic!("a point must have at least one coordinate");
        }
        Point {
            coordinates: vec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Coordinate at `index`; indices past the dimension read as 0 so that
    /// mixed-dimension dot products zero-pad the shorter operand.
    pub fn coord(&self, index: usize) -> f64 {
        self.coordinates.get(index).copied().unwrap_or(0.0)
    }

    pub fn x(&self) -> f64 {
        self.coord(0)
    }
    pub fn y(&self) -> f64 {
        self.coord(1)
    }
    pub fn z(&self) -> f64 {
        self.coord(2)
    }
    pub fn w(&self) -> f64 {
        self.coord(3)
    }

    pub fn magnitude(&self) -> f64 {
        self.fast_magnitude().sqrt()
    }

    /// Squared magnitude, no sqrt.
    pub fn fast_magnitude(&self) -> f64 {
        Point::dot(self, self)
    }

    pub fn normalized(&self) -> Point {
        self / self.magnitude()
    }

    pub fn rounded(&self) -> Point {
        self.apply(f64::round)
    }

    /// Positions hand-off for rendering/GPU collaborators.
    pub fn vector3(&self) -> Vec3 {
        Vec3::new(self.x() as f32, self.y() as f32, self.z() as f32)
    }

    pub fn dot(a: &Point, b: &Point) -> f64 {
        let mut result = 0.0;
        for i in 0..a.dimension().max(b.dimension()) {
            result += a.coord(i) * b.coord(i);
        }
        result
    }

    pub fn cross(a: &Point, b: &Point) -> Point {
        Point::new3(
            a.y() * b.z() - a.z() * b.y(),
            a.z() * b.x() - a.x() * b.z(),
            a.x() * b.y() - a.y() * b.x(),
        )
    }

    /// Squared euclidean distance over the first three coordinates.
    pub fn fast_distance(a: &Point, b: &Point) -> f64 {
        let dx = a.x() - b.x();
        let dy = a.y() - b.y();
        let dz = a.z() - b.z();
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(a: &Point, b: &Point) -> f64 {
        Point::fast_distance(a, b).sqrt()
    }

    fn apply(&self, operation: impl Fn(f64) -> f64) -> Point {
        Point {
            coordinates: self.coordinates.iter().map(|&c| operation(c)).collect(),
        }
    }

    fn apply2(&self, other: &Point, operation: impl Fn(f64, f64) -> f64) -> Point {
        if self.dimension() != other.dimension() {
            panic!(
                "points must have the same dimension; {} vs {}",
                self.dimension(),
                other.dimension()
            );
        }
        Point {
            coordinates: self
                .coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(&a, &b)| operation(a, b))
                .collect(),
        }
    }
}

impl Add for &Point {
    type Output = Point;
    fn add(self, rhs: &Point) -> Point {
        self.apply2(rhs, |a, b| a + b)
    }
}

impl Add<f64> for &Point {
    type Output = Point;
    fn add(self, rhs: f64) -> Point {
        self.apply(|a| a + rhs)
    }
}

impl Sub for &Point {
    type Output = Point;
    fn sub(self, rhs: &Point) -> Point {
        self.apply2(rhs, |a, b| a - b)
    }
}

impl Sub<f64> for &Point {
    type Output = Point;
    fn sub(self, rhs: f64) -> Point {
        self.apply(|a| a - rhs)
    }
}

impl Mul for &Point {
    type Output = Point;
    fn mul(self, rhs: &Point) -> Point {
        self.apply2(rhs, |a, b| a * b)
    }
}

impl Mul<f64> for &Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        self.apply(|a| a * rhs)
    }
}

impl Div for &Point {
    type Output = Point;
    fn div(self, rhs: &Point) -> Point {
        self.apply2(rhs, |a, b| a / b)
    }
}

impl Div<f64> for &Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        self.apply(|a| a / rhs)
    }
}
