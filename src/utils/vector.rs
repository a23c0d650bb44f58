/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Vector3D type for directions, velocities and site positions

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 3D vector in Cartesian components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3D {
    /// Create a new 3D vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Calculate the length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Calculate the dot product with another vector
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the cross product with another vector
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Scalar triple product `self · (b × c)`
    pub fn triple(&self, b: &Self, c: &Self) -> f64 {
        self.dot(&b.cross(c))
    }

    /// Normalize the vector to unit length
    ///
    /// Vectors shorter than 1e-10 normalize to the origin.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-10 {
            *self * (1.0 / len)
        } else {
            Self::origin()
        }
    }

    /// Components as an array, in x, y, z order
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        Self {
            x: self.x * scale,
            y: self.y * scale,
            z: self.z * scale,
        }
    }
}
