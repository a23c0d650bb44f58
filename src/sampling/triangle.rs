/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Spherical triangles of the BCC stereographic projection
//!
//! Directions are drawn area-uniformly over the flat triangle spanned by
//! three vertices and then projected onto the unit sphere.

use crate::utils::Vector3D;
use rand::Rng;

/// A triangle on the unit sphere given by three (not necessarily unit) vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalTriangle {
    pub a: Vector3D,
    pub b: Vector3D,
    pub c: Vector3D,
}

impl Default for SphericalTriangle {
    /// The irreducible triangle used for the tungsten cascades, spanned by
    /// the <010>, <-110> and <-111> directions
    fn default() -> Self {
        Self::new(
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(-0.5, 0.5, 0.0),
            Vector3D::new(-0.5, 0.5, 0.5),
        )
    }
}

impl SphericalTriangle {
    pub fn new(a: Vector3D, b: Vector3D, c: Vector3D) -> Self {
        Self { a, b, c }
    }

    /// Map two uniform variates in [0, 1) to a point of the flat triangle
    ///
    /// P = (1 - √r1)·A + √r1·(1 - r2)·B + √r1·r2·C
    pub fn point(&self, r1: f64, r2: f64) -> Vector3D {
        let s = r1.sqrt();
        self.a * (1.0 - s) + self.b * (s * (1.0 - r2)) + self.c * (s * r2)
    }

    /// Draw a unit direction uniformly over the triangle
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3D {
        let r1: f64 = rng.gen();
        let r2: f64 = rng.gen();
        self.point(r1, r2).normalize()
    }

    /// Whether a direction lies inside the cone spanned by the vertices
    ///
    /// The direction is decomposed as αA + βB + γC by Cramer's rule; it lies
    /// inside when all three coefficients are non-negative (within `tol`).
    pub fn contains(&self, direction: &Vector3D, tol: f64) -> bool {
        let det = self.a.triple(&self.b, &self.c);
        if det.abs() < 1e-14 {
            return false;
        }
        let alpha = direction.triple(&self.b, &self.c) / det;
        let beta = self.a.triple(direction, &self.c) / det;
        let gamma = self.a.triple(&self.b, direction) / det;
        alpha >= -tol && beta >= -tol && gamma >= -tol
    }
}
