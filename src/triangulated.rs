//! A trait for any surface which can be presented as triangles

use crate::float_types::Real;
use crate::mesh::TriMesh;
use nalgebra::{Point3, Vector3};

/// A triangle corner as handed to exporters: its position plus the facet normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<Real>,
    pub normal: Vector3<Real>,
}

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use the STL writers.
pub trait Triangulated3D {
    /// Call `f` for each triangle.
    ///
    /// The triangle is `[v0, v1, v2]`, counter-clockwise seen from outside,
    /// with every corner carrying the unit facet normal.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);
}

impl Triangulated3D for TriMesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for t in 0..self.triangles.len() {
            let normal = self.facet_normal(t);
            f(self.corners(t).map(|position| Vertex { position, normal }));
        }
    }
}
