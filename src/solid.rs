//! The validated, closed output surface

use crate::float_types::Real;
use crate::mesh::{ManifoldAnalysis, TriMesh};
use crate::triangulated::{Triangulated3D, Vertex};
use nalgebra::{Point3, Vector3};

/// A single closed, consistently outward-wound triangle surface.
///
/// Only [`WatertightCloser`](crate::closer::WatertightCloser) creates these,
/// after every topology check has passed; the contents cannot be mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedSolid {
    mesh: TriMesh,
    analysis: ManifoldAnalysis,
}

impl ClosedSolid {
    pub(crate) const fn new(mesh: TriMesh, analysis: ManifoldAnalysis) -> Self {
        ClosedSolid { mesh, analysis }
    }

    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.mesh.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.mesh.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangles.len()
    }

    /// Topology measured when the solid was validated.
    pub const fn analysis(&self) -> &ManifoldAnalysis {
        &self.analysis
    }

    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> TriMesh {
        self.mesh
    }

    /// Enclosed volume of the triangulated surface.
    ///
    /// Polygonal, so slightly below the integrated volume of the smooth profile.
    pub fn volume(&self) -> Real {
        self.mesh.signed_volume()
    }

    /// Unit outward normal of every triangle, in triangle order.
    pub fn facet_normals(&self) -> Vec<Vector3<Real>> {
        (0..self.mesh.triangles.len())
            .map(|t| self.mesh.facet_normal(t))
            .collect()
    }

    pub fn surface_area(&self) -> Real {
        self.mesh.surface_area()
    }

    /// `(mins, maxs)` of the vertex positions.
    pub fn bounding_box(&self) -> (Point3<Real>, Point3<Real>) {
        // a validated solid always has vertices
        self.mesh
            .bounding_box()
            .unwrap_or((Point3::origin(), Point3::origin()))
    }
}

impl Triangulated3D for ClosedSolid {
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        self.mesh.visit_triangles(f)
    }
}
