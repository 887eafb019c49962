//! Indexed surface meshes
//!
//! Two representations are used:
//! - [`PolyMesh`]: faces with any number of corners (quads from the
//!   structured wall lattice, n-gons from disks). Boolean-like operations
//!   refuse it unless every face is a triangle.
//! - [`TriMesh`]: triangles only, the representation that gets welded,
//!   validated and exported.

use crate::errors::{CupResult, TopologyError};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

pub mod disk;
pub mod intersect;
pub mod manifold;
pub mod revolution;
pub mod weld;

pub use disk::Disk;
pub use manifold::ManifoldAnalysis;
pub use revolution::{RevolutionMesh, RevolutionMeshBuilder};
pub use weld::WeldReport;

/// Twice the signed-area vector of a triangle; its direction is the
/// counter-clockwise normal.
#[inline]
pub fn triangle_cross(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Vector3<Real> {
    (b - a).cross(&(c - a))
}

#[inline]
pub fn triangle_area(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    0.5 * triangle_cross(a, b, c).norm()
}

/// Unit normal of a counter-clockwise triangle, or zero for a degenerate one.
#[inline]
pub fn triangle_normal(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Vector3<Real> {
    triangle_cross(a, b, c)
        .try_normalize(Real::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// A surface made of polygonal faces over a shared vertex array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh {
    pub vertices: Vec<Point3<Real>>,
    /// Corner indices of each face, counter-clockwise seen from outside
    pub faces: Vec<Vec<usize>>,
}

impl PolyMesh {
    pub const fn new() -> Self {
        PolyMesh {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build from parts, checking every face has at least three valid corners.
    pub fn from_parts(vertices: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> CupResult<Self> {
        for (face, corners) in faces.iter().enumerate() {
            if corners.len() < 3 || corners.iter().any(|&i| i >= vertices.len()) {
                return Err(TopologyError::InvalidFace { face }.into());
            }
        }
        Ok(PolyMesh { vertices, faces })
    }

    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|face| face.len() == 3)
    }

    /// Fails on the first face that is not a triangle.
    pub fn check_triangulated(&self) -> CupResult<()> {
        match self.faces.iter().position(|face| face.len() != 3) {
            Some(face) => Err(TopologyError::NotTriangulated {
                face,
                corners: self.faces[face].len(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Split every face into a fan around its first corner.
    ///
    /// For a quad `[a, b, c, d]` this is the fixed diagonal `a–c`:
    /// `[a, b, c]` and `[a, c, d]`. Winding is preserved.
    pub fn triangulate(&self) -> PolyMesh {
        let faces = self
            .faces
            .iter()
            .flat_map(|face| {
                (1..face.len().saturating_sub(1)).map(move |k| vec![face[0], face[k], face[k + 1]])
            })
            .collect();
        PolyMesh {
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Reverse the winding of every face.
    ///
    /// Only defined on triangles: flipping an n-gon before it is triangulated
    /// is rejected with [`TopologyError::NotTriangulated`].
    pub fn flip_normals(&mut self) -> CupResult<()> {
        self.check_triangulated()?;
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        Ok(())
    }

    /// Append `other`, offsetting its indices. No vertices are merged.
    pub fn append(&mut self, other: &PolyMesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|&i| i + offset).collect::<Vec<_>>()),
        );
    }

    /// Concatenate several meshes in order.
    pub fn concat(parts: &[&PolyMesh]) -> PolyMesh {
        let mut combined = PolyMesh::new();
        for part in parts {
            combined.append(part);
        }
        combined
    }

    /// Newell normal of a face (unit length, zero if degenerate).
    pub fn face_normal(&self, face: usize) -> Vector3<Real> {
        let corners = &self.faces[face];
        let mut normal = Vector3::zeros();
        for (k, &i) in corners.iter().enumerate() {
            let current = self.vertices[i];
            let next = self.vertices[corners[(k + 1) % corners.len()]];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
    }
}

/// A triangle-only indexed mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Point3<Real>>,
    pub triangles: Vec<[usize; 3]>,
}

impl TryFrom<&PolyMesh> for TriMesh {
    type Error = crate::errors::CupError;

    fn try_from(mesh: &PolyMesh) -> Result<Self, Self::Error> {
        mesh.check_triangulated()?;
        Ok(TriMesh {
            vertices: mesh.vertices.clone(),
            triangles: mesh.faces.iter().map(|f| [f[0], f[1], f[2]]).collect(),
        })
    }
}

impl TriMesh {
    pub const fn new() -> Self {
        TriMesh {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn corners(&self, triangle: usize) -> [Point3<Real>; 3] {
        self.triangles[triangle].map(|i| self.vertices[i])
    }

    pub fn facet_normal(&self, triangle: usize) -> Vector3<Real> {
        let [a, b, c] = self.corners(triangle);
        triangle_normal(&a, &b, &c)
    }

    pub fn area(&self, triangle: usize) -> Real {
        let [a, b, c] = self.corners(triangle);
        triangle_area(&a, &b, &c)
    }

    pub fn surface_area(&self) -> Real {
        (0..self.triangles.len()).map(|t| self.area(t)).sum()
    }

    /// Divergence-theorem volume; positive when the surface winds outward.
    ///
    /// Only meaningful for closed surfaces.
    pub fn signed_volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[i0, i1, i2]| {
                let (a, b, c) = (self.vertices[i0], self.vertices[i1], self.vertices[i2]);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Axis-aligned bounds as `(mins, maxs)`, `None` when there are no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<Real>, Point3<Real>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }

    /// Remove triangles whose area is at most `min_area`; returns how many went.
    pub fn strip_degenerate(&mut self, min_area: Real) -> usize {
        let before = self.triangles.len();
        let vertices = &self.vertices;
        self.triangles.retain(|&[i0, i1, i2]| {
            i0 != i1
                && i1 != i2
                && i0 != i2
                && triangle_area(&vertices[i0], &vertices[i1], &vertices[i2]) > min_area
        });
        before - self.triangles.len()
    }

    /// Drop vertices no triangle references and renumber the rest in order.
    pub fn compact(&mut self) -> usize {
        let mut remap = vec![usize::MAX; self.vertices.len()];
        for triangle in &self.triangles {
            for &i in triangle {
                remap[i] = 0;
            }
        }

        let mut kept = Vec::with_capacity(self.vertices.len());
        for (old, slot) in remap.iter_mut().enumerate() {
            if *slot == 0 {
                *slot = kept.len();
                kept.push(self.vertices[old]);
            }
        }

        let removed = self.vertices.len() - kept.len();
        for triangle in &mut self.triangles {
            for i in triangle.iter_mut() {
                *i = remap[*i];
            }
        }
        self.vertices = kept;
        removed
    }
}
