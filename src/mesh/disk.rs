//! Flat circular caps perpendicular to the z axis

use crate::config::check_samples;
use crate::errors::{CupResult, GeometryError};
use crate::float_types::{Real, TAU};
use crate::mesh::PolyMesh;
use nalgebra::Point3;

/// A disk of `radius` centred on the z axis at `center.z`, sampled with
/// `segments` boundary points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub center: Point3<Real>,
    pub radius: Real,
    pub segments: usize,
}

impl Disk {
    pub fn new(center: Point3<Real>, radius: Real, segments: usize) -> CupResult<Self> {
        check_samples("disk segments", segments, 3)?;
        if !radius.is_finite() {
            return Err(GeometryError::NonFiniteRadius {
                z: center.z,
                radius,
            }
            .into());
        }
        if radius < 0.0 {
            return Err(GeometryError::NegativeRadius {
                z: center.z,
                radius,
            }
            .into());
        }
        Ok(Disk {
            center,
            radius,
            segments,
        })
    }

    /// Boundary points at `θ_k = k / segments · 2π`, counter-clockwise seen from `+z`.
    ///
    /// `θ = 2π` is not repeated.
    pub fn boundary(&self) -> Vec<Point3<Real>> {
        (0..self.segments)
            .map(|k| {
                let theta = TAU * k as Real / self.segments as Real;
                Point3::new(
                    self.center.x + self.radius * theta.cos(),
                    self.center.y + self.radius * theta.sin(),
                    self.center.z,
                )
            })
            .collect()
    }

    /// The disk as one n-gon facing `+z`.
    pub fn to_polygon(&self) -> PolyMesh {
        PolyMesh {
            vertices: self.boundary(),
            faces: vec![(0..self.segments).collect()],
        }
    }

    /// Center fan facing `+z`: vertex 0 is the center, then the boundary.
    pub fn triangulate(&self) -> PolyMesh {
        let mut vertices = Vec::with_capacity(self.segments + 1);
        vertices.push(self.center);
        vertices.extend(self.boundary());

        let faces = (0..self.segments)
            .map(|k| vec![0, 1 + k, 1 + (k + 1) % self.segments])
            .collect();
        PolyMesh { vertices, faces }
    }
}
