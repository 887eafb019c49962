//! The revolved wall as a structured `(θ, z)` lattice
//!
//! Vertex `(j, i)` (angular index `j`, height index `i`) lives at
//! `(r_i cos θ_j, r_i sin θ_j, z_i)` and is stored at `i · nθ + j`. The
//! angular samples include both `0` and `2π`, so the first and last column
//! coincide and the seam is closed once the columns are welded.
//!
//! Quads are wound `(i, j) → (i, j+1) → (i+1, j+1) → (i+1, j)`, which faces
//! away from the axis for any profile that does not fold back on itself.

use crate::config::{CupConfig, MIN_ANGULAR_SAMPLES, MIN_HEIGHT_SAMPLES, check_samples};
use crate::errors::{CupResult, GeometryError};
use crate::expression::RadialFunction;
use crate::float_types::{Real, TAU};
use crate::mesh::PolyMesh;
use crate::profile::{ProfileSample, check_base_radius, linspace};
use nalgebra::Point3;
use tracing::debug;

/// Samples a [`RadialFunction`] into a [`RevolutionMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevolutionMeshBuilder {
    height_samples: usize,
    angular_samples: usize,
}

impl Default for RevolutionMeshBuilder {
    fn default() -> Self {
        let config = CupConfig::default();
        RevolutionMeshBuilder {
            height_samples: config.height_samples,
            angular_samples: config.angular_samples,
        }
    }
}

impl RevolutionMeshBuilder {
    /// `height_samples >= 2`, `angular_samples >= 4` (the seam sample included).
    pub fn new(height_samples: usize, angular_samples: usize) -> CupResult<Self> {
        check_samples("height_samples", height_samples, MIN_HEIGHT_SAMPLES)?;
        check_samples("angular_samples", angular_samples, MIN_ANGULAR_SAMPLES)?;
        Ok(RevolutionMeshBuilder {
            height_samples,
            angular_samples,
        })
    }

    pub fn from_config(config: &CupConfig) -> CupResult<Self> {
        Self::new(config.height_samples, config.angular_samples)
    }

    pub const fn height_samples(&self) -> usize {
        self.height_samples
    }

    pub const fn angular_samples(&self) -> usize {
        self.angular_samples
    }

    /// Revolve `baseRadius + f(z)` for `z ∈ [0, height]`.
    ///
    /// A radius of exactly zero collapses its ring onto the axis; the ring is
    /// still emitted so the lattice indexing stays intact.
    pub fn build(
        &self,
        base_radius: Real,
        height: Real,
        function: &RadialFunction,
    ) -> CupResult<RevolutionMesh> {
        check_base_radius(base_radius)?;
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height).into());
        }
        let profile = ProfileSample::sample(base_radius, height, function, self.height_samples)?;
        Ok(self.revolve(profile))
    }

    /// Revolve an already sampled profile; its length sets `n_z`.
    pub fn revolve(&self, profile: ProfileSample) -> RevolutionMesh {
        let thetas = linspace(0.0, TAU, self.angular_samples);
        let trig: Vec<(Real, Real)> = thetas.iter().map(|t| (t.cos(), t.sin())).collect();

        let mut positions = Vec::with_capacity(profile.len() * thetas.len());
        for (z, r) in profile.iter() {
            positions.extend(trig.iter().map(|&(c, s)| Point3::new(r * c, r * s, z)));
        }

        debug!(
            height_samples = profile.len(),
            angular_samples = thetas.len(),
            vertices = positions.len(),
            "revolved wall lattice"
        );

        RevolutionMesh {
            profile,
            thetas,
            positions,
        }
    }
}

/// The open wall tube: no caps, seam columns not yet merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RevolutionMesh {
    profile: ProfileSample,
    thetas: Vec<Real>,
    positions: Vec<Point3<Real>>,
}

impl RevolutionMesh {
    /// `nθ`, including the duplicated seam column.
    pub fn n_theta(&self) -> usize {
        self.thetas.len()
    }

    pub fn n_z(&self) -> usize {
        self.profile.len()
    }

    pub fn profile(&self) -> &ProfileSample {
        &self.profile
    }

    pub fn thetas(&self) -> &[Real] {
        &self.thetas
    }

    /// All lattice vertices, row by row from `z = 0`.
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.positions
    }

    #[inline]
    pub const fn index_of(n_theta: usize, angular: usize, height: usize) -> usize {
        height * n_theta + angular
    }

    #[inline]
    pub fn index(&self, angular: usize, height: usize) -> usize {
        Self::index_of(self.n_theta(), angular, height)
    }

    pub fn position(&self, angular: usize, height: usize) -> Point3<Real> {
        self.positions[self.index(angular, height)]
    }

    /// The ring of vertices at height index `height`.
    pub fn ring(&self, height: usize) -> &[Point3<Real>] {
        let start = self.index(0, height);
        &self.positions[start..start + self.n_theta()]
    }

    /// The true wall radius at `z = 0`, which the base cap must match.
    pub fn base_radius(&self) -> Real {
        self.profile.base_radius()
    }

    pub fn rim_radius(&self) -> Real {
        self.profile.rim_radius()
    }

    pub fn height(&self) -> Real {
        self.profile.height()
    }

    /// Largest distance between the `θ = 0` and `θ = 2π` vertex of a ring.
    pub fn seam_gap(&self) -> Real {
        let last = self.n_theta() - 1;
        (0..self.n_z())
            .map(|i| (self.position(0, i) - self.position(last, i)).norm())
            .fold(0.0, Real::max)
    }

    /// The lattice as `(n_z - 1) · (nθ - 1)` quads.
    pub fn quads(&self) -> PolyMesh {
        let n_theta = self.n_theta();
        let mut faces = Vec::with_capacity((self.n_z() - 1) * (n_theta - 1));
        for i in 0..self.n_z() - 1 {
            for j in 0..n_theta - 1 {
                let a = Self::index_of(n_theta, j, i);
                let b = Self::index_of(n_theta, j + 1, i);
                let c = Self::index_of(n_theta, j + 1, i + 1);
                let d = Self::index_of(n_theta, j, i + 1);
                faces.push(vec![a, b, c, d]);
            }
        }
        PolyMesh {
            vertices: self.positions.clone(),
            faces,
        }
    }

    /// Every quad split along its `a–c` diagonal.
    pub fn triangulate(&self) -> PolyMesh {
        self.quads().triangulate()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::CupError;
    use nalgebra::Vector3;

    #[test]
    fn lattice_shape_and_indexing() {
        let f = RadialFunction::new("z").unwrap();
        let mesh = RevolutionMeshBuilder::new(3, 5).unwrap().build(1.0, 2.0, &f).unwrap();
        assert_eq!(mesh.vertices().len(), 15);
        assert_eq!(mesh.index(4, 2), 14);
        assert_eq!(mesh.position(0, 1), Point3::new(2.0, 0.0, 1.0));
        assert_eq!(mesh.ring(2).len(), 5);
        assert_eq!(mesh.thetas()[4], TAU);

        let quads = mesh.quads();
        assert_eq!(quads.faces.len(), 2 * 4);
        assert_eq!(quads.faces[0], vec![0, 1, 6, 5]);
        let tris = mesh.triangulate();
        assert_eq!(tris.faces[0], vec![0, 1, 6]);
        assert_eq!(tris.faces[1], vec![0, 6, 5]);
    }

    #[test]
    fn seam_columns_coincide() {
        let f = RadialFunction::new("sin(3*z) + z**2").unwrap();
        let mesh = RevolutionMeshBuilder::new(40, 33).unwrap().build(2.0, 3.0, &f).unwrap();
        assert!(mesh.seam_gap() < 1e-9);
    }

    #[test]
    fn facets_face_away_from_axis() {
        let f = RadialFunction::new("0.3 * z").unwrap();
        let wall = RevolutionMeshBuilder::new(6, 17).unwrap().build(1.0, 2.0, &f).unwrap();
        let tris = wall.triangulate();
        for (k, face) in tris.faces.iter().enumerate() {
            let centroid = face
                .iter()
                .fold(Vector3::zeros(), |acc, &i| acc + tris.vertices[i].coords)
                / 3.0;
            let radial = Vector3::new(centroid.x, centroid.y, 0.0);
            assert!(tris.face_normal(k).dot(&radial) > 0.0, "face {k} points inward");
        }
    }

    #[test]
    fn zero_radius_ring_is_kept() {
        // r(z) = 1 - z reaches the axis at the rim
        let f = RadialFunction::new("-z").unwrap();
        let mesh = RevolutionMeshBuilder::new(5, 8).unwrap().build(1.0, 1.0, &f).unwrap();
        assert_eq!(mesh.vertices().len(), 40);
        assert_eq!(mesh.rim_radius(), 0.0);
        assert!(mesh.ring(4).iter().all(|p| p.x == 0.0 && p.y == 0.0 && p.z == 1.0));
        assert_eq!(mesh.quads().faces.len(), 4 * 7);
    }

    #[test]
    fn rejects_flat_or_negative_height() {
        let f = RadialFunction::zero();
        let builder = RevolutionMeshBuilder::default();
        assert_eq!(
            builder.build(1.0, 0.0, &f),
            Err(CupError::GeometryInvalid(GeometryError::NonPositiveHeight(0.0)))
        );
        assert!(builder.build(1.0, -2.0, &f).is_err());
        assert!(builder.build(1.0, Real::NAN, &f).is_err());
    }

    #[test]
    fn rejects_coarse_resolutions() {
        assert!(RevolutionMeshBuilder::new(1, 10).is_err());
        assert!(RevolutionMeshBuilder::new(10, 3).is_err());
        assert!(RevolutionMeshBuilder::new(2, 4).is_ok());
    }
}
