//! Closing the revolved wall into a printable solid
//!
//! The wall tube is open at both ends. The closer caps it with a base disk
//! facing down and a lid facing up, both sampled from the wall's own end
//! radii, then merges everything into one validated surface:
//!
//! 1. every part is triangulated; quads or n-gons are refused
//! 2. the base disk is triangulated first and only then flipped
//! 3. parts are concatenated and their shared vertices merged
//! 4. collapsed triangles and unreferenced vertices are dropped
//! 5. the result must be closed, edge-manifold, consistently wound, in one
//!    piece, enclose a positive volume and not intersect itself
//!
//! For a revolved wall the merge in step 3 follows the lattice: the `θ = 2π`
//! column joins column `0`, a ring of radius zero becomes one axis vertex and
//! cap boundary `k` joins wall column `k` of its end ring. Distances only
//! bound the merge (each pair must lie within the weld tolerance), so close
//! rings are never fused however fine the lattice. [`WatertightCloser::union`]
//! has no lattice to follow and welds arbitrary parts by distance.

use crate::config::{CupConfig, DEFAULT_WELD_TOLERANCE, check_weld_tolerance};
use crate::errors::{CupResult, TopologyError};
use crate::float_types::{Real, area_tolerance};
use crate::mesh::{Disk, PolyMesh, RevolutionMesh, TriMesh, weld};
use crate::solid::ClosedSolid;
use nalgebra::Point3;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatertightCloser {
    weld_tolerance: Real,
    check_self_intersection: bool,
}

impl Default for WatertightCloser {
    fn default() -> Self {
        WatertightCloser {
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            check_self_intersection: true,
        }
    }
}

impl WatertightCloser {
    pub fn new(weld_tolerance: Real) -> CupResult<Self> {
        check_weld_tolerance(weld_tolerance)?;
        Ok(WatertightCloser {
            weld_tolerance,
            check_self_intersection: true,
        })
    }

    pub fn from_config(config: &CupConfig) -> CupResult<Self> {
        Ok(Self::new(config.weld_tolerance)?
            .with_self_intersection_check(config.check_self_intersection))
    }

    pub const fn with_self_intersection_check(mut self, enabled: bool) -> Self {
        self.check_self_intersection = enabled;
        self
    }

    pub const fn weld_tolerance(&self) -> Real {
        self.weld_tolerance
    }

    /// Cap both ends of `wall` and stitch the result into a [`ClosedSolid`].
    #[instrument(level = "debug", skip_all, fields(n_z = wall.n_z(), n_theta = wall.n_theta()))]
    pub fn close(&self, wall: &RevolutionMesh) -> CupResult<ClosedSolid> {
        let segments = wall.n_theta() - 1;
        let tube = wall.triangulate();

        let mut base = Disk::new(Point3::origin(), wall.base_radius(), segments)?.triangulate();
        base.flip_normals()?;

        let lid = Disk::new(Point3::new(0.0, 0.0, wall.height()), wall.rim_radius(), segments)?
            .triangulate();

        let mut mesh = TriMesh::try_from(&PolyMesh::concat(&[&tube, &base, &lid]))?;
        let remap = self.stitch(wall, &mesh.vertices)?;
        let report = weld::apply(&mut mesh, &remap);
        let unreferenced = mesh.compact();

        debug!(
            merged_vertices = report.merged_vertices,
            collapsed_triangles = report.collapsed_triangles,
            unreferenced,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            "stitched surface"
        );

        self.validate(mesh)
    }

    /// Merge plan for `[tube, base, lid]` as laid out by [`close`](Self::close).
    ///
    /// Every target is a column-0 wall vertex that maps to itself, so the plan
    /// is single-hop.
    fn stitch(&self, wall: &RevolutionMesh, vertices: &[Point3<Real>]) -> CupResult<Vec<usize>> {
        let n_theta = wall.n_theta();
        let segments = n_theta - 1;
        let last_ring = wall.n_z() - 1;
        let base_start = wall.vertices().len();
        let lid_start = base_start + segments + 1;

        let mut remap: Vec<usize> = (0..vertices.len()).collect();
        let mut merge = |from: usize, to: usize| -> CupResult<()> {
            let distance = (vertices[from] - vertices[to]).norm();
            if !(distance <= self.weld_tolerance) {
                return Err(TopologyError::SeamGap {
                    vertex: from,
                    distance,
                }
                .into());
            }
            remap[from] = to;
            Ok(())
        };

        let radii = wall.profile().radii();
        for (ring, &radius) in radii.iter().enumerate() {
            let first = wall.index(0, ring);
            if radius == 0.0 {
                for column in 1..n_theta {
                    merge(wall.index(column, ring), first)?;
                }
            } else {
                merge(wall.index(segments, ring), first)?;
            }
        }

        for (start, ring) in [(base_start, 0), (lid_start, last_ring)] {
            let collapsed = radii[ring] == 0.0;
            for k in 0..segments {
                let column = if collapsed { 0 } else { k };
                merge(start + 1 + k, wall.index(column, ring))?;
            }
            if collapsed {
                merge(start, wall.index(0, ring))?;
            }
        }

        Ok(remap)
    }

    /// Concatenate triangulated parts, weld, clean up and validate.
    pub fn union(&self, parts: &[&PolyMesh]) -> CupResult<ClosedSolid> {
        for part in parts {
            part.check_triangulated()?;
        }
        let mut mesh = TriMesh::try_from(&PolyMesh::concat(parts))?;
        let input_triangles = mesh.triangles.len();

        let report = weld::weld(&mut mesh, self.weld_tolerance);
        let degenerate = mesh.strip_degenerate(area_tolerance());
        let unreferenced = mesh.compact();

        debug!(
            input_triangles,
            merged_vertices = report.merged_vertices,
            collapsed_triangles = report.collapsed_triangles,
            degenerate,
            unreferenced,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            "welded surface"
        );

        self.validate(mesh)
    }

    /// Checks run cheapest first; the first failure is reported.
    fn validate(&self, mesh: TriMesh) -> CupResult<ClosedSolid> {
        if mesh.triangles.is_empty() {
            return Err(TopologyError::EmptySurface.into());
        }

        let analysis = mesh.analyze_manifold();
        if analysis.boundary_edges > 0 {
            return Err(TopologyError::BoundaryEdges(analysis.boundary_edges).into());
        }
        if analysis.non_manifold_edges > 0 {
            return Err(TopologyError::NonManifoldEdges(analysis.non_manifold_edges).into());
        }
        if analysis.inconsistent_edges > 0 {
            return Err(TopologyError::InconsistentOrientation(analysis.inconsistent_edges).into());
        }
        if analysis.connected_components != 1 {
            return Err(TopologyError::Disconnected(analysis.connected_components).into());
        }

        let volume = mesh.signed_volume();
        if !(volume > 0.0) {
            return Err(TopologyError::InwardOrientation(volume).into());
        }

        if self.check_self_intersection {
            if let Some((a, b)) = mesh.find_self_intersection() {
                return Err(TopologyError::SelfIntersection(a, b).into());
            }
        }

        debug!(
            euler_characteristic = analysis.euler_characteristic,
            volume, "surface is watertight"
        );
        Ok(ClosedSolid::new(mesh, analysis))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::CupError;
    use crate::expression::RadialFunction;
    use crate::mesh::RevolutionMeshBuilder;

    fn wall(expression: &str, base_radius: Real, height: Real) -> RevolutionMesh {
        let f = RadialFunction::new(expression).unwrap();
        RevolutionMeshBuilder::new(20, 25)
            .unwrap()
            .build(base_radius, height, &f)
            .unwrap()
    }

    #[test]
    fn cylinder_closes() {
        let solid = WatertightCloser::default().close(&wall("0", 1.0, 2.0)).unwrap();
        let analysis = solid.analysis();
        assert!(analysis.is_watertight());
        assert_eq!(analysis.euler_characteristic, 2);
        // 20 rings of 24 plus two cap centers
        assert_eq!(solid.vertex_count(), 20 * 24 + 2);
        assert_eq!(solid.triangle_count(), 19 * 24 * 2 + 2 * 24);
    }

    #[test]
    fn cone_with_collapsed_rim() {
        // r(2) = 0: the top ring and the whole lid weld into one apex
        let solid = WatertightCloser::default().close(&wall("-z / 2", 1.0, 2.0)).unwrap();
        assert!(solid.analysis().is_watertight());
        assert_eq!(solid.vertex_count(), 19 * 24 + 1 + 1);
    }

    #[test]
    fn collapsed_base_joins_the_axis() {
        // r(0) = 0: ring 0 and the whole base fan become one vertex
        let w = wall("z", 0.0, 1.0);
        let solid = WatertightCloser::default().close(&w).unwrap();
        assert!(solid.analysis().is_watertight());
        assert_eq!(solid.vertex_count(), 19 * 24 + 1 + 1);
        assert_eq!(solid.triangle_count(), 24 + 18 * 24 * 2 + 24);
        let apex = solid.vertices().iter().filter(|p| **p == Point3::origin()).count();
        assert_eq!(apex, 1);
    }

    #[test]
    fn open_wall_is_rejected() {
        let tube = wall("0", 1.0, 2.0).triangulate();
        let err = WatertightCloser::default().union(&[&tube]).unwrap_err();
        assert!(matches!(err, CupError::MeshTopology(TopologyError::BoundaryEdges(48))));
    }

    #[test]
    fn quads_are_rejected() {
        let quads = wall("0", 1.0, 2.0).quads();
        let err = WatertightCloser::default().union(&[&quads]).unwrap_err();
        assert!(matches!(
            err,
            CupError::MeshTopology(TopologyError::NotTriangulated { face: 0, corners: 4 })
        ));
    }

    #[test]
    fn unflipped_base_is_inconsistent() {
        let w = wall("0", 1.0, 2.0);
        let tube = w.triangulate();
        let base = Disk::new(Point3::origin(), 1.0, 24).unwrap().triangulate();
        let lid = Disk::new(Point3::new(0.0, 0.0, 2.0), 1.0, 24).unwrap().triangulate();
        let err = WatertightCloser::default()
            .union(&[&tube, &base, &lid])
            .unwrap_err();
        assert!(matches!(
            err,
            CupError::MeshTopology(TopologyError::InconsistentOrientation(_))
        ));
    }

    #[test]
    fn separate_pieces_are_disconnected() {
        let mut lower = Disk::new(Point3::origin(), 1.0, 8).unwrap().triangulate();
        lower.flip_normals().unwrap();
        let upper = Disk::new(Point3::origin(), 1.0, 8).unwrap().triangulate();
        let mut far_lower = Disk::new(Point3::new(5.0, 0.0, 0.0), 1.0, 8).unwrap().triangulate();
        far_lower.flip_normals().unwrap();
        let far_upper = Disk::new(Point3::new(5.0, 0.0, 0.0), 1.0, 8).unwrap().triangulate();

        // two flat closed "pillows", far apart
        let err = WatertightCloser::default()
            .with_self_intersection_check(false)
            .union(&[&lower, &upper, &far_lower, &far_upper])
            .unwrap_err();
        assert_eq!(err, CupError::MeshTopology(TopologyError::Disconnected(2)));
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert!(WatertightCloser::new(0.0).is_err());
        assert!(WatertightCloser::new(Real::NAN).is_err());
    }
}
