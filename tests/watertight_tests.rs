mod support;

use approx::assert_relative_eq;
use cupform::{
    CupConfig, ErrorKind, RadialFunction, RevolutionMeshBuilder, WatertightCloser,
    errors::{CupError, TopologyError},
    mesh::{Disk, PolyMesh},
};
use nalgebra::Point3;
use support::{assert_watertight, bounding_box, coarse_config};

fn close(source: &str, base: f64, height: f64) -> cupform::ClosedSolid {
    let config = coarse_config();
    let f = RadialFunction::new(source).unwrap();
    let wall = RevolutionMeshBuilder::from_config(&config)
        .unwrap()
        .build(base as _, height as _, &f)
        .unwrap();
    WatertightCloser::from_config(&config).unwrap().close(&wall).unwrap()
}

#[test]
fn closes_across_profiles() {
    for (source, base, height) in [
        ("0", 3.0, 5.0),
        ("z**3", 3.0, 2.0),
        ("sin(z) + 0.5", 3.0, 5.0),
        ("-0.5 * z", 1.0, 1.5),
        ("0.3 * sin(4 * z)", 1.0, 3.0),
    ] {
        let solid = close(source, base, height);
        assert_watertight(&solid);
    }
}

#[test]
fn cap_radii_match_the_wall() {
    // r(0) = 3 + f(0) = 4, not the raw base radius
    let solid = close("1 + z", 3.0, 2.0);
    assert_watertight(&solid);
    let [min_x, _, min_z, max_x, _, max_z] = bounding_box(&solid);
    assert_relative_eq!(min_z, 0.0);
    assert_relative_eq!(max_z, 2.0);
    assert_relative_eq!(max_x, 6.0, epsilon = 1e-9);
    assert_relative_eq!(min_x, -6.0, epsilon = 1e-2);
}

#[test]
fn caps_face_away_from_the_solid() {
    let solid = close("0", 2.0, 1.0);
    let normals = solid.facet_normals();
    let mut down = 0;
    let mut up = 0;
    for (t, n) in normals.iter().enumerate() {
        let [a, b, c] = solid.triangles()[t].map(|i| solid.vertices()[i]);
        if a.z == 0.0 && b.z == 0.0 && c.z == 0.0 {
            assert_relative_eq!(n.z, -1.0, epsilon = 1e-12);
            down += 1;
        } else if a.z == 1.0 && b.z == 1.0 && c.z == 1.0 {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
            up += 1;
        }
    }
    assert_eq!((down, up), (32, 32));
}

#[test]
fn mesh_volume_converges_to_integral() {
    let config = coarse_config();
    let model = cupform::generate(3.0, 5.0, "sin(z) + 0.5", &config).unwrap();
    let relative = (model.solid().volume() - model.volume()).abs() / model.volume();
    assert!(relative < 0.02, "{relative}");
}

#[test]
fn tight_weld_tolerance_still_closes() {
    let f = RadialFunction::new("z**3").unwrap();
    let wall = RevolutionMeshBuilder::new(20, 30).unwrap().build(3.0, 2.0, &f).unwrap();
    let solid = WatertightCloser::new(1e-9).unwrap().close(&wall).unwrap();
    assert_watertight(&solid);
}

#[test]
fn oversized_weld_tolerance_only_bounds_the_seam() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(8, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    let solid = WatertightCloser::new(100.0).unwrap().close(&wall).unwrap();
    assert_watertight(&solid);
    assert_eq!(solid.vertex_count(), 8 * 8 + 2);

    // without a lattice to follow, the distance weld swallows everything
    let mut base = Disk::new(Point3::origin(), 1.0, 8).unwrap().triangulate();
    base.flip_normals().unwrap();
    let lid = Disk::new(Point3::new(0.0, 0.0, 1.0), 1.0, 8).unwrap().triangulate();
    let err = WatertightCloser::new(100.0)
        .unwrap()
        .union(&[&wall.triangulate(), &base, &lid])
        .unwrap_err();
    assert_eq!(err, CupError::MeshTopology(TopologyError::EmptySurface));
}

#[test]
fn seam_wider_than_tolerance_is_reported() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(4, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    // sin(2π) is not exactly zero, so the seam gap is tiny but positive
    let err = WatertightCloser::new(1e-30).unwrap().close(&wall).unwrap_err();
    assert!(matches!(
        err,
        CupError::MeshTopology(TopologyError::SeamGap { distance, .. }) if distance > 0.0
    ));
}

#[test]
fn cone_closes_at_default_resolution() {
    // the top rings shrink below the weld tolerance long before the apex
    let config = CupConfig::default();
    let solid = cupform::generate(1.0, 1.0, "-z", &config).unwrap().into_solid();
    assert_watertight(&solid);
    // apex plus base centre
    assert_eq!(solid.vertex_count(), 149 * 99 + 2);
}

#[test]
fn short_and_thin_cups_keep_every_ring() {
    // ring spacing 1/149 and 0.05 radius are both below the weld tolerance
    let config = CupConfig::default();
    for (base, height) in [(3.0, 1.0), (0.05, 2.0)] {
        let solid = cupform::generate(base, height, "0", &config).unwrap().into_solid();
        assert_watertight(&solid);
        assert_eq!(solid.vertex_count(), 150 * 99 + 2, "({base}, {height})");
        let [.., min_z, _, _, max_z] = bounding_box(&solid);
        assert_eq!((min_z, max_z), (0.0, height));
    }
}

#[test]
fn pinch_to_the_axis_splits_the_solid() {
    // z = 1 is sampled exactly (step 0.25) and r(1) = 0: two cones meet in a
    // single vertex, which is not one edge-connected surface
    let config = CupConfig::default().with_resolution(9, 33);
    let err = cupform::generate(1.0, 2.0, "-1 + (z - 1)**2", &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MeshTopology);
    assert_eq!(err, CupError::MeshTopology(TopologyError::Disconnected(2)));

    // sampled beside the pinch, the same profile is a thin but valid neck
    let solid = cupform::generate(1.0, 2.0, "-1 + (z - 1)**2", &coarse_config())
        .unwrap()
        .into_solid();
    assert_watertight(&solid);
}

#[test]
fn non_triangulated_parts_are_refused() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(4, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    let tube = wall.triangulate();
    let base = Disk::new(Point3::origin(), 1.0, 8).unwrap().to_polygon();
    let lid = Disk::new(Point3::new(0.0, 0.0, 1.0), 1.0, 8).unwrap().to_polygon();

    let err = WatertightCloser::default()
        .union(&[&tube, &base, &lid])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MeshTopology);
    assert!(matches!(
        err,
        CupError::MeshTopology(TopologyError::NotTriangulated { corners: 8, .. })
    ));
}

#[test]
fn missing_cap_leaves_boundary() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(4, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    let tube = wall.triangulate();
    let mut base = Disk::new(Point3::origin(), 1.0, 8).unwrap().triangulate();
    base.flip_normals().unwrap();

    let err = WatertightCloser::default().union(&[&tube, &base]).unwrap_err();
    assert_eq!(err, CupError::MeshTopology(TopologyError::BoundaryEdges(8)));
}

#[test]
fn inside_out_surface_is_rejected() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(4, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    let mut tube = wall.triangulate();
    tube.flip_normals().unwrap();
    let base = Disk::new(Point3::origin(), 1.0, 8).unwrap().triangulate();
    let mut lid = Disk::new(Point3::new(0.0, 0.0, 1.0), 1.0, 8).unwrap().triangulate();
    lid.flip_normals().unwrap();

    let err = WatertightCloser::default().union(&[&tube, &base, &lid]).unwrap_err();
    assert!(matches!(
        err,
        CupError::MeshTopology(TopologyError::InwardOrientation(v)) if v < 0.0
    ));
}

#[test]
fn self_intersection_is_detected() {
    let f = RadialFunction::zero();
    let wall = RevolutionMeshBuilder::new(4, 9).unwrap().build(1.0, 1.0, &f).unwrap();
    let mesh = WatertightCloser::default().close(&wall).unwrap().into_mesh();

    // lift the base centre above the lid: the base fan becomes a cone that
    // pierces the lid, while topology and volume sign stay valid
    let mut vertices = mesh.vertices.clone();
    let centre = vertices.iter().position(|p| *p == Point3::origin()).unwrap();
    vertices[centre] = Point3::new(0.0, 0.0, 2.0);
    let faces = mesh.triangles.iter().map(|t| t.to_vec()).collect();
    let pierced = PolyMesh::from_parts(vertices, faces).unwrap();

    let err = WatertightCloser::default().union(&[&pierced]).unwrap_err();
    assert!(matches!(
        err,
        CupError::MeshTopology(TopologyError::SelfIntersection(a, b)) if a < b
    ));

    let unchecked = WatertightCloser::default()
        .with_self_intersection_check(false)
        .union(&[&pierced])
        .unwrap();
    assert!(unchecked.volume() > 0.0);
}
