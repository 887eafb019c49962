mod support;

use approx::assert_relative_eq;
use cupform::{
    ErrorKind, RadialFunction, RevolutionMeshBuilder,
    config::CupConfig,
    float_types::{Real, TAU},
    mesh::TriMesh,
};
use support::radial_distance;

#[test]
fn default_lattice_size() {
    let f = RadialFunction::zero();
    let builder = RevolutionMeshBuilder::from_config(&CupConfig::default()).unwrap();
    let wall = builder.build(3.0, 5.0, &f).unwrap();
    assert_eq!(wall.n_z(), 150);
    assert_eq!(wall.n_theta(), 100);
    assert_eq!(wall.vertices().len(), 150 * 100);
    assert_eq!(wall.quads().faces.len(), 149 * 99);
    assert_eq!(wall.triangulate().faces.len(), 2 * 149 * 99);
}

#[test]
fn angular_range_is_inclusive() {
    let f = RadialFunction::new("0.2 * cos(3 * z)").unwrap();
    let wall = RevolutionMeshBuilder::new(10, 7).unwrap().build(1.0, 4.0, &f).unwrap();
    assert_eq!(wall.thetas()[0], 0.0);
    assert_eq!(wall.thetas()[6], TAU);
    assert!(wall.seam_gap() < 1e-12);
}

#[test]
fn seam_closes_for_many_profiles() {
    let builder = RevolutionMeshBuilder::new(16, 41).unwrap();
    for (source, base, height) in [
        ("0", 3.0, 5.0),
        ("z**3", 3.0, 2.0),
        ("sin(z) + 0.5", 3.0, 5.0),
        ("exp(-z)", 0.0, 1.0),
        ("sqrt(z)", 0.5, 9.0),
    ] {
        let f = RadialFunction::new(source).unwrap();
        let wall = builder.build(base, height, &f).unwrap();
        assert!(wall.seam_gap() < 1e-9, "{source}: gap {}", wall.seam_gap());
    }
}

#[test]
fn rings_follow_the_profile() {
    let f = RadialFunction::new("z**2").unwrap();
    let wall = RevolutionMeshBuilder::new(5, 13).unwrap().build(1.0, 2.0, &f).unwrap();
    for (i, (z, r)) in wall.profile().iter().enumerate() {
        for p in wall.ring(i) {
            assert_relative_eq!(radial_distance(p), r, epsilon = 1e-12);
            assert_eq!(p.z, z);
        }
    }
    assert_eq!(wall.base_radius(), 1.0);
    assert_relative_eq!(wall.rim_radius(), 5.0);
}

#[test]
fn wall_normals_point_outward() {
    let f = RadialFunction::new("sin(z) + 0.5").unwrap();
    let wall = RevolutionMeshBuilder::new(30, 40).unwrap().build(3.0, 5.0, &f).unwrap();
    let mesh = TriMesh::try_from(&wall.triangulate()).unwrap();
    for t in 0..mesh.triangles.len() {
        let [a, b, c] = mesh.corners(t);
        let centroid = (a.coords + b.coords + c.coords) / 3.0;
        let n = mesh.facet_normal(t);
        assert!(n.x * centroid.x + n.y * centroid.y > 0.0, "triangle {t}");
    }
}

#[test]
fn degenerate_ring_is_emitted() {
    // r(1) = 0 exactly in the middle of the lattice
    let f = RadialFunction::new("(z - 1)**2 - 1").unwrap();
    let wall = RevolutionMeshBuilder::new(3, 9).unwrap().build(1.0, 2.0, &f).unwrap();
    assert_eq!(wall.vertices().len(), 27);
    assert!(wall.ring(1).iter().all(|p| radial_distance(p) == 0.0));
    assert_eq!(wall.quads().faces.len(), 2 * 8);
}

#[test]
fn negative_profile_is_rejected() {
    let f = RadialFunction::new("-z").unwrap();
    let err = RevolutionMeshBuilder::new(4, 8)
        .unwrap()
        .build(1.0, 3.0, &f)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryInvalid);
}

#[test]
fn effective_radius_is_never_negative() {
    // r = 1 - 0.999 (1 - cos 4z) / 2 dips to 0.001
    let f = RadialFunction::new("0.999 * (cos(4 * z) - 1) / 2").unwrap();
    let wall = RevolutionMeshBuilder::new(64, 8).unwrap().build(1.0, 3.0, &f).unwrap();
    assert!(wall.profile().radii().iter().all(|&r| r >= 0.0));
    assert!(wall.profile().min_radius() < 0.01 as Real);
}
