//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use cupform::{
    ClosedSolid,
    config::CupConfig,
    float_types::{PI, Real},
};
use nalgebra::Point3;

/// A resolution small enough for debug-mode tests.
pub fn coarse_config() -> CupConfig {
    CupConfig::default()
        .with_resolution(24, 33)
        .with_integration_samples(200)
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]` of a solid.
pub fn bounding_box(solid: &ClosedSolid) -> [Real; 6] {
    let (lo, hi) = solid.bounding_box();
    [lo.x, lo.y, lo.z, hi.x, hi.y, hi.z]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Distance of a point from the z axis.
pub fn radial_distance(p: &Point3<Real>) -> Real {
    p.x.hypot(p.y)
}

/// `π r² H`
pub fn cylinder(radius: Real, height: Real) -> Real {
    PI * radius * radius * height
}

/// Panics with the full analysis unless the solid is a single closed manifold.
pub fn assert_watertight(solid: &ClosedSolid) {
    let analysis = solid.analysis();
    assert_eq!(analysis.boundary_edges, 0, "{analysis:?}");
    assert_eq!(analysis.non_manifold_edges, 0, "{analysis:?}");
    assert_eq!(analysis.inconsistent_edges, 0, "{analysis:?}");
    assert_eq!(analysis.connected_components, 1, "{analysis:?}");
    assert_eq!(analysis.euler_characteristic, 2, "{analysis:?}");
    assert!(solid.volume() > 0.0);
}
