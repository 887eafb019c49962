//! Tolerance-based vertex welding over a spatial hash

use crate::float_types::Real;
use crate::mesh::TriMesh;
use hashbrown::HashMap;
use nalgebra::Point3;

/// What a weld pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldReport {
    /// Vertices redirected to an earlier representative
    pub merged_vertices: usize,
    /// Triangles dropped because two corners became the same vertex
    pub collapsed_triangles: usize,
}

type Cell = (i64, i64, i64);

fn cell_of(position: &Point3<Real>, cell_size: Real) -> Cell {
    (
        (position.x / cell_size).floor() as i64,
        (position.y / cell_size).floor() as i64,
        (position.z / cell_size).floor() as i64,
    )
}

/// Map every vertex to the lowest-indexed vertex closer than `tolerance`.
///
/// Only representatives absorb other vertices, so the result is a single
/// hop: `remap[remap[i]] == remap[i]`.
pub fn representatives(vertices: &[Point3<Real>], tolerance: Real) -> Vec<usize> {
    let mut remap: Vec<usize> = (0..vertices.len()).collect();
    if vertices.is_empty() {
        return remap;
    }

    // any pair closer than the tolerance sits in adjacent cells
    let cell_size = tolerance * 2.0;
    let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
    for (idx, position) in vertices.iter().enumerate() {
        grid.entry(cell_of(position, cell_size)).or_default().push(idx);
    }

    for (idx, position) in vertices.iter().enumerate() {
        if remap[idx] != idx {
            continue;
        }
        let (cx, cy, cz) = cell_of(position, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other] != other {
                            continue;
                        }
                        if (position - vertices[other]).norm() < tolerance {
                            remap[other] = idx;
                        }
                    }
                }
            }
        }
    }

    remap
}

/// Merge vertices closer than `tolerance` and drop triangles that collapse.
///
/// Vertex positions are left in place; call [`TriMesh::compact`] to remove
/// the ones no longer referenced.
pub fn weld(mesh: &mut TriMesh, tolerance: Real) -> WeldReport {
    let remap = representatives(&mesh.vertices, tolerance);
    apply(mesh, &remap)
}

/// Redirect every triangle corner through `remap` and drop the triangles
/// that lose a corner.
///
/// `remap` must be single-hop (`remap[remap[i]] == remap[i]`) and as long as
/// the vertex array.
pub fn apply(mesh: &mut TriMesh, remap: &[usize]) -> WeldReport {
    let merged_vertices = remap.iter().enumerate().filter(|&(i, &r)| i != r).count();
    if merged_vertices == 0 {
        return WeldReport::default();
    }

    for triangle in &mut mesh.triangles {
        for i in triangle.iter_mut() {
            *i = remap[*i];
        }
    }

    let before = mesh.triangles.len();
    mesh.triangles
        .retain(|&[i0, i1, i2]| i0 != i1 && i1 != i2 && i0 != i2);

    WeldReport {
        merged_vertices,
        collapsed_triangles: before - mesh.triangles.len(),
    }
}
