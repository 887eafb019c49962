//! Manifold validation and topology analysis for [`TriMesh`]
//!
//! Works purely on vertex indices, so it must run after welding: two
//! triangles that merely touch at equal coordinates with different indices
//! are not neighbours here.
//!
//! ## Properties measured
//! 1. **Edge manifold**: each undirected edge is used by exactly two triangles
//! 2. **Orientation**: each directed edge is used at most once, so neighbours
//!    traverse their common edge in opposite directions
//! 3. **Connectivity**: triangles linked through shared edges form one component
//! 4. **Euler characteristic**: `χ = V - E + F`, `2` for a closed genus-0 surface

use crate::mesh::TriMesh;
use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifoldAnalysis {
    /// Edges used by a single triangle (0 for closed surfaces)
    pub boundary_edges: usize,
    /// Edges shared by more than two triangles
    pub non_manifold_edges: usize,
    /// Directed edges used by more than one triangle
    pub inconsistent_edges: usize,
    /// Vertices no triangle references
    pub isolated_vertices: usize,
    /// Edge-connected components of triangles
    pub connected_components: usize,
    /// Euler characteristic (V - E + F) over referenced vertices
    pub euler_characteristic: i64,
}

impl ManifoldAnalysis {
    /// Closed, edge-manifold and consistently wound.
    pub const fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0 && self.inconsistent_edges == 0
    }

    /// A closed manifold in one piece.
    pub const fn is_watertight(&self) -> bool {
        self.is_closed_manifold() && self.connected_components == 1
    }
}

impl TriMesh {
    pub fn analyze_manifold(&self) -> ManifoldAnalysis {
        let mut edge_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut directed: HashMap<(usize, usize), u32> = HashMap::new();
        let mut referenced = vec![false; self.vertices.len()];

        for (face, triangle) in self.triangles.iter().enumerate() {
            for k in 0..3 {
                let (v1, v2) = (triangle[k], triangle[(k + 1) % 3]);
                referenced[v1] = true;
                let edge = if v1 < v2 { (v1, v2) } else { (v2, v1) };
                edge_faces.entry(edge).or_default().push(face);
                *directed.entry((v1, v2)).or_insert(0) += 1;
            }
        }

        let mut boundary_edges = 0;
        let mut non_manifold_edges = 0;
        for faces in edge_faces.values() {
            match faces.len() {
                1 => boundary_edges += 1,
                2 => {},
                _ => non_manifold_edges += 1,
            }
        }

        let inconsistent_edges = directed.values().filter(|&&count| count > 1).count();
        let used_vertices = referenced.iter().filter(|&&used| used).count();
        let connected_components = self.count_connected_components(&edge_faces);
        let euler_characteristic =
            used_vertices as i64 - edge_faces.len() as i64 + self.triangles.len() as i64;

        ManifoldAnalysis {
            boundary_edges,
            non_manifold_edges,
            inconsistent_edges,
            isolated_vertices: self.vertices.len() - used_vertices,
            connected_components,
            euler_characteristic,
        }
    }

    /// Flood fill over shared edges with an explicit stack.
    fn count_connected_components(&self, edge_faces: &HashMap<(usize, usize), Vec<usize>>) -> usize {
        let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); self.triangles.len()];
        for faces in edge_faces.values() {
            for (a, &f1) in faces.iter().enumerate() {
                for &f2 in &faces[a + 1..] {
                    neighbours[f1].push(f2);
                    neighbours[f2].push(f1);
                }
            }
        }

        let mut visited = vec![false; self.triangles.len()];
        let mut stack = Vec::new();
        let mut components = 0;
        for seed in 0..self.triangles.len() {
            if visited[seed] {
                continue;
            }
            components += 1;
            visited[seed] = true;
            stack.push(seed);
            while let Some(face) = stack.pop() {
                for &next in &neighbours[face] {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
        }
        components
    }
}
