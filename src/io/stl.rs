//! STL output for anything [`Triangulated3D`]
//!
//! Coordinates and normals are written as `f32`, as both STL flavours
//! require, whatever the active [`Real`](crate::float_types::Real).

use crate::solid::ClosedSolid;
use crate::triangulated::{Triangulated3D, Vertex};
use std::fmt::Write as _;
use std::io::Cursor;

/// Size of the free-form header that opens a binary STL.
pub const BINARY_HEADER_LEN: usize = 80;

/// Prefix that keeps binary headers from starting with `solid`, which
/// readers take as the mark of an ASCII file.
const BINARY_HEADER_PREFIX: &str = "cupform ";

#[allow(clippy::unnecessary_cast)]
fn single(v: &Vertex) -> ([f32; 3], [f32; 3]) {
    let (p, n) = (v.position, v.normal);
    ([p.x as f32, p.y as f32, p.z as f32], [n.x as f32, n.y as f32, n.z as f32])
}

/// Render `shape` as an ASCII STL document named `name`.
///
/// ```rust
/// # use cupform::{config::CupConfig, cup::CupParameters};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CupConfig::default().with_resolution(8, 9).with_integration_samples(16);
/// let model = CupParameters::new(1.0, 1.0, "0").build(&config)?;
/// let text = model.solid().to_stl_ascii("cup");
/// assert!(text.starts_with("solid cup\n"));
/// assert!(text.ends_with("endsolid cup\n"));
/// # Ok(())
/// # }
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = format!("solid {name}\n");

    // writing into a String cannot fail
    shape.visit_triangles(|corners| {
        let (_, [nx, ny, nz]) = single(&corners[0]);
        let _ = writeln!(out, "  facet normal {nx:e} {ny:e} {nz:e}");
        out.push_str("    outer loop\n");
        for corner in &corners {
            let ([x, y, z], _) = single(corner);
            let _ = writeln!(out, "      vertex {x:e} {y:e} {z:e}");
        }
        out.push_str("    endloop\n  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// The 80-byte binary header: a fixed prefix, then `name` cut at a
/// character boundary, zero padded.
pub fn binary_header(name: &str) -> [u8; BINARY_HEADER_LEN] {
    let mut header = [0u8; BINARY_HEADER_LEN];
    let mut len = 0;
    for c in BINARY_HEADER_PREFIX.chars().chain(name.chars()) {
        let width = c.len_utf8();
        if len + width > BINARY_HEADER_LEN {
            break;
        }
        c.encode_utf8(&mut header[len..len + width]);
        len += width;
    }
    header
}

/// Encode `shape` as binary STL, with `name` recorded in the header.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, name: &str) -> std::io::Result<Vec<u8>> {
    let mut facets = Vec::new();
    shape.visit_triangles(|corners| {
        let (_, normal) = single(&corners[0]);
        facets.push(stl_io::Triangle {
            normal: stl_io::Normal::new(normal),
            vertices: corners.map(|corner| stl_io::Vertex::new(single(&corner).0)),
        });
    });

    let mut cursor = Cursor::new(Vec::with_capacity(BINARY_HEADER_LEN + 4 + 50 * facets.len()));
    stl_io::write_stl(&mut cursor, facets.iter())?;
    let mut bytes = cursor.into_inner();
    bytes[..BINARY_HEADER_LEN].copy_from_slice(&binary_header(name));
    Ok(bytes)
}

impl ClosedSolid {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        to_stl_binary(self, name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::TriMesh;
    use nalgebra::Point3;

    fn tetrahedron() -> TriMesh {
        TriMesh {
            vertices: vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            triangles: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        }
    }

    #[test]
    fn header_carries_the_name() {
        let header = binary_header("mug");
        assert!(header.starts_with(b"cupform mug"));
        assert!(header[11..].iter().all(|&b| b == 0));

        // cut before a multi-byte character that would not fit
        let long = "é".repeat(60);
        let header = binary_header(&long);
        let text = std::str::from_utf8(&header).unwrap().trim_end_matches('\0');
        assert_eq!(text.len(), 8 + 2 * 36);
    }

    #[test]
    fn binary_layout() {
        let bytes = to_stl_binary(&tetrahedron(), "tet").unwrap();
        assert_eq!(bytes.len(), BINARY_HEADER_LEN + 4 + 4 * 50);
        assert_eq!(&bytes[..11], b"cupform tet");
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 4);
    }

    #[test]
    fn ascii_facets() {
        let text = to_stl_ascii(&tetrahedron(), "tet");
        assert_eq!(text.matches("facet normal").count(), 4);
        assert_eq!(text.matches("      vertex").count(), 12);
        // first facet lies in z = 0 and faces down
        assert!(text.contains("facet normal 0e0 0e0 -1e0"));
    }
}
