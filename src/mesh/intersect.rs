//! Triangle/triangle intersection with exact orientation predicates
//!
//! The narrow phase is built on `robust::orient3d` / `robust::orient2d`, so
//! the sign of every side test is exact for the stored coordinates. Touching
//! counts as intersecting. Triangles that share a vertex index are
//! neighbours on the surface and are never compared.

use crate::float_types::Real;
use crate::mesh::{TriMesh, triangle_cross};
use hashbrown::HashMap;
use nalgebra::Point3;
use robust::{Coord, Coord3D};
use std::cmp::Ordering;

type Triangle = [Point3<Real>; 3];
type Cell = (i64, i64, i64);

fn coord3(p: &Point3<Real>) -> Coord3D<Real> {
    Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Sign of the volume spanned by `a, b, c, d`.
fn orient3(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>, d: &Point3<Real>) -> Ordering {
    let det = robust::orient3d(coord3(a), coord3(b), coord3(c), coord3(d));
    det.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

fn orient2(a: &Coord<Real>, b: &Coord<Real>, c: &Coord<Real>) -> Ordering {
    let det = robust::orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    );
    det.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// All signs strictly on one side.
fn separated(signs: [Ordering; 3]) -> bool {
    signs.iter().all(|s| s.is_gt()) || signs.iter().all(|s| s.is_lt())
}

/// No two signs strictly opposed.
fn agree(signs: [Ordering; 3]) -> bool {
    signs.iter().all(|s| s.is_ge()) || signs.iter().all(|s| s.is_le())
}

/// Exact test of two non-degenerate triangles.
pub fn triangles_intersect(t: &Triangle, u: &Triangle) -> bool {
    let u_side = u.map(|p| orient3(&t[0], &t[1], &t[2], &p));
    if separated(u_side) {
        return false;
    }
    let t_side = t.map(|p| orient3(&u[0], &u[1], &u[2], &p));
    if separated(t_side) {
        return false;
    }

    if u_side.iter().all(|s| s.is_eq()) {
        return coplanar_triangles_intersect(t, u);
    }

    (0..3).any(|k| segment_meets_triangle(&t[k], &t[(k + 1) % 3], u))
        || (0..3).any(|k| segment_meets_triangle(&u[k], &u[(k + 1) % 3], t))
}

fn segment_meets_triangle(p: &Point3<Real>, q: &Point3<Real>, tri: &Triangle) -> bool {
    let sp = orient3(&tri[0], &tri[1], &tri[2], p);
    let sq = orient3(&tri[0], &tri[1], &tri[2], q);
    if sp.is_eq() && sq.is_eq() {
        return coplanar_segment_meets_triangle(p, q, tri);
    }
    if sp == sq {
        return false;
    }
    // the line pq passes through the triangle iff it winds the same way
    // around all three edges
    agree([
        orient3(p, q, &tri[0], &tri[1]),
        orient3(p, q, &tri[1], &tri[2]),
        orient3(p, q, &tri[2], &tri[0]),
    ])
}

/// Axis to drop so the projection of `tri` keeps the largest area.
fn dominant_axis(tri: &Triangle) -> usize {
    let n = triangle_cross(&tri[0], &tri[1], &tri[2]).abs();
    if n.x >= n.y && n.x >= n.z {
        0
    } else if n.y >= n.z {
        1
    } else {
        2
    }
}

fn project(p: &Point3<Real>, drop: usize) -> Coord<Real> {
    match drop {
        0 => Coord { x: p.y, y: p.z },
        1 => Coord { x: p.z, y: p.x },
        _ => Coord { x: p.x, y: p.y },
    }
}

fn on_segment(a: &Coord<Real>, b: &Coord<Real>, p: &Coord<Real>) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

fn segments_intersect(p1: &Coord<Real>, p2: &Coord<Real>, q1: &Coord<Real>, q2: &Coord<Real>) -> bool {
    let d1 = orient2(q1, q2, p1);
    let d2 = orient2(q1, q2, p2);
    let d3 = orient2(p1, p2, q1);
    let d4 = orient2(p1, p2, q2);

    if d1 != d2 && d1.is_ne() && d2.is_ne() && d3 != d4 && d3.is_ne() && d4.is_ne() {
        return true;
    }
    (d1.is_eq() && on_segment(q1, q2, p1))
        || (d2.is_eq() && on_segment(q1, q2, p2))
        || (d3.is_eq() && on_segment(p1, p2, q1))
        || (d4.is_eq() && on_segment(p1, p2, q2))
}

fn point_in_triangle(p: &Coord<Real>, tri: &[Coord<Real>; 3]) -> bool {
    agree([
        orient2(&tri[0], &tri[1], p),
        orient2(&tri[1], &tri[2], p),
        orient2(&tri[2], &tri[0], p),
    ])
}

fn coplanar_triangles_intersect(t: &Triangle, u: &Triangle) -> bool {
    let axis = dominant_axis(t);
    let a = t.map(|p| project(&p, axis));
    let b = u.map(|p| project(&p, axis));

    for i in 0..3 {
        for j in 0..3 {
            if segments_intersect(&a[i], &a[(i + 1) % 3], &b[j], &b[(j + 1) % 3]) {
                return true;
            }
        }
    }
    point_in_triangle(&a[0], &b) || point_in_triangle(&b[0], &a)
}

fn coplanar_segment_meets_triangle(p: &Point3<Real>, q: &Point3<Real>, tri: &Triangle) -> bool {
    let axis = dominant_axis(tri);
    let (p, q) = (project(p, axis), project(q, axis));
    let t = tri.map(|v| project(&v, axis));
    (0..3).any(|k| segments_intersect(&p, &q, &t[k], &t[(k + 1) % 3])) || point_in_triangle(&p, &t)
}

fn cell_of(p: &Point3<Real>, cell_size: Real) -> Cell {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

fn cells_of(lo: &Point3<Real>, hi: &Point3<Real>, cell_size: Real) -> impl Iterator<Item = Cell> {
    let (x0, y0, z0) = cell_of(lo, cell_size);
    let (x1, y1, z1) = cell_of(hi, cell_size);
    (x0..=x1).flat_map(move |x| (y0..=y1).flat_map(move |y| (z0..=z1).map(move |z| (x, y, z))))
}

impl TriMesh {
    /// The first pair of non-adjacent triangles that intersect, as `(lower, higher)` index.
    ///
    /// Candidate pairs come from a uniform grid sized to the mean triangle
    /// extent; each pair is tested once, in the cell holding the lower corner
    /// of the overlap of their bounding boxes.
    pub fn find_self_intersection(&self) -> Option<(usize, usize)> {
        let boxes: Vec<(Point3<Real>, Point3<Real>)> = (0..self.triangles.len())
            .map(|t| {
                let [a, b, c] = self.corners(t);
                (a.inf(&b).inf(&c), a.sup(&b).sup(&c))
            })
            .collect();
        if boxes.is_empty() {
            return None;
        }

        let mean_extent = boxes
            .iter()
            .map(|(lo, hi)| (hi - lo).max())
            .sum::<Real>()
            / boxes.len() as Real;
        if !(mean_extent > 0.0) {
            return None;
        }
        let cell_size = mean_extent;

        let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (t, (lo, hi)) in boxes.iter().enumerate() {
            for cell in cells_of(lo, hi, cell_size) {
                grid.entry(cell).or_default().push(t);
            }
        }

        for (i, (lo_i, hi_i)) in boxes.iter().enumerate() {
            for cell in cells_of(lo_i, hi_i, cell_size) {
                let Some(members) = grid.get(&cell) else {
                    continue;
                };
                for &j in members {
                    if j <= i {
                        continue;
                    }
                    let (lo_j, hi_j) = &boxes[j];
                    let lo = lo_i.sup(lo_j);
                    let hi = hi_i.inf(hi_j);
                    if lo.x > hi.x || lo.y > hi.y || lo.z > hi.z {
                        continue;
                    }
                    if cell_of(&lo, cell_size) != cell {
                        continue;
                    }
                    let (ti, tj) = (self.triangles[i], self.triangles[j]);
                    if ti.iter().any(|v| tj.contains(v)) {
                        continue;
                    }
                    if triangles_intersect(&self.corners(i), &self.corners(j)) {
                        return Some((i, j));
                    }
                }
            }
        }
        None
    }
}
