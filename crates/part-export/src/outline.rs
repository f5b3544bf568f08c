//! Outline extraction for vector export: silhouette and boundary edges of a
//! projected mesh.

use std::collections::HashMap;

use geom_kernel::TriangleMesh;

use crate::view::View;

/// A 2D line segment in view coordinates.
pub type Segment = ((f32, f32), (f32, f32));

/// Signed area of a projected triangle; positive means front-facing.
fn projected_area(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)
}

/// Outline segments of the mesh as seen from `view`.
///
/// An edge belongs to the outline when it is used by exactly one
/// front-facing triangle: either the facing flips across it (silhouette) or
/// the surface ends there (boundary).
pub fn outline_segments(mesh: &TriangleMesh, view: View) -> Vec<Segment> {
    let mut edge_use: HashMap<(u32, u32), u32> = HashMap::new();

    for tri in mesh.indices.chunks(3) {
        let [i0, i1, i2] = [tri[0], tri[1], tri[2]];
        let a = view.project(mesh.position(i0));
        let b = view.project(mesh.position(i1));
        let c = view.project(mesh.position(i2));
        if projected_area(a, b, c) <= 0.0 {
            continue;
        }
        for (s, e) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = (s.min(e), s.max(e));
            *edge_use.entry(key).or_insert(0) += 1;
        }
    }

    edge_use
        .into_iter()
        .filter(|(_, count)| *count == 1)
        .map(|((s, e), _)| {
            (
                view.project(mesh.position(s)),
                view.project(mesh.position(e)),
            )
        })
        .collect()
}

/// Axis-aligned bounds of a segment set: (min_u, min_v, max_u, max_v).
pub fn segment_bounds(segments: &[Segment]) -> Option<(f32, f32, f32, f32)> {
    let mut bounds: Option<(f32, f32, f32, f32)> = None;
    for (a, b) in segments {
        for p in [a, b] {
            bounds = Some(match bounds {
                None => (p.0, p.1, p.0, p.1),
                Some((min_u, min_v, max_u, max_v)) => (
                    min_u.min(p.0),
                    min_v.min(p.1),
                    max_u.max(p.0),
                    max_v.max(p.1),
                ),
            });
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_kernel::{GeometryKernel, MockKernel};

    fn unit_box_mesh() -> TriangleMesh {
        let mut kernel = MockKernel::new();
        let solid = kernel.make_box([2.0, 3.0, 4.0], [0.0; 3]).unwrap();
        kernel.tessellate(&solid, 0.1).unwrap()
    }

    #[test]
    fn top_outline_of_a_box_is_its_rectangle() {
        let segments = outline_segments(&unit_box_mesh(), View::Top);
        // The top face contributes its 4 perimeter edges; the two triangles
        // share one diagonal which cancels out.
        assert_eq!(segments.len(), 4);
        let (min_u, min_v, max_u, max_v) = segment_bounds(&segments).unwrap();
        assert_eq!((min_u, min_v), (0.0, 0.0));
        assert_eq!((max_u, max_v), (2.0, 3.0));
    }

    #[test]
    fn empty_mesh_has_no_outline() {
        let mesh = TriangleMesh {
            vertices: vec![],
            normals: vec![],
            indices: vec![],
        };
        assert!(outline_segments(&mesh, View::Top).is_empty());
        assert!(segment_bounds(&[]).is_none());
    }
}
