//! Tessellation of truck solids into flat triangle meshes.

use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};
use truck_modeling::topology::Solid;

use crate::types::{KernelError, TriangleMesh};

/// Tessellate a solid and flatten it to a single triangle soup.
///
/// Normals are recomputed per vertex by area-weighted facet accumulation;
/// truck's own normal array indexes a separate attribute space that is not
/// useful once the mesh is flattened.
pub(crate) fn tessellate_solid(
    solid: &Solid,
    tolerance: f64,
) -> Result<TriangleMesh, KernelError> {
    let meshed = solid.triangulation(tolerance);
    let polygon = meshed.to_polygon();

    let positions = polygon.positions();
    let tri_faces = polygon.tri_faces();

    let mut vertices = Vec::with_capacity(positions.len() * 3);
    for pos in positions {
        vertices.push(pos[0] as f32);
        vertices.push(pos[1] as f32);
        vertices.push(pos[2] as f32);
    }

    let mut indices = Vec::with_capacity(tri_faces.len() * 3);
    for tri in tri_faces {
        for v in tri.iter() {
            indices.push(v.pos as u32);
        }
    }

    if indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid tessellated to an empty mesh".to_string(),
        });
    }

    let normals = accumulate_vertex_normals(&vertices, &indices);
    Ok(TriangleMesh {
        vertices,
        normals,
        indices,
    })
}

/// Per-vertex normals from facet cross products, normalized at the end.
fn accumulate_vertex_normals(vertices: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; vertices.len()];
    for tri in indices.chunks(3) {
        let [i0, i1, i2] = [tri[0] as usize * 3, tri[1] as usize * 3, tri[2] as usize * 3];
        let a = [
            vertices[i1] - vertices[i0],
            vertices[i1 + 1] - vertices[i0 + 1],
            vertices[i1 + 2] - vertices[i0 + 2],
        ];
        let b = [
            vertices[i2] - vertices[i0],
            vertices[i2 + 1] - vertices[i0 + 1],
            vertices[i2 + 2] - vertices[i0 + 2],
        ];
        let n = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        for &base in &[i0, i1, i2] {
            normals[base] += n[0];
            normals[base + 1] += n[1];
            normals[base + 2] += n[2];
        }
    }
    for normal in normals.chunks_mut(3) {
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if len > 1e-12 {
            normal[0] /= len;
            normal[1] /= len;
            normal[2] /= len;
        }
    }
    normals
}
