//! Binary STL export of the tessellated final solid.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geom_kernel::TriangleMesh;
use stl_io::{Normal, Triangle, Vertex};

use crate::error::ExportError;

/// Convert a mesh to STL triangles, recomputing each facet normal from the
/// vertex winding.
pub fn stl_triangles(mesh: &TriangleMesh) -> Result<Vec<Triangle>, ExportError> {
    if mesh.triangle_count() == 0 {
        return Err(ExportError::EmptyMesh);
    }
    let vertex_count = mesh.vertex_count() as u32;
    let mut triangles = Vec::with_capacity(mesh.triangle_count());

    for tri in mesh.indices.chunks(3) {
        for &idx in tri {
            if idx >= vertex_count {
                return Err(ExportError::Encode {
                    format: "STL",
                    reason: format!("index {idx} out of range (vertex count = {vertex_count})"),
                });
            }
        }
        let [p0, p1, p2] = [
            mesh.position(tri[0]),
            mesh.position(tri[1]),
            mesh.position(tri[2]),
        ];
        let a = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let b = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
        let n = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        let normal = if len > 1e-12 {
            [n[0] / len, n[1] / len, n[2] / len]
        } else {
            [0.0, 0.0, 1.0]
        };
        triangles.push(Triangle {
            normal: Normal::new(normal),
            vertices: [Vertex::new(p0), Vertex::new(p1), Vertex::new(p2)],
        });
    }
    Ok(triangles)
}

/// Write the mesh as binary STL.
pub fn write_stl(mesh: &TriangleMesh, path: &Path) -> Result<(), ExportError> {
    let triangles = stl_triangles(mesh)?;
    let mut writer = BufWriter::new(File::create(path)?);
    stl_io::write_stl(&mut writer, triangles.into_iter())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_kernel::{GeometryKernel, MockKernel};

    #[test]
    fn box_mesh_yields_twelve_stl_triangles() {
        let mut kernel = MockKernel::new();
        let solid = kernel.make_box([1.0, 2.0, 3.0], [0.0; 3]).unwrap();
        let mesh = kernel.tessellate(&solid, 0.1).unwrap();
        let triangles = stl_triangles(&mesh).unwrap();
        assert_eq!(triangles.len(), 12);
        for t in &triangles {
            let n = t.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "facet normals are unit length");
        }
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mesh = TriangleMesh {
            vertices: vec![],
            normals: vec![],
            indices: vec![],
        };
        assert!(matches!(stl_triangles(&mesh), Err(ExportError::EmptyMesh)));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mesh = TriangleMesh {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0; 9],
            indices: vec![0, 1, 7],
        };
        assert!(matches!(
            stl_triangles(&mesh),
            Err(ExportError::Encode { format: "STL", .. })
        ));
    }
}
